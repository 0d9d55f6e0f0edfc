//! Text to ink-pixel sampling

use super::{AlphaCanvas, BlockFont, GlyphRenderer};

/// Smallest font size `fit_font_size` will return
pub const MIN_FONT_PX: f32 = 12.0;
/// Canvas width per character, in font sizes, before shrinking kicks in
const FIT_WIDTH_RATIO: f32 = 1.6;

/// Shrink `requested_px` so that long strings fit the canvas width
pub fn fit_font_size(text: &str, requested_px: f32, canvas_width: u32) -> f32 {
    let count = text.chars().count().max(1) as f32;
    requested_px
        .min(canvas_width as f32 * FIT_WIDTH_RATIO / count)
        .max(MIN_FONT_PX)
}

/// One sampled pixel whose alpha exceeded the threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkPixel {
    /// Pixel centre relative to the canvas centre, x right
    pub x: f32,
    /// Pixel centre relative to the canvas centre, y up
    pub y: f32,
    /// Index of the character that produced the pixel
    pub glyph: usize,
}

/// A rendered string, ready to be sampled
#[derive(Debug, Clone)]
pub struct RasterizedText {
    canvas: AlphaCanvas,
    font_px: f32,
}

impl RasterizedText {
    /// The underlying canvas
    pub fn canvas(&self) -> &AlphaCanvas {
        &self.canvas
    }

    /// Font size actually used after fitting
    pub fn font_px(&self) -> f32 {
        self.font_px
    }

    /// Lazily sample ink pixels on a `stride` grid
    ///
    /// Calling again restarts the scan; the result is deterministic.
    pub fn ink_pixels(&self, stride: u32, threshold: u8) -> InkPixels<'_> {
        InkPixels {
            canvas: &self.canvas,
            stride: stride.max(1),
            threshold,
            x: 0,
            y: 0,
        }
    }
}

/// Iterator over sampled ink pixels, row by row
pub struct InkPixels<'a> {
    canvas: &'a AlphaCanvas,
    stride: u32,
    threshold: u8,
    x: u32,
    y: u32,
}

impl Iterator for InkPixels<'_> {
    type Item = InkPixel;

    fn next(&mut self) -> Option<InkPixel> {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        while self.y < height {
            if self.x >= width {
                self.x = 0;
                self.y = self.y.saturating_add(self.stride);
                continue;
            }
            let (x, y) = (self.x, self.y);
            self.x = self.x.saturating_add(self.stride);

            if self.canvas.alpha_at(x, y) > self.threshold {
                return Some(InkPixel {
                    x: x as f32 + 0.5 - width as f32 * 0.5,
                    y: height as f32 * 0.5 - (y as f32 + 0.5),
                    glyph: self.canvas.owner_at(x, y).unwrap_or(0),
                });
            }
        }
        None
    }
}

/// Renders strings through a [`GlyphRenderer`]
pub struct TextRasterizer {
    renderer: Box<dyn GlyphRenderer>,
}

impl TextRasterizer {
    /// Create a rasterizer around a renderer
    pub fn new(renderer: Box<dyn GlyphRenderer>) -> Self {
        Self { renderer }
    }

    /// Create a rasterizer using the built-in block face
    pub fn with_block_font() -> Self {
        Self::new(Box::new(BlockFont::new()))
    }

    /// Name of the active renderer
    pub fn renderer_name(&self) -> &str {
        self.renderer.name()
    }

    /// Render `text` centred on a `canvas_width` x `canvas_height` surface
    pub fn rasterize(&self, text: &str, font_px: f32, canvas_width: u32, canvas_height: u32) -> RasterizedText {
        let mut canvas = AlphaCanvas::new(canvas_width, canvas_height);
        let font_px = fit_font_size(text, font_px, canvas_width);
        if !text.is_empty() && canvas_width > 0 && canvas_height > 0 {
            self.renderer.draw_centered(text, font_px, &mut canvas);
        }
        log::debug!(
            "Rasterized {:?} at {:.1}px on {}x{} with {}",
            text, font_px, canvas_width, canvas_height, self.renderer.name()
        );
        RasterizedText { canvas, font_px }
    }
}

impl Default for TextRasterizer {
    fn default() -> Self {
        Self::with_block_font()
    }
}
