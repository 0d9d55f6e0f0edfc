//! TrueType/OpenType glyph rendering using the `fontdue` library

use fontdue::{Font, FontSettings};

use super::{AlphaCanvas, BlockFont, GlyphRenderer};

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font operations
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Failed to load font from file or data
    #[error("Failed to load font: {0}")]
    LoadError(String),

    /// Failed to read the font file
    #[error("Failed to read font file: {0}")]
    Io(#[from] std::io::Error),
}

/// Glyph renderer backed by a parsed font file
///
/// Strokes are widened by `dilation` pixels to the right to approximate a
/// bold weight from a regular face.
pub struct FontdueRenderer {
    font: Font,
    dilation: u32,
}

impl FontdueRenderer {
    /// Parse raw TTF/OTF bytes
    pub fn from_bytes(font_data: &[u8]) -> FontResult<Self> {
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| FontError::LoadError(format!("fontdue error: {e}")))?;
        log::info!("Loaded font face for glyph rasterization");
        Ok(Self { font, dilation: 1 })
    }

    /// Read and parse a font file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> FontResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Set the horizontal stroke widening in pixels
    pub fn with_dilation(mut self, dilation: u32) -> Self {
        self.dilation = dilation;
        self
    }
}

impl GlyphRenderer for FontdueRenderer {
    fn name(&self) -> &str {
        "fontdue"
    }

    fn draw_centered(&self, text: &str, font_px: f32, canvas: &mut AlphaCanvas) {
        let width: f32 = text
            .chars()
            .map(|ch| self.font.metrics(ch, font_px).advance_width)
            .sum::<f32>()
            + self.dilation as f32;
        let (ascent, descent) = self
            .font
            .horizontal_line_metrics(font_px)
            .map_or((font_px * 0.8, -font_px * 0.2), |m| (m.ascent, m.descent));

        let top = (canvas.height() as f32 - (ascent - descent)) * 0.5;
        #[allow(clippy::cast_possible_truncation)]
        let baseline = (top + ascent).round() as i64;
        let mut pen_x = (canvas.width() as f32 - width) * 0.5;

        for (glyph, ch) in text.chars().enumerate() {
            let (metrics, bitmap) = self.font.rasterize(ch, font_px);
            #[allow(clippy::cast_possible_truncation)]
            let left = pen_x.round() as i64 + i64::from(metrics.xmin);
            let glyph_top = baseline - (i64::from(metrics.ymin) + metrics.height as i64);

            for (row, line) in bitmap.chunks(metrics.width.max(1)).enumerate() {
                for (column, &coverage) in line.iter().enumerate() {
                    if coverage == 0 {
                        continue;
                    }
                    for spread in 0..=i64::from(self.dilation) {
                        canvas.plot(left + column as i64 + spread, glyph_top + row as i64, coverage, glyph);
                    }
                }
            }
            pen_x += metrics.advance_width;
        }
    }
}

/// Parse `font_data`, or fall back to the built-in block face
///
/// A missing or broken font never stops text from forming; it only changes
/// the look.
pub fn load_font_or_fallback(font_data: Option<&[u8]>) -> Box<dyn GlyphRenderer> {
    match font_data.map(FontdueRenderer::from_bytes) {
        Some(Ok(renderer)) => Box::new(renderer),
        Some(Err(e)) => {
            log::warn!("{e}; falling back to built-in block font");
            Box::new(BlockFont::new())
        }
        None => Box::new(BlockFont::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextRasterizer;

    #[test]
    fn test_garbage_font_data_is_rejected() {
        let result = FontdueRenderer::from_bytes(b"definitely not a font");
        assert!(matches!(result, Err(FontError::LoadError(_))));
    }

    #[test]
    fn test_missing_font_file_is_io_error() {
        let result = FontdueRenderer::from_file("/nonexistent/font.ttf");
        assert!(matches!(result, Err(FontError::Io(_))));
    }

    #[test]
    fn test_fallback_renderer_on_bad_font() {
        let renderer = load_font_or_fallback(Some(b"bad"));
        assert_eq!(renderer.name(), "block-5x7");

        let renderer = load_font_or_fallback(None);
        assert_eq!(renderer.name(), "block-5x7");
    }

    const TEST_FONT: &[u8] = include_bytes!("../../tests/data/DejaVuSans-Bold.ttf");

    fn test_renderer() -> FontdueRenderer {
        FontdueRenderer::from_bytes(TEST_FONT).unwrap()
    }

    /// Mean position of inked pixels, optionally restricted to one glyph
    fn ink_centroid(canvas: &AlphaCanvas, glyph: Option<usize>) -> (f32, f32) {
        let (mut sum_x, mut sum_y, mut count) = (0.0, 0.0, 0.0);
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                let owned = glyph.map_or(true, |g| canvas.owner_at(x, y) == Some(g));
                if canvas.alpha_at(x, y) > 0 && owned {
                    sum_x += x as f32 + 0.5;
                    sum_y += y as f32 + 0.5;
                    count += 1.0;
                }
            }
        }
        assert!(count > 0.0, "no ink for glyph {glyph:?}");
        (sum_x / count, sum_y / count)
    }

    #[test]
    fn test_real_font_loads_through_fallback_helper() {
        assert_eq!(load_font_or_fallback(Some(TEST_FONT)).name(), "fontdue");
    }

    #[test]
    fn test_draw_centered_places_ink_mid_canvas() {
        let mut canvas = AlphaCanvas::new(256, 128);
        test_renderer().draw_centered("H", 64.0, &mut canvas);

        let (cx, cy) = ink_centroid(&canvas, None);
        assert!((cx - 128.0).abs() < 6.0, "centroid x {cx}");
        assert!((cy - 64.0).abs() < 12.0, "centroid y {cy}");
    }

    #[test]
    fn test_glyph_indices_follow_char_order() {
        let text = "LOT";
        let mut canvas = AlphaCanvas::new(512, 128);
        test_renderer().draw_centered(text, 72.0, &mut canvas);

        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.alpha_at(x, y) > 0 {
                    assert!(canvas.owner_at(x, y).is_some_and(|g| g < text.chars().count()));
                }
            }
        }

        let centres: Vec<f32> = (0..3).map(|g| ink_centroid(&canvas, Some(g)).0).collect();
        assert!(centres.windows(2).all(|pair| pair[0] < pair[1]), "{centres:?}");
    }

    #[test]
    fn test_point_count_matches_canvas_scan() {
        let rasterizer = TextRasterizer::new(Box::new(test_renderer()));
        let raster = rasterizer.rasterize("Hi", 120.0, 512, 256);

        let canvas = raster.canvas();
        let mut expected = 0;
        for y in (0..canvas.height()).step_by(3) {
            for x in (0..canvas.width()).step_by(3) {
                if canvas.alpha_at(x, y) > 128 {
                    expected += 1;
                }
            }
        }

        assert!(expected > 0);
        assert_eq!(raster.ink_pixels(3, 128).count(), expected);
    }

    #[test]
    fn test_dilation_widens_strokes() {
        let mut thin = AlphaCanvas::new(256, 128);
        test_renderer().with_dilation(0).draw_centered("H", 64.0, &mut thin);
        let mut bold = AlphaCanvas::new(256, 128);
        test_renderer().with_dilation(3).draw_centered("H", 64.0, &mut bold);

        assert!(thin.covered_pixels() > 0);
        assert!(bold.covered_pixels() > thin.covered_pixels());
    }
}
