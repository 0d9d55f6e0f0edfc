//! Text rasterization
//!
//! Renders a string onto an off-screen [`AlphaCanvas`] through a
//! [`GlyphRenderer`] and samples the ink pixels that become point homes.
//!
//! Two renderers ship with the crate: [`BlockFont`], a built-in bold bitmap
//! face that is always available, and [`FontdueRenderer`] for TrueType and
//! OpenType fonts.

pub mod canvas;
pub mod block_font;
pub mod font;
pub mod rasterizer;

pub use canvas::AlphaCanvas;
pub use block_font::BlockFont;
pub use font::{load_font_or_fallback, FontError, FontResult, FontdueRenderer};
pub use rasterizer::{fit_font_size, InkPixel, InkPixels, RasterizedText, TextRasterizer};

/// A surface that can draw a string, centred, onto an alpha canvas
pub trait GlyphRenderer: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &str;

    /// Draw `text` at `font_px`, centred on the canvas
    ///
    /// Coverage written for the character at index `i` of `text.chars()` must
    /// be tagged with glyph index `i`.
    fn draw_centered(&self, text: &str, font_px: f32, canvas: &mut AlphaCanvas);
}
