//! Built-in bold 5x7 bitmap face
//!
//! Always available, so rasterization still produces points when no font
//! file could be loaded. Lowercase letters render as capitals; characters
//! without a bitmap draw nothing but still advance the pen.

use super::{AlphaCanvas, GlyphRenderer};

const GLYPH_COLUMNS: usize = 5;
const GLYPH_ROWS: usize = 7;
/// Advance in cells, including one cell of spacing
const ADVANCE_CELLS: f32 = 6.0;
/// Cap height as a fraction of the font size
const CAP_HEIGHT_RATIO: f32 = 0.72;
/// Horizontal stroke widening, in cells
const BOLD_SPREAD: f32 = 0.35;

/// Bold bitmap face rendering glyphs as filled cells
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockFont;

impl BlockFont {
    /// Create the face
    pub fn new() -> Self {
        Self
    }

    /// Row bitmaps for a character, top row first, bit 4 = leftmost column
    pub fn glyph_rows(ch: char) -> Option<[u8; GLYPH_ROWS]> {
        let rows = match ch.to_ascii_uppercase() {
            'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
            'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
            'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
            'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
            'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
            'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
            'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
            'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
            'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
            'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
            'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
            'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
            'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
            'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
            'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
            'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
            'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
            'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
            'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
            'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
            'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
            'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
            'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
            'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
            'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
            'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
            '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
            '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
            '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
            '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
            '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
            '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
            '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
            '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
            '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
            '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
            '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
            ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
            ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
            '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
            '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
            '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
            '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
            '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
            '\'' => [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
            '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
            '&' => [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D],
            '#' => [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
            '@' => [0x0E, 0x11, 0x01, 0x0D, 0x15, 0x15, 0x0E],
            '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
            ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
            _ => return None,
        };
        Some(rows)
    }

    /// Width in pixels `text` occupies at `font_px`
    pub fn text_width(text: &str, font_px: f32) -> f32 {
        let count = text.chars().count();
        if count == 0 {
            return 0.0;
        }
        let cell = Self::cell_size(font_px);
        count as f32 * ADVANCE_CELLS * cell - cell
    }

    fn cell_size(font_px: f32) -> f32 {
        font_px * CAP_HEIGHT_RATIO / GLYPH_ROWS as f32
    }
}

impl GlyphRenderer for BlockFont {
    fn name(&self) -> &str {
        "block-5x7"
    }

    fn draw_centered(&self, text: &str, font_px: f32, canvas: &mut AlphaCanvas) {
        let cell = Self::cell_size(font_px);
        let left = (canvas.width() as f32 - Self::text_width(text, font_px)) * 0.5;
        let top = (canvas.height() as f32 - cell * GLYPH_ROWS as f32) * 0.5;

        for (glyph, ch) in text.chars().enumerate() {
            let Some(rows) = Self::glyph_rows(ch) else {
                continue;
            };
            let origin_x = left + glyph as f32 * ADVANCE_CELLS * cell;

            for (row, bits) in rows.iter().enumerate() {
                let y0 = top + row as f32 * cell;
                for column in 0..GLYPH_COLUMNS {
                    if bits & (0x10 >> column) == 0 {
                        continue;
                    }
                    let x0 = origin_x + column as f32 * cell;
                    canvas.fill_rect(x0, y0, x0 + cell * (1.0 + BOLD_SPREAD), y0 + cell, glyph);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_maps_to_capitals() {
        assert_eq!(BlockFont::glyph_rows('a'), BlockFont::glyph_rows('A'));
        assert!(BlockFont::glyph_rows('~').is_none());
        assert!(BlockFont::glyph_rows(' ').is_none());
    }

    #[test]
    fn test_every_bitmap_fits_five_columns() {
        for ch in ('A'..='Z').chain('0'..='9') {
            let rows = BlockFont::glyph_rows(ch).unwrap();
            assert!(rows.iter().all(|&bits| bits < 0x20), "glyph {ch} is wider than 5 columns");
            assert!(rows.iter().any(|&bits| bits != 0), "glyph {ch} is blank");
        }
    }

    #[test]
    fn test_draw_tags_glyph_indices() {
        let mut canvas = AlphaCanvas::new(256, 64);
        BlockFont::new().draw_centered("I I", 40.0, &mut canvas);

        let mut owners = std::collections::BTreeSet::new();
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if let Some(owner) = canvas.owner_at(x, y) {
                    owners.insert(owner);
                }
            }
        }
        // index 1 is the space
        assert_eq!(owners.into_iter().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_unknown_glyphs_draw_nothing() {
        let mut canvas = AlphaCanvas::new(64, 64);
        BlockFont::new().draw_centered("~~", 30.0, &mut canvas);
        assert_eq!(canvas.covered_pixels(), 0);
    }
}
