//! Off-screen alpha buffer that glyph renderers draw into

use image::{GrayImage, Luma};

const NO_GLYPH: u16 = u16::MAX;

/// Single-channel raster surface with per-pixel glyph ownership
#[derive(Debug, Clone)]
pub struct AlphaCanvas {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
    owner: Vec<u16>,
}

impl AlphaCanvas {
    /// Create a fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            alpha: vec![0; len],
            owner: vec![NO_GLYPH; len],
        }
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Alpha at a pixel; zero outside the canvas
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x < self.width && y < self.height {
            self.alpha[self.index(x, y)]
        } else {
            0
        }
    }

    /// Glyph that wrote the strongest coverage at a pixel
    pub fn owner_at(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        match self.owner[self.index(x, y)] {
            NO_GLYPH => None,
            glyph => Some(glyph as usize),
        }
    }

    /// Write coverage at a pixel, keeping the maximum of old and new
    ///
    /// Coordinates outside the canvas are clipped.
    pub fn plot(&mut self, x: i64, y: i64, alpha: u8, glyph: usize) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let index = self.index(x as u32, y as u32);
        if alpha > self.alpha[index] {
            self.alpha[index] = alpha;
            self.owner[index] = u16::try_from(glyph).unwrap_or(NO_GLYPH - 1);
        }
    }

    /// Fill every pixel whose centre lies in `[x0, x1) x [y0, y1)` at full alpha
    pub fn fill_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, glyph: usize) {
        #[allow(clippy::cast_possible_truncation)]
        let (first_x, last_x) = ((x0 - 0.5).ceil() as i64, (x1 - 0.5).ceil() as i64);
        #[allow(clippy::cast_possible_truncation)]
        let (first_y, last_y) = ((y0 - 0.5).ceil() as i64, (y1 - 0.5).ceil() as i64);
        for y in first_y..last_y {
            for x in first_x..last_x {
                self.plot(x, y, u8::MAX, glyph);
            }
        }
    }

    /// Number of pixels with non-zero alpha
    pub fn covered_pixels(&self) -> usize {
        self.alpha.iter().filter(|&&a| a > 0).count()
    }

    /// Copy the alpha channel into a grayscale image for inspection
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| Luma([self.alpha_at(x, y)]))
    }
}
