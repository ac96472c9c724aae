use image::{Rgb, RgbImage};

use super::font;

pub mod colors {
    use image::Rgb;

    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    pub const GRID: Rgb<u8> = Rgb([225, 225, 225]);
    pub const FRAME: Rgb<u8> = Rgb([90, 90, 90]);
    pub const VALUE: Rgb<u8> = Rgb([31, 119, 180]);
    pub const MEAN: Rgb<u8> = Rgb([255, 127, 14]);
}

/// Pixel buffer with clipped drawing primitives. Coordinates are signed so
/// callers can pass points that fall outside the image.
pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn into_image(self) -> RgbImage {
        self.img
    }

    pub fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.img.width() && y < self.img.height() {
            self.img.put_pixel(x, y, color);
        }
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgb<u8>) {
        for dy in 0..height as i64 {
            for dx in 0..width as i64 {
                self.put(x + dx, y + dy, color);
            }
        }
    }

    pub fn hline(&mut self, y: i64, x1: i64, x2: i64, color: Rgb<u8>) {
        let (start, end) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        for x in start..=end {
            self.put(x, y, color);
        }
    }

    pub fn vline(&mut self, x: i64, y1: i64, y2: i64, color: Rgb<u8>) {
        let (start, end) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        for y in start..=end {
            self.put(x, y, color);
        }
    }

    pub fn stroke_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgb<u8>) {
        let (right, bottom) = (x + width as i64, y + height as i64);
        self.hline(y, x, right, color);
        self.hline(bottom, x, right, color);
        self.vline(x, y, bottom, color);
        self.vline(right, y, bottom, color);
    }

    /// Bresenham segment; `thickness` stamps a square brush at each step.
    pub fn line(&mut self, from: (i64, i64), to: (i64, i64), thickness: u32, color: Rgb<u8>) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        let offset = (thickness / 2) as i64;

        loop {
            self.fill_rect(x - offset, y - offset, thickness.max(1), thickness.max(1), color);
            if x == to.0 && y == to.1 {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += sx;
            }
            if doubled <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draws `text` with its top-left corner at `(x, y)`.
    pub fn text(&mut self, x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let scale = scale.max(1);
        for (index, ch) in text.chars().enumerate() {
            let origin_x = x + (index as u32 * font::ADVANCE * scale) as i64;
            for (row, bits) in font::glyph(ch).iter().enumerate() {
                for col in 0..font::GLYPH_WIDTH {
                    if bits & (1 << (font::GLYPH_WIDTH - 1 - col)) != 0 {
                        self.fill_rect(
                            origin_x + (col * scale) as i64,
                            y + (row as u32 * scale) as i64,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
        }
    }

    pub fn text_centered(&mut self, center_x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let width = font::text_width(text, scale) as i64;
        self.text(center_x - width / 2, y, text, scale, color);
    }
}
