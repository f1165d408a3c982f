//! Pixel buffer

/// Color (RGBA)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Row-major RGBA pixel grid
///
/// Row 0 is scanline 0, the bottom edge of the glyph box. Sinks that expect
/// y-down images should use [`PixelBuffer::rows_top_down`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Create a transparent buffer
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; size],
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Get a pixel color
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Set a pixel color
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Paint `[x_start, x_end)` on row `y`, clipped to the buffer
    pub fn fill_span(&mut self, y: u32, x_start: u32, x_end: u32, color: Color) {
        if y >= self.height {
            return;
        }
        let x_end = x_end.min(self.width);
        if x_start >= x_end {
            return;
        }
        let row = y as usize * self.width as usize;
        self.pixels[row + x_start as usize..row + x_end as usize].fill(color);
    }

    /// Rows from the top of the glyph down, always `height` of them
    pub fn rows_top_down(&self) -> impl Iterator<Item = &[Color]> {
        let width = self.width as usize;
        (0..self.height as usize)
            .rev()
            .map(move |y| &self.pixels[y * width..(y + 1) * width])
    }

    /// Number of non-transparent pixels
    pub fn coverage(&self) -> usize {
        self.pixels.iter().filter(|c| c.a != 0).count()
    }

    /// Whether nothing has been painted
    pub fn is_blank(&self) -> bool {
        self.coverage() == 0
    }

    /// Get pixel data as raw bytes (RGBA)
    pub fn as_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| [c.r, c.g, c.b, c.a]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let buffer = PixelBuffer::new(3, 2);
        assert_eq!(buffer.pixels.len(), 6);
        assert!(buffer.is_blank());
        assert_eq!(buffer.as_bytes(), vec![0; 24]);
    }

    #[test]
    fn test_fill_span_clips() {
        let mut buffer = PixelBuffer::new(4, 2);
        buffer.fill_span(1, 2, 10, Color::WHITE);
        buffer.fill_span(5, 0, 4, Color::WHITE);
        buffer.fill_span(0, 3, 3, Color::WHITE);
        assert_eq!(buffer.coverage(), 2);
        assert_eq!(buffer.get_pixel(3, 1), Some(Color::WHITE));
        assert_eq!(buffer.get_pixel(1, 1), Some(Color::TRANSPARENT));
        assert_eq!(buffer.get_pixel(4, 1), None);
    }

    #[test]
    fn test_rows_top_down() {
        let mut buffer = PixelBuffer::new(2, 3);
        buffer.set_pixel(0, 0, Color::BLACK);
        let rows: Vec<_> = buffer.rows_top_down().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2][0], Color::BLACK);
        assert_eq!(rows[0][0], Color::TRANSPARENT);
    }

    #[test]
    fn test_zero_sized() {
        let buffer = PixelBuffer::new(0, 0);
        assert!(buffer.pixels.is_empty());
        assert_eq!(buffer.rows_top_down().count(), 0);
    }

    #[test]
    fn test_rows_top_down_zero_width() {
        let buffer = PixelBuffer::new(0, 4);
        let rows: Vec<_> = buffer.rows_top_down().collect();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.is_empty()));
    }
}
