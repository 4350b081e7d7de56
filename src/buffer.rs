use crate::{PixelSink, PixelSource, Point3i};

// ====================
// PUBLIC STRUCTS
// ====================

/// Row-major in-memory image of raw points.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Point3i>
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        PixelBuffer::filled(width, height, Point3i::default())
    }

    pub fn filled(width: u32, height: u32, color: Point3i) -> Self {
        PixelBuffer {
            width,
            height,
            pixels: vec![color; width as usize * height as usize]
        }
    }

    /// Wraps row-major pixels. Returns `None` unless there are exactly `width * height` of them.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Point3i>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }

        Some(PixelBuffer { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, row: u32, col: u32) -> Point3i {
        self.pixels[self.index(row, col)]
    }

    pub fn as_slice(&self) -> &[Point3i] {
        &self.pixels
    }

    fn index(&self, row: u32, col: u32) -> usize {
        assert!(row < self.height && col < self.width, "pixel [{}][{}] is outside the buffer", row, col);
        row as usize * self.width as usize + col as usize
    }
}

impl PixelSource for PixelBuffer {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixels(&self) -> Box<dyn Iterator<Item=Point3i> + '_> {
        Box::new(self.pixels.iter().copied())
    }
}

impl PixelSink for PixelBuffer {
    fn write(&mut self, row: u32, col: u32, color: Point3i) {
        let index = self.index(row, col);
        self.pixels[index] = color;
    }
}

#[cfg(test)]
mod tests {
    use crate::{PixelBuffer, PixelSink, PixelSource, Point3i};

    #[test]
    fn test_from_pixels_checks_length() {
        assert_eq!(None, PixelBuffer::from_pixels(2, 2, vec![Point3i::default(); 3]));
        assert!(PixelBuffer::from_pixels(2, 2, vec![Point3i::default(); 4]).is_some());
        assert!(PixelBuffer::from_pixels(0, 5, Vec::new()).is_some());
    }

    #[test]
    fn test_write_then_read() {
        let mut buffer = PixelBuffer::new(3, 2);
        buffer.write(1, 2, Point3i::new(1, 2, 3));

        assert_eq!(Point3i::new(1, 2, 3), buffer.get(1, 2));
        assert_eq!(Point3i::new(1, 2, 3), buffer.as_slice()[5]);
        assert_eq!(Point3i::default(), buffer.get(0, 0));
    }

    #[test]
    fn test_pixels_are_row_major() {
        let pixels: Vec<Point3i> = (0..6).map(|i| Point3i::new(i, 0, 0)).collect();
        let buffer = PixelBuffer::from_pixels(3, 2, pixels.clone()).unwrap();

        assert_eq!((3, 2), buffer.dimensions());
        assert_eq!(pixels, buffer.pixels().collect::<Vec<_>>());
        assert_eq!(Point3i::new(4, 0, 0), buffer.get(1, 1));
    }

    #[test]
    #[should_panic]
    fn test_write_outside_panics() {
        PixelBuffer::new(2, 2).write(2, 0, Point3i::default());
    }
}
