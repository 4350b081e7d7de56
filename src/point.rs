use std::fmt::{Display, Formatter};
use palette::Srgb;

// ====================
// PUBLIC TYPE ALIASES
// ====================

/// Sum of absolute channel differences. Three `i32` channels can differ by
/// up to `u32::MAX` each, so the sum needs 64 bits.
pub type Distance = u64;

// ====================
// PUBLIC CONSTANTS
// ====================

pub const CHANNELS: usize = 3;

// ====================
// PUBLIC STRUCTS
// ====================

/// A color as three raw integer channels.
///
/// The derived ordering is lexicographic by `(c0, c1, c2)`. It carries no
/// spatial meaning and only exists so point sets iterate deterministically.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Point3i {
    c0: i32,
    c1: i32,
    c2: i32
}

impl Point3i {
    pub const fn new(c0: i32, c1: i32, c2: i32) -> Self {
        Point3i { c0, c1, c2 }
    }

    pub fn c0(&self) -> i32 {
        self.c0
    }

    pub fn c1(&self) -> i32 {
        self.c1
    }

    pub fn c2(&self) -> i32 {
        self.c2
    }

    /// Returns the value of the channel `axis`, which must be 0, 1 or 2.
    pub fn channel(&self, axis: usize) -> i32 {
        match axis {
            0 => self.c0,
            1 => self.c1,
            2 => self.c2,
            _ => panic!("channel index {} out of range", axis)
        }
    }

    pub fn channels(&self) -> [i32; CHANNELS] {
        [self.c0, self.c1, self.c2]
    }

    pub fn l1_distance(&self, other: Point3i) -> Distance {
        l1_distance(*self, other)
    }

    /// Converts back to an 8-bit color, or `None` if any channel is outside 0-255.
    pub fn to_rgb8(&self) -> Option<Srgb<u8>> {
        let [c0, c1, c2] = self.channels().map(|channel| u8::try_from(channel).ok());
        Some(Srgb::new(c0?, c1?, c2?))
    }

    /// Like [`Point3i::to_rgb8`], but saturates out-of-range channels.
    pub fn to_rgb8_saturating(&self) -> Srgb<u8> {
        let [c0, c1, c2] = self.channels().map(|channel| channel.clamp(0, u8::MAX as i32) as u8);
        Srgb::new(c0, c1, c2)
    }
}

impl From<[i32; CHANNELS]> for Point3i {
    fn from(channels: [i32; CHANNELS]) -> Self {
        Point3i::new(channels[0], channels[1], channels[2])
    }
}

impl From<Srgb<u8>> for Point3i {
    fn from(color: Srgb<u8>) -> Self {
        Point3i::new(color.red as i32, color.green as i32, color.blue as i32)
    }
}

#[cfg(feature = "image")]
impl From<image::Rgb<u8>> for Point3i {
    fn from(color: image::Rgb<u8>) -> Self {
        let [red, green, blue] = color.0;
        Point3i::new(red as i32, green as i32, blue as i32)
    }
}

impl Display for Point3i {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{},{},{}}}", self.c0, self.c1, self.c2)
    }
}

// ====================
// PUBLIC FUNCTIONS
// ====================

/// Manhattan distance between two points. Channels are not clamped to any range.
pub fn l1_distance(a: Point3i, b: Point3i) -> Distance {
    a.c0.abs_diff(b.c0) as Distance
        + a.c1.abs_diff(b.c1) as Distance
        + a.c2.abs_diff(b.c2) as Distance
}
