//! Seven-segment digit encoding
//!
//! Maps decimal digits to the segment patterns of the display drivers.

/// Segment byte for an unlit digit
pub const BLANK: u8 = 0;

/// Segment bit of the decimal point
pub const DECIMAL_POINT: u8 = 1;

// Wire format values, indexed by digit
const SEGMENTS: [u8; 10] = [190, 10, 230, 110, 90, 124, 252, 14, 254, 126];

/// A single decimal digit (0-9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(u8);

impl Digit {
    /// Create a digit, returning `None` for values above 9
    pub const fn new(value: u8) -> Option<Self> {
        if value < 10 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Least-significant decimal digit of `value`
    pub const fn low_of(value: u16) -> Self {
        Self((value % 10) as u8)
    }

    /// Numeric value of this digit
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Segment pattern for this digit
    pub const fn segments(self) -> u8 {
        SEGMENTS[self.0 as usize]
    }
}

/// Encode a digit, or a blank position, into its segment byte
pub const fn encode_digit(digit: Option<Digit>) -> u8 {
    match digit {
        Some(d) => d.segments(),
        None => BLANK,
    }
}

/// Check whether a byte is a digit pattern or blank, ignoring the decimal point
pub fn is_segment_pattern(byte: u8) -> bool {
    let base = byte & !DECIMAL_POINT;
    base == BLANK || SEGMENTS.contains(&base)
}
