//! Display and LED codec
//!
//! Renders one display slot into its three segment bytes and the button LEDs
//! into the status byte.
//!
//! # Value formats
//!
//! - Integer: three zero-padded digits, most significant first (`042`)
//! - Fractional: two integer digits and one decimal (` 4.2`), with the
//!   decimal point carried on the units digit and a blank leading zero
//!
//! A slot whose value falls outside its format is a [`RangeError`]. The
//! caller is expected to drop the whole frame rather than show a partial
//! value.

use core::fmt::Write;

use heapless::String;

use crate::blink::BlinkPhase;
use crate::digit::{encode_digit, Digit, BLANK, DECIMAL_POINT};

/// Largest integer value accepted by [`render_integer`]
pub const MAX_INTEGER: u16 = 1000;

/// Fractional values are stored in tenths and must stay below this
pub const FRACTIONAL_LIMIT: u16 = 1000;

/// Valid one-hot LED addresses
pub const LED_ADDRESSES: [u8; 4] = [8, 4, 2, 1];

/// LED status byte with every LED off
pub const LEDS_OFF: u8 = 0xFF;

/// A value outside its representable domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    /// Integer value above [`MAX_INTEGER`]
    Integer(u16),
    /// Fractional value (in tenths) with more than two integer digits
    Fractional(u16),
    /// LED address that is not a one-hot bit of the LED nibble, or is
    /// shared by two LEDs
    LedAddress(u8),
}

/// Value shown on one display
///
/// The variant is chosen when the value is written, so rendering never has
/// to guess the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayValue {
    /// Whole number, 0-1000
    Integer(u16),
    /// Number with one decimal, stored in tenths (42 = 4.2)
    Fractional(u16),
}

impl DisplayValue {
    /// Raw stored magnitude (whole units or tenths)
    pub const fn raw(self) -> u16 {
        match self {
            DisplayValue::Integer(v) | DisplayValue::Fractional(v) => v,
        }
    }

    /// Same variant holding a different raw magnitude
    pub const fn with_raw(self, raw: u16) -> Self {
        match self {
            DisplayValue::Integer(_) => DisplayValue::Integer(raw),
            DisplayValue::Fractional(_) => DisplayValue::Fractional(raw),
        }
    }

    /// Raw magnitude of one whole unit (1, or 10 tenths)
    pub const fn unit(self) -> u16 {
        match self {
            DisplayValue::Integer(_) => 1,
            DisplayValue::Fractional(_) => 10,
        }
    }

    /// Check if the value reads zero
    pub const fn is_zero(self) -> bool {
        self.raw() == 0
    }

    /// Human-readable form for logs (`300`, `4.2`)
    pub fn text(self) -> String<8> {
        let mut text = String::new();
        // Fits: at most 5 digits, a point and one decimal
        let _ = match self {
            DisplayValue::Integer(v) => write!(text, "{}", v),
            DisplayValue::Fractional(t) => write!(text, "{}.{}", t / 10, t % 10),
        };
        text
    }
}

impl Default for DisplayValue {
    fn default() -> Self {
        DisplayValue::Integer(0)
    }
}

/// One display group and its blink flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplaySlot {
    /// Current value
    pub value: DisplayValue,
    /// Blink with the shared blink phase
    pub blink: bool,
}

impl DisplaySlot {
    /// Create a non-blinking slot
    pub const fn new(value: DisplayValue) -> Self {
        Self { value, blink: false }
    }

    /// Render this slot according to its value variant
    pub fn render(&self, phase: BlinkPhase) -> Result<[u8; 3], RangeError> {
        match self.value {
            DisplayValue::Integer(_) => render_integer(self, phase),
            DisplayValue::Fractional(_) => render_fractional(self, phase),
        }
    }
}

/// One illuminated button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedSlot {
    /// LED is lit
    pub active: bool,
    /// Blink with the shared blink phase
    pub blink: bool,
    /// One-hot bit in the LED status byte
    pub address: u8,
}

impl LedSlot {
    /// Create an unlit LED at `address`
    pub const fn new(address: u8) -> Self {
        Self {
            active: false,
            blink: false,
            address,
        }
    }
}

/// Render an integer slot as three digits
///
/// `1000` is shown by its lower three digits, the displays have no fourth
/// position.
pub fn render_integer(slot: &DisplaySlot, phase: BlinkPhase) -> Result<[u8; 3], RangeError> {
    let value = slot.value.raw();
    if value > MAX_INTEGER {
        return Err(RangeError::Integer(value));
    }

    if phase.suppresses(slot.blink) {
        return Ok([BLANK; 3]);
    }

    Ok([
        encode_digit(Some(Digit::low_of(value / 100))),
        encode_digit(Some(Digit::low_of(value / 10))),
        encode_digit(Some(Digit::low_of(value))),
    ])
}

/// Render a fractional slot as two integer digits and one decimal
pub fn render_fractional(slot: &DisplaySlot, phase: BlinkPhase) -> Result<[u8; 3], RangeError> {
    let tenths = slot.value.raw();
    if tenths >= FRACTIONAL_LIMIT {
        return Err(RangeError::Fractional(tenths));
    }

    if phase.suppresses(slot.blink) {
        return Ok([BLANK; 3]);
    }

    let tens = tenths / 100;
    let leading = if tens == 0 {
        BLANK
    } else {
        encode_digit(Some(Digit::low_of(tens)))
    };

    Ok([
        leading,
        encode_digit(Some(Digit::low_of(tenths / 10))) + DECIMAL_POINT,
        encode_digit(Some(Digit::low_of(tenths))),
    ])
}

/// Render the LED status byte
///
/// LEDs are active-low: each lit LED clears its address bit. Addresses must
/// be disjoint one-hot bits, so the order of the slots does not matter.
pub fn render_led_byte(leds: &[LedSlot], phase: BlinkPhase) -> Result<u8, RangeError> {
    let mut byte = LEDS_OFF;
    let mut seen = 0u8;
    for led in leds {
        if !LED_ADDRESSES.contains(&led.address) || seen & led.address != 0 {
            return Err(RangeError::LedAddress(led.address));
        }
        seen |= led.address;
        if led.active && !phase.suppresses(led.blink) {
            byte &= !led.address;
        }
    }
    Ok(byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integer(value: u16) -> DisplaySlot {
        DisplaySlot::new(DisplayValue::Integer(value))
    }

    fn fractional(tenths: u16) -> DisplaySlot {
        DisplaySlot::new(DisplayValue::Fractional(tenths))
    }

    #[test]
    fn test_integer_zero_padded() {
        assert_eq!(render_integer(&integer(7), BlinkPhase::On), Ok([190, 190, 14]));
        assert_eq!(render_integer(&integer(42), BlinkPhase::On), Ok([190, 90, 230]));
        assert_eq!(render_integer(&integer(999), BlinkPhase::On), Ok([126, 126, 126]));
    }

    #[test]
    fn test_integer_upper_bound() {
        assert_eq!(render_integer(&integer(1000), BlinkPhase::On), Ok([190, 190, 190]));
        assert_eq!(
            render_integer(&integer(1001), BlinkPhase::On),
            Err(RangeError::Integer(1001))
        );
    }

    #[test]
    fn test_range_checked_before_blink() {
        let mut slot = integer(1500);
        slot.blink = true;
        assert_eq!(
            render_integer(&slot, BlinkPhase::Off),
            Err(RangeError::Integer(1500))
        );
    }

    #[test]
    fn test_blink_hides_value() {
        let mut slot = integer(123);
        slot.blink = true;
        assert_eq!(render_integer(&slot, BlinkPhase::Off), Ok([0, 0, 0]));
        assert_eq!(render_integer(&slot, BlinkPhase::On), Ok([10, 230, 110]));
        // Value is untouched
        assert_eq!(slot.value, DisplayValue::Integer(123));
    }

    #[test]
    fn test_fractional_formatting() {
        // 12.3
        assert_eq!(
            render_fractional(&fractional(123), BlinkPhase::On),
            Ok([10, 231, 110])
        );
        // " 4.5" - leading blank, not zero
        assert_eq!(
            render_fractional(&fractional(45), BlinkPhase::On),
            Ok([0, 91, 124])
        );
        // " 0.0"
        assert_eq!(
            render_fractional(&fractional(0), BlinkPhase::On),
            Ok([0, 191, 190])
        );
    }

    #[test]
    fn test_fractional_range() {
        assert!(render_fractional(&fractional(999), BlinkPhase::On).is_ok());
        assert_eq!(
            render_fractional(&fractional(1000), BlinkPhase::On),
            Err(RangeError::Fractional(1000))
        );
    }

    #[test]
    fn test_value_text() {
        assert_eq!(DisplayValue::Integer(300).text().as_str(), "300");
        assert_eq!(DisplayValue::Fractional(42).text().as_str(), "4.2");
        assert_eq!(DisplayValue::Fractional(5).text().as_str(), "0.5");
        assert_eq!(DisplayValue::Integer(u16::MAX).text().as_str(), "65535");
    }

    #[test]
    fn test_slot_dispatches_on_variant() {
        assert_eq!(integer(45).render(BlinkPhase::On), Ok([190, 90, 124]));
        assert_eq!(fractional(45).render(BlinkPhase::On), Ok([0, 91, 124]));
    }

    #[test]
    fn test_led_byte() {
        let mut leds = [
            LedSlot::new(8),
            LedSlot::new(4),
            LedSlot::new(2),
            LedSlot::new(1),
        ];
        assert_eq!(render_led_byte(&leds, BlinkPhase::On), Ok(0xFF));

        leds[0].active = true;
        leds[3].active = true;
        assert_eq!(render_led_byte(&leds, BlinkPhase::On), Ok(0xFF - 8 - 1));

        leds[3].blink = true;
        assert_eq!(render_led_byte(&leds, BlinkPhase::Off), Ok(0xFF - 8));
        assert_eq!(render_led_byte(&leds, BlinkPhase::On), Ok(0xFF - 8 - 1));
    }

    #[test]
    fn test_led_address_domain() {
        let leds = [LedSlot::new(8), LedSlot::new(16)];
        assert_eq!(
            render_led_byte(&leds, BlinkPhase::On),
            Err(RangeError::LedAddress(16))
        );
        let leds = [LedSlot::new(3)];
        assert_eq!(
            render_led_byte(&leds, BlinkPhase::On),
            Err(RangeError::LedAddress(3))
        );
    }

    #[test]
    fn test_led_addresses_must_be_disjoint() {
        let mut leds = [LedSlot::new(8), LedSlot::new(4), LedSlot::new(8)];
        leds[0].active = true;
        leds[2].active = true;
        assert_eq!(
            render_led_byte(&leds, BlinkPhase::On),
            Err(RangeError::LedAddress(8))
        );
        // Rejected even when the duplicate is dark
        leds[2].active = false;
        assert_eq!(
            render_led_byte(&leds, BlinkPhase::On),
            Err(RangeError::LedAddress(8))
        );
    }
}
