//! Frame assembly for the shift-register chain
//!
//! Frame layout (slot order):
//! - DISPLAY1..DISPLAY4 (3 bytes each): segment patterns, most significant
//!   digit first
//! - LED (1 byte): active-low button LED status
//!
//! The chain is loaded with the last element first, so the bytes go out on
//! the wire in reverse slot order. Shifting is followed by a latch pulse
//! that commits the whole chain at once.

use crate::blink::BlinkPhase;
use crate::codec::{render_led_byte, DisplaySlot, LedSlot, RangeError, LEDS_OFF};
use crate::digit::BLANK;

/// Number of display groups
pub const SLOT_COUNT: usize = 4;

/// Number of button LEDs
pub const LED_COUNT: usize = 4;

/// Bytes per display group
pub const GROUP_LEN: usize = 3;

/// Complete frame size (4 groups + LED byte)
pub const FRAME_LEN: usize = SLOT_COUNT * GROUP_LEN + 1;

/// Index of the LED status byte in slot order
const LED_INDEX: usize = FRAME_LEN - 1;

/// A complete frame, stored in slot order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    bytes: [u8; FRAME_LEN],
}

impl Frame {
    /// Frame with every digit blank and every LED off
    ///
    /// This is the fail-safe frame sent instead of a malformed one.
    pub const fn blank() -> Self {
        let mut bytes = [BLANK; FRAME_LEN];
        bytes[LED_INDEX] = LEDS_OFF;
        Self { bytes }
    }

    /// Frame with every segment and every LED lit (lamp test)
    pub const fn all_on() -> Self {
        let mut bytes = [0xFF; FRAME_LEN];
        bytes[LED_INDEX] = 0x00;
        Self { bytes }
    }

    /// Build a frame from pre-rendered parts
    pub fn from_parts(groups: [[u8; GROUP_LEN]; SLOT_COUNT], led_byte: u8) -> Self {
        let mut bytes = [0u8; FRAME_LEN];
        for (slot, group) in groups.iter().enumerate() {
            let start = slot * GROUP_LEN;
            bytes[start..start + GROUP_LEN].copy_from_slice(group);
        }
        bytes[LED_INDEX] = led_byte;
        Self { bytes }
    }

    /// Render displays and LEDs into a frame
    ///
    /// All slots share the same blink phase. The first out-of-range slot
    /// aborts assembly; callers replace the frame with [`Frame::blank`].
    pub fn assemble(
        displays: &[DisplaySlot; SLOT_COUNT],
        leds: &[LedSlot; LED_COUNT],
        phase: BlinkPhase,
    ) -> Result<Self, RangeError> {
        let mut groups = [[BLANK; GROUP_LEN]; SLOT_COUNT];
        for (group, display) in groups.iter_mut().zip(displays.iter()) {
            *group = display.render(phase)?;
        }
        let led_byte = render_led_byte(leds, phase)?;
        Ok(Self::from_parts(groups, led_byte))
    }

    /// Bytes in slot order
    pub fn as_slots(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    /// Segment bytes of one display group
    pub fn group(&self, slot: usize) -> Option<&[u8]> {
        if slot < SLOT_COUNT {
            let start = slot * GROUP_LEN;
            Some(&self.bytes[start..start + GROUP_LEN])
        } else {
            None
        }
    }

    /// LED status byte
    pub fn led_byte(&self) -> u8 {
        self.bytes[LED_INDEX]
    }

    /// Bytes in the order they are shifted out
    pub fn wire_bytes(&self) -> [u8; FRAME_LEN] {
        let mut wire = self.bytes;
        wire.reverse();
        wire
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::DisplayValue;

    fn displays(values: [u16; 4]) -> [DisplaySlot; 4] {
        values.map(|v| DisplaySlot::new(DisplayValue::Integer(v)))
    }

    fn leds() -> [LedSlot; 4] {
        [
            LedSlot::new(8),
            LedSlot::new(4),
            LedSlot::new(2),
            LedSlot::new(1),
        ]
    }

    #[test]
    fn test_blank_frame() {
        let frame = Frame::blank();
        assert_eq!(frame.led_byte(), 0xFF);
        assert!(frame.as_slots()[..12].iter().all(|&b| b == 0));
        // LED byte goes out first
        assert_eq!(frame.wire_bytes()[0], 0xFF);
    }

    #[test]
    fn test_lamp_test_frame() {
        let frame = Frame::all_on();
        assert_eq!(frame.led_byte(), 0x00);
        assert!(frame.as_slots()[..12].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_assemble_slot_order() {
        let mut leds = leds();
        leds[1].active = true;
        let frame = Frame::assemble(&displays([1, 20, 300, 0]), &leds, BlinkPhase::On).unwrap();

        assert_eq!(frame.group(0), Some(&[190u8, 190, 10][..]));
        assert_eq!(frame.group(1), Some(&[190u8, 230, 190][..]));
        assert_eq!(frame.group(2), Some(&[110u8, 190, 190][..]));
        assert_eq!(frame.group(3), Some(&[190u8, 190, 190][..]));
        assert_eq!(frame.group(4), None);
        assert_eq!(frame.led_byte(), 0xFF - 4);
    }

    #[test]
    fn test_wire_order_is_reversed() {
        let frame = Frame::assemble(&displays([1, 2, 3, 4]), &leds(), BlinkPhase::On).unwrap();
        let slots = frame.as_slots();
        let wire = frame.wire_bytes();

        assert_eq!(wire.len(), FRAME_LEN);
        for i in 0..FRAME_LEN {
            assert_eq!(wire[i], slots[FRAME_LEN - 1 - i]);
        }
        assert_eq!(wire[0], 0xFF);
        // Least significant digit of display 4 follows the LED byte
        assert_eq!(wire[1], 90);
    }

    #[test]
    fn test_assemble_rejects_out_of_range() {
        let result = Frame::assemble(&displays([1, 1001, 3, 4]), &leds(), BlinkPhase::On);
        assert_eq!(result, Err(RangeError::Integer(1001)));
    }
}
