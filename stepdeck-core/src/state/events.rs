//! Input identifiers delivered by the debounce and rotary collaborators

/// One of the four rotary encoders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RotaryChannel {
    One,
    Two,
    Three,
    Four,
}

impl RotaryChannel {
    /// All channels in display order
    pub const ALL: [RotaryChannel; 4] = [
        RotaryChannel::One,
        RotaryChannel::Two,
        RotaryChannel::Three,
        RotaryChannel::Four,
    ];

    /// Zero-based index, equal to the index of the display it controls
    pub const fn index(self) -> usize {
        match self {
            RotaryChannel::One => 0,
            RotaryChannel::Two => 1,
            RotaryChannel::Three => 2,
            RotaryChannel::Four => 3,
        }
    }
}

/// Physical buttons on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Push-button integrated in a rotary encoder
    Rotary(RotaryChannel),
    /// Illuminated button 1: low step rate
    SpeedLow,
    /// Illuminated button 2: high step rate
    SpeedHigh,
    /// Illuminated button 3: label action (reserved)
    Label,
    /// Illuminated button 4: load display defaults
    LoadDefaults,
}

// Tags delivered by the debounce tasks
pub const TAG_ROTARY_1: &str = "rotary_1_button";
pub const TAG_ROTARY_2: &str = "rotary_2_button";
pub const TAG_ROTARY_3: &str = "rotary_3_button";
pub const TAG_ROTARY_4: &str = "rotary_4_button";
pub const TAG_BUTTON_1: &str = "button1";
pub const TAG_BUTTON_2: &str = "button2";
pub const TAG_BUTTON_3: &str = "button3";
pub const TAG_BUTTON_4: &str = "button4";

impl Button {
    /// All buttons, rotary buttons first
    pub const ALL: [Button; 8] = [
        Button::Rotary(RotaryChannel::One),
        Button::Rotary(RotaryChannel::Two),
        Button::Rotary(RotaryChannel::Three),
        Button::Rotary(RotaryChannel::Four),
        Button::SpeedLow,
        Button::SpeedHigh,
        Button::Label,
        Button::LoadDefaults,
    ];

    /// Parse a button from its debounce tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            TAG_ROTARY_1 => Some(Button::Rotary(RotaryChannel::One)),
            TAG_ROTARY_2 => Some(Button::Rotary(RotaryChannel::Two)),
            TAG_ROTARY_3 => Some(Button::Rotary(RotaryChannel::Three)),
            TAG_ROTARY_4 => Some(Button::Rotary(RotaryChannel::Four)),
            TAG_BUTTON_1 => Some(Button::SpeedLow),
            TAG_BUTTON_2 => Some(Button::SpeedHigh),
            TAG_BUTTON_3 => Some(Button::Label),
            TAG_BUTTON_4 => Some(Button::LoadDefaults),
            _ => None,
        }
    }

    /// Debounce tag for this button
    pub fn tag(self) -> &'static str {
        match self {
            Button::Rotary(RotaryChannel::One) => TAG_ROTARY_1,
            Button::Rotary(RotaryChannel::Two) => TAG_ROTARY_2,
            Button::Rotary(RotaryChannel::Three) => TAG_ROTARY_3,
            Button::Rotary(RotaryChannel::Four) => TAG_ROTARY_4,
            Button::SpeedLow => TAG_BUTTON_1,
            Button::SpeedHigh => TAG_BUTTON_2,
            Button::Label => TAG_BUTTON_3,
            Button::LoadDefaults => TAG_BUTTON_4,
        }
    }
}
