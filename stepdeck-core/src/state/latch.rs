//! Hold latch group
//!
//! Rotary buttons 1-3 each toggle a sticky "hold" latch marking their
//! display's countdown as running. The latches are mutually exclusive: the
//! group stores at most one active member, so two active latches cannot be
//! represented.

use super::events::RotaryChannel;

/// Member of the latch group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LatchId {
    Hold1,
    Hold2,
    Hold3,
}

impl LatchId {
    /// All members in display order
    pub const ALL: [LatchId; 3] = [LatchId::Hold1, LatchId::Hold2, LatchId::Hold3];

    /// Latch owned by a rotary button, if any
    pub const fn for_channel(channel: RotaryChannel) -> Option<Self> {
        match channel {
            RotaryChannel::One => Some(LatchId::Hold1),
            RotaryChannel::Two => Some(LatchId::Hold2),
            RotaryChannel::Three => Some(LatchId::Hold3),
            RotaryChannel::Four => None,
        }
    }

    /// Index of the display counted down by this latch
    pub const fn display_index(self) -> usize {
        match self {
            LatchId::Hold1 => 0,
            LatchId::Hold2 => 1,
            LatchId::Hold3 => 2,
        }
    }
}

/// Result of pressing a latch button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LatchTransition {
    /// Inactive latch switched on
    Activated(LatchId),
    /// Active latch switched off
    Deactivated(LatchId),
    /// Press refused because another member holds the group
    Rejected {
        /// Latch whose button was pressed
        pressed: LatchId,
        /// Latch currently active
        holder: LatchId,
    },
}

/// Mutually exclusive hold latches with per-latch countdown enable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LatchGroup {
    active: Option<LatchId>,
    countdown: [bool; 3],
}

impl Default for LatchGroup {
    fn default() -> Self {
        Self::new([true; 3])
    }
}

impl LatchGroup {
    /// Create an inactive group
    pub const fn new(countdown: [bool; 3]) -> Self {
        Self {
            active: None,
            countdown,
        }
    }

    /// Handle a press of the button owning `latch`
    ///
    /// Switching the active latch off always succeeds; switching one on only
    /// succeeds while the whole group is inactive. A rejected press leaves
    /// the group untouched.
    pub fn press(&mut self, latch: LatchId) -> LatchTransition {
        match self.active {
            Some(holder) if holder == latch => {
                self.active = None;
                LatchTransition::Deactivated(latch)
            }
            Some(holder) => LatchTransition::Rejected {
                pressed: latch,
                holder,
            },
            None => {
                self.active = Some(latch);
                LatchTransition::Activated(latch)
            }
        }
    }

    /// Clear `latch` if it is the active member
    ///
    /// Returns true if the latch was cleared.
    pub fn release(&mut self, latch: LatchId) -> bool {
        if self.active == Some(latch) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Currently active member
    pub fn active(&self) -> Option<LatchId> {
        self.active
    }

    /// Check if a given member is active
    pub fn is_active(&self, latch: LatchId) -> bool {
        self.active == Some(latch)
    }

    /// Check if any member is active (the motion gate)
    pub fn any_active(&self) -> bool {
        self.active.is_some()
    }

    /// Check if `latch` counts its display down while active
    pub fn countdown_enabled(&self, latch: LatchId) -> bool {
        self.countdown[latch.display_index()]
    }

    /// Active member that should be counted down, if any
    pub fn counting(&self) -> Option<LatchId> {
        self.active.filter(|&latch| self.countdown_enabled(latch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_inactive() {
        let group = LatchGroup::default();
        assert_eq!(group.active(), None);
        assert!(!group.any_active());
    }

    #[test]
    fn test_toggle() {
        let mut group = LatchGroup::default();
        assert_eq!(group.press(LatchId::Hold2), LatchTransition::Activated(LatchId::Hold2));
        assert!(group.is_active(LatchId::Hold2));

        assert_eq!(group.press(LatchId::Hold2), LatchTransition::Deactivated(LatchId::Hold2));
        assert!(!group.any_active());
    }

    #[test]
    fn test_press_rejected_while_other_active() {
        let mut group = LatchGroup::default();
        group.press(LatchId::Hold1);

        let before = group;
        assert_eq!(
            group.press(LatchId::Hold3),
            LatchTransition::Rejected {
                pressed: LatchId::Hold3,
                holder: LatchId::Hold1,
            }
        );
        assert_eq!(group, before);
    }

    #[test]
    fn test_release_only_clears_holder() {
        let mut group = LatchGroup::default();
        group.press(LatchId::Hold1);

        assert!(!group.release(LatchId::Hold2));
        assert!(group.is_active(LatchId::Hold1));
        assert!(group.release(LatchId::Hold1));
        assert!(!group.any_active());
    }

    #[test]
    fn test_countdown_flags() {
        let mut group = LatchGroup::new([true, false, true]);
        group.press(LatchId::Hold2);
        assert!(group.any_active());
        assert_eq!(group.counting(), None);

        group.press(LatchId::Hold2);
        group.press(LatchId::Hold3);
        assert_eq!(group.counting(), Some(LatchId::Hold3));
    }

    #[test]
    fn test_channel_mapping() {
        assert_eq!(LatchId::for_channel(RotaryChannel::One), Some(LatchId::Hold1));
        assert_eq!(LatchId::for_channel(RotaryChannel::Four), None);
        assert_eq!(LatchId::Hold3.display_index(), 2);
    }
}
