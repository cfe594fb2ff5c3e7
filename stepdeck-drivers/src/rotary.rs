//! Quadrature decoder for the rotary encoders
//!
//! Decodes the A/B signals into detents with a small state machine that
//! rejects contact bounce: a detent is only reported once the pins have
//! travelled the whole way to the next rest position.
//!
//! Quadrature encoding (A leads B when turning up):
//!
//! ```text
//! Full step, rest at (1,1):
//!   up:   (1,1) -> (0,1) -> (0,0) -> (1,0) -> (1,1)  => +1
//!   down: (1,1) -> (1,0) -> (0,0) -> (0,1) -> (1,1)  => -1
//!
//! Half step, rest at (1,1) and (0,0):
//!   up:   (1,1) -> (0,1) -> (0,0)  => +1,  (0,0) -> (1,0) -> (1,1)  => +1
//!   down: (1,1) -> (1,0) -> (0,0)  => -1,  (0,0) -> (0,1) -> (1,1)  => -1
//! ```
//!
//! The console encoders click at both rest positions and use half step.

/// Detents per quadrature cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepMode {
    /// One detent per cycle
    Full,
    /// Two detents per cycle
    #[default]
    Half,
}

/// Decoder state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Both pins at the rest level
    Idle,
    /// One pin left the rest level, direction known
    Leaving(i8),
    /// Both pins passed the opposite level (full step only)
    Crossed(i8),
}

/// Quadrature decoder
#[derive(Debug, Clone, Copy)]
pub struct QuadratureDecoder {
    mode: StepMode,
    /// Pin level of the last detent
    rest: bool,
    state: State,
}

impl QuadratureDecoder {
    /// Create a decoder from the current pin levels
    pub fn new(mode: StepMode, a: bool, b: bool) -> Self {
        Self {
            mode,
            rest: if a == b { a } else { true },
            state: State::Idle,
        }
    }

    /// Feed new pin levels
    ///
    /// Returns `+1` or `-1` when a detent completes, 0 otherwise.
    pub fn update(&mut self, a: bool, b: bool) -> i8 {
        if a != b {
            if self.state == State::Idle {
                // The pin that moved first gives the direction
                let dir = if a != self.rest { 1 } else { -1 };
                self.state = State::Leaving(dir);
            }
            return 0;
        }

        if a == self.rest {
            // Back at the detent: a full cycle or a bounce
            let out = match self.state {
                State::Crossed(dir) => dir,
                _ => 0,
            };
            self.state = State::Idle;
            return out;
        }

        match self.mode {
            StepMode::Half => {
                let out = match self.state {
                    State::Leaving(dir) | State::Crossed(dir) => dir,
                    State::Idle => 0,
                };
                self.rest = a;
                self.state = State::Idle;
                out
            }
            StepMode::Full => {
                if let State::Leaving(dir) = self.state {
                    self.state = State::Crossed(dir);
                }
                0
            }
        }
    }
}
