//! Frame transport trait
//!
//! Abstracts over whatever moves a [`Frame`] onto the display hardware. The
//! panel uses a shift-register chain, host tests use a recorder.

use stepdeck_protocol::Frame;

/// Trait for frame transports
///
/// One call to [`send`](FrameTransport::send) transfers the whole frame and
/// commits it, so the displays never show a partially shifted frame.
/// Implementations are owned by a single task; the trait takes `&mut self`
/// to keep two frames from interleaving.
pub trait FrameTransport {
    /// Transport error
    type Error;

    /// Shift out a frame and latch it
    fn send(&mut self, frame: &Frame) -> Result<(), Self::Error>;

    /// Send the fail-safe blank frame
    fn clear(&mut self) -> Result<(), Self::Error> {
        self.send(&Frame::blank())
    }
}
