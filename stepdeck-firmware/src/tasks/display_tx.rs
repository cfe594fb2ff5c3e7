//! Display transmit task
//!
//! Sole owner of the shift-register chain. Frames are sent one at a time, so
//! shifting and latching a frame is never interleaved with another.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};

use stepdeck_core::traits::FrameTransport;
use stepdeck_drivers::ShiftRegisterChain;

use crate::channels::FRAME_READY;

/// Display chain on SPI0 with the latch on a GPIO
pub type DisplayChain = ShiftRegisterChain<Spi<'static, SPI0, Blocking>, Output<'static>>;

/// Display TX task - sends the latest frame to the chain
#[embassy_executor::task]
pub async fn display_tx_task(mut chain: DisplayChain) {
    info!("Display TX task started");

    loop {
        let frame = FRAME_READY.wait().await;

        if let Err(e) = chain.send(&frame) {
            warn!("Failed to send frame: {}", e);
        } else {
            trace!("Frame sent");
        }
    }
}
