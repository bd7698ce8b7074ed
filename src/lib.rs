//! Hardware-facing half of the Geiger counter firmware for the ATtiny2313.
//!
//! The measurement logic lives in `dosimeter-core`; these modules only wrap
//! the board: serial port, 1 Hz tick timer, piezo/LED annunciator and the
//! bit-banged PCD8544 panel.

#![no_std]

pub mod beeper;
pub mod clock;
pub mod display;
pub mod feedback;
pub mod font;
pub mod timer;
pub mod usart;

pub use attiny_hal as hal;
