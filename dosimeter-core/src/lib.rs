//! Acquisition engine for a Geiger-Müller dose-rate monitor.
//!
//! Everything in this crate is integer-only, allocation-free and independent
//! of the target hardware: the saturating pulse counter, the dual-window
//! averager over one-second samples, the mode selector and the report record.
//! The firmware crate wraps [`Acquisition`] in a critical-section protected
//! cell and drives it from its interrupt handlers.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod acquisition;
pub mod config;
pub mod fixed;
pub mod mode;
pub mod report;
pub mod ring_buffer;
pub mod window;

pub use acquisition::Acquisition;
pub use mode::Mode;
pub use report::Report;
