use crate::hal;

pub use hal::clock::Clock;

/// Board crystal rate.
pub type BoardClock = hal::clock::MHz8;

/// Busy-wait delay timed against the board clock.
pub type Delay = hal::delay::Delay<BoardClock>;
