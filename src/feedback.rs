use crate::beeper::Beeper;
use crate::clock::Delay;
use crate::hal::{
    port::{mode::Output, Pin, PB4},
    prelude::*,
};

/// How long the LED stays on per pulse; also bounds the piezo click.
const FLASH_MS: u8 = 10;

/// Visual and audible pulse annunciator: an LED flash with a piezo click
/// overlapping it.
pub struct Annunciator {
    led: Pin<Output, PB4>,
    beeper: Beeper,
}

impl Annunciator {
    pub fn new(led: Pin<Output, PB4>, beeper: Beeper) -> Self {
        Self { led, beeper }
    }

    /// Flash the LED for about 10 ms and click the piezo unless muted.
    ///
    /// The caller gates this on the pending-event marker, so repeated calls
    /// while no new pulse is pending have no effect beyond this one bounded
    /// indication.
    pub fn signal_event(&mut self, muted: bool) {
        self.led.set_high();

        if !muted {
            self.beeper.turn_on();
        }

        // A short delay gives a nice flash and a 'click' on the piezo.
        Delay::new().delay_ms(FLASH_MS);

        self.led.set_low();
        self.beeper.turn_off();
    }
}
