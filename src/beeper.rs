use crate::hal;
use hal::{
    pac::TC0,
    port::{mode::Output, Pin, PB2},
};

/// Half period of the piezo tone in timer counts of 1 us each: 320 us
/// period, about 3.1 kHz.
const TONE_HALF_PERIOD: u8 = 160;

/// Fixed-pitch tone generator on `TC0`, output on the piezo pin.
pub struct Beeper {
    timer: TC0,
}

impl Beeper {
    #[must_use]
    pub fn new(_pin: Pin<Output, PB2>, timer: TC0) -> Self {
        // Toggle OC0A (pin PB2) on compare match, CTC mode.
        timer
            .tccr0a
            .write(|w| w.com0a().match_toggle().wgm0().ctc());
        // Stop TIMER0 (no sound).
        timer.tccr0b.reset();

        Self { timer }
    }

    /// Turns on the beeper.
    pub fn turn_on(&mut self) {
        // Enable OCR0A output on pin PB2.
        self.timer.tccr0a.modify(|_, w| w.com0a().match_toggle());
        // Prescaler clk/8 (1 MHz), 1 us per count.
        self.timer.tccr0b.modify(|_, w| w.cs0().prescale_8());
        self.timer.ocr0a.write(|w| unsafe { w.bits(TONE_HALF_PERIOD) });
    }

    /// Turns off the beeper.
    pub fn turn_off(&mut self) {
        // Disable TIMER0 since we're no longer using it.
        self.timer.tccr0b.reset();
        // Disconnect OCR0A from TIMER0, this avoids occasional HVPS whine
        // after the beep.
        self.timer.tccr0a.modify(|_, w| w.com0a().disconnected());
    }
}
