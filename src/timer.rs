use crate::clock::{BoardClock, Clock};
use crate::hal;

/// One-second acquisition clock on the `TC1` peripheral.
///
/// Fires `TIMER1_COMPA` once per second, accurate to crystal tolerance. The
/// counter is reset in hardware on compare match (CTC mode) and does not
/// re-arm the interrupt until the handler returns, so the tick handler never
/// nests with itself.
pub struct TickTimer;

impl TickTimer {
    /// Configure `TC1` for 1 Hz compare interrupts and start it.
    pub fn new(p: hal::pac::TC1) -> Self {
        // Prescaler 256 gives 32 us per count at 8 MHz; counting to
        // FREQ / 256 spans exactly one second.
        let top = (BoardClock::FREQ / 256) as u16;

        p.tccr1b.write(|w| w.wgm1().bits(0b01).cs1().prescale_256());
        p.ocr1a.write(|w| w.bits(top));
        // Compare match A interrupt enable.
        p.timsk.write(|w| w.ocie1a().set_bit());

        Self
    }
}
