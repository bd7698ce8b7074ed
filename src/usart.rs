use nano_fmt::NanoWrite;

use crate::clock::BoardClock;
use crate::hal;
use hal::port::{self, PD0, PD1};

type Baudrate = avr_hal_generic::usart::Baudrate<BoardClock>;

/// Transmit-side wrapper around the USART, used for the 1 Hz report line.
/// Framing is 8-N-1.
pub struct Usart0 {
    p: hal::pac::USART,
}

impl Usart0 {
    /// Take ownership of the peripheral and both serial pins.
    #[must_use]
    pub fn new<IMODE: port::mode::InputMode>(
        p: hal::pac::USART,
        _rx: port::Pin<port::mode::Input<IMODE>, PD0>,
        _tx: port::Pin<port::mode::Output, PD1>,
        baudrate: u32,
    ) -> Self {
        let baudrate = Baudrate::new(baudrate);
        p.ubrrh.write(|w| w.bits((baudrate.ubrr >> 8) as u8));
        p.ubrrl.write(|w| w.bits((baudrate.ubrr & 0xFF) as u8));
        p.ucsra.write(|w| w.u2x().bit(baudrate.u2x));

        // Enable receiver and transmitter.
        p.ucsrb.write(|w| w.txen().set_bit().rxen().set_bit());

        Self { p }
    }
}

impl NanoWrite for Usart0 {
    fn write_byte(&mut self, b: u8) {
        // Busy wait for the transmit buffer to drain.
        while self.p.ucsra.read().udre().bit_is_clear() {}

        self.p.udr.write(|w| w.bits(b));
    }
}
