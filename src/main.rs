#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use avr_device::interrupt::{self, CriticalSection, Mutex};
use core::{cell::UnsafeCell, mem::MaybeUninit};
use panic_halt as _;

use dosimeter::{
    beeper::Beeper,
    clock::Delay,
    display::Lcd,
    feedback::Annunciator,
    hal,
    timer::TickTimer,
    usart::Usart0,
};
use dosimeter_core::Acquisition;
use progmem::write as uwrite;

use hal::{
    pac::EXINT,
    port::{
        mode::{Input, PullUp},
        Pin, PD3,
    },
    prelude::*,
};

/// UART baud rate.
const BAUDRATE: u32 = 9600;

/// Button settle time for contact bounce rejection (milliseconds).
///
/// A tube pulse latched while this runs is serviced right after the handler
/// returns, so its attribution to the current epoch can lag by up to this
/// much. Accepted bound, interrupts share one priority level.
const DEBOUNCE_SETTLE_MS: u8 = 25;

/// All state shared between the interrupt handlers and the foreground loop.
///
/// Every access goes through a critical section; the methods on
/// [`Acquisition`] are bounded integer work, so the sections stay short.
static SHARED: Mutex<UnsafeCell<Acquisition>> = Mutex::new(UnsafeCell::new(Acquisition::new()));

// Initialized once in main before interrupts are enabled, then used
// exclusively by the INT1 handler.
static mut BUTTON: MaybeUninit<Pin<Input<PullUp>, PD3>> = MaybeUninit::uninit();
static mut SHARED_EXINT: MaybeUninit<EXINT> = MaybeUninit::uninit();

fn delay_ms(ms: u8) {
    Delay::new().delay_ms(ms)
}

/// Pin change interrupt for pin INT0.
/// This interrupt is called on the falling edge of a GM pulse.
///
/// Keep it O(1) and free of blocking: it preempts everything else, including
/// the periodic tick.
#[avr_device::interrupt(attiny2313)]
fn INT0() {
    // SAFETY: We are inside a blocking interrupt.
    let cs = unsafe { CriticalSection::new() };

    let acq = unsafe { SHARED.borrow(cs).get().as_mut().unwrap() };
    acq.record_pulse();
}

/// Pin change interrupt for pin INT1 (pushbutton).
///
/// Switch bounce would make this execute multiple times if we were not
/// careful: wait out the bounce, re-sample the line and toggle the mute flag
/// only if the button is still pressed.
#[avr_device::interrupt(attiny2313)]
fn INT1() {
    // SAFETY: We are inside a blocking interrupt.
    let cs = unsafe { CriticalSection::new() };

    delay_ms(DEBOUNCE_SETTLE_MS);

    // Is the button still pressed? (Pull-up input, active low.)
    let button = unsafe { (*&raw const BUTTON).assume_init_ref() };
    if button.is_low() {
        let acq = unsafe { SHARED.borrow(cs).get().as_mut().unwrap() };
        acq.toggle_mute();
    }

    // Clear the edge latch accumulated while we waited, so bounce does not
    // re-enter the handler.
    let exint = unsafe { (*&raw mut SHARED_EXINT).assume_init_mut() };
    exint.eifr.write(|w| w.intf().bits(0b10));
}

/// TIMER1 compare interrupt.
/// This interrupt is called every time TCNT1 reaches OCR1A and is reset back
/// to 0 (CTC mode); TIMER1 is set up so this happens once a second.
///
/// Closes the one-second epoch: snapshots and resets the pulse count, then
/// folds the clamped sample into both averaging windows.
#[avr_device::interrupt(attiny2313)]
fn TIMER1_COMPA() {
    // SAFETY: We are inside a blocking interrupt.
    let cs = unsafe { CriticalSection::new() };

    let acq = unsafe { SHARED.borrow(cs).get().as_mut().unwrap() };
    acq.tick();
}

/// Consume the pending-event marker and drive the annunciator.
fn service_feedback(annunciator: &mut Annunciator) {
    let (event, muted) = interrupt::free(|cs| {
        let acq = unsafe { SHARED.borrow(cs).get().as_mut().unwrap() };
        acq.take_event()
    });

    if event {
        annunciator.signal_event(muted);
    }
}

/// Once per second: pull the report and hand it to both sinks.
fn publish_report(serial: &mut Usart0, lcd: &mut Lcd) {
    let report = interrupt::free(|cs| {
        let acq = unsafe { SHARED.borrow(cs).get().as_mut().unwrap() };
        acq.take_report()
    });

    if let Some(report) = report {
        report.write_line(serial);
        lcd.render_report(&report);
    }
}

#[hal::entry]
fn main() -> ! {
    let dp = hal::Peripherals::take().unwrap();
    let pins = hal::pins!(dp);

    let mut serial = Usart0::new(
        dp.USART,
        pins.pd0.into_pull_up_input(),
        pins.pd1.into_output(),
        BAUDRATE,
    );

    uwrite!(&mut serial, "geiger dosimeter\r\n");

    let mut annunciator = Annunciator::new(
        pins.pb4.into_output(),
        Beeper::new(pins.pb2.into_output(), dp.TC0),
    );

    let mut lcd = Lcd::new(
        pins.pb7.into_output(),
        pins.pb6.into_output(),
        pins.pb5.into_output(),
        pins.pb0.into_output(),
        pins.pb1.into_output(),
    );

    // Enable the internal pull up resistor on the pin connected to the
    // button.
    let button = pins.pd3.into_pull_up_input();

    // Set up external interrupts: INT0 is triggered by a GM impulse, INT1 by
    // pushing the button, both on the falling edge.
    dp.CPU
        .mcucr
        .modify(|_, w| w.isc0().falling().isc1().val_0x01());
    dp.EXINT.gimsk.modify(|_, w| w.int().bits(0b11));

    // 1 Hz acquisition clock.
    let _tick = TickTimer::new(dp.TC1);

    let exint = dp.EXINT;

    unsafe {
        // SAFETY: Shared peripherals are initialized exclusively here, before
        // interrupts are enabled.
        (*&raw mut BUTTON).write(button);
        (*&raw mut SHARED_EXINT).write(exint);
    }

    unsafe {
        // SAFETY: Not inside a critical section and any non-atomic operations
        // have been completed at this point.
        avr_device::interrupt::enable();
    }

    loop {
        // Set sleep mode to IDLE and enable sleep.
        dp.CPU.mcucr.modify(|_, w| w.sm().idle().se().set_bit());
        // Go to sleep until the next interrupt.
        avr_device::asm::sleep();
        // Disable sleep so we don't accidentally go back to sleep.
        dp.CPU.mcucr.modify(|_, w| w.se().clear_bit());

        service_feedback(&mut annunciator);
        publish_report(&mut serial, &mut lcd);
        service_feedback(&mut annunciator);
    }
}
