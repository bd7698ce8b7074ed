use core::mem;

use crate::config::{DOSE_SCALE_FACTOR, LONG_PERIOD, SHORT_PERIOD, THRESHOLD_CPM};
use crate::fixed::Centi;
use crate::mode::{self, Mode};
use crate::report::Report;
use crate::window::DualWindow;

/// Complete acquisition state shared between the interrupt handlers and the
/// foreground loop.
///
/// Single writer per field:
/// - the pulse handler calls [`record_pulse`](Self::record_pulse),
/// - the 1 Hz tick handler calls [`tick`](Self::tick),
/// - the button handler calls [`toggle_mute`](Self::toggle_mute),
/// - the foreground loop only consumes, through
///   [`take_event`](Self::take_event) and [`take_report`](Self::take_report).
///
/// Every access must happen inside a critical section; the methods themselves
/// are bounded integer work, so the section stays short.
pub struct Acquisition {
    /// Pulses in the current one-second epoch. Saturates, never wraps.
    count: u16,
    /// Snapshot of `count` taken by the last tick.
    cps: u16,
    window: DualWindow<LONG_PERIOD, SHORT_PERIOD>,
    /// Set when a one-second sample exceeded the 8-bit sample range.
    overflow: bool,
    /// Set by the pulse handler, consumed by the foreground feedback pass.
    event_pending: bool,
    /// Set by the tick handler, consumed by the foreground report pass.
    tick: bool,
    muted: bool,
}

impl Acquisition {
    pub const fn new() -> Self {
        Self {
            count: 0,
            cps: 0,
            window: DualWindow::new(),
            overflow: false,
            event_pending: false,
            tick: false,
            muted: false,
        }
    }

    /// Account one tube pulse. Called on every pulse edge, so this must stay
    /// O(1) and free of blocking.
    pub fn record_pulse(&mut self) {
        self.count = self.count.saturating_add(1);
        self.event_pending = true;
    }

    /// Close the current one-second epoch. Called once a second from the tick
    /// handler.
    ///
    /// Snapshots and resets the pulse count, clamps the sample to the 8-bit
    /// buffer range (raising the overflow flag on clamp), folds it into both
    /// windows and raises the tick flag.
    pub fn tick(&mut self) {
        let snapshot = mem::replace(&mut self.count, 0);
        self.cps = snapshot;

        let sample = u8::try_from(snapshot).unwrap_or_else(|_| {
            self.overflow = true;
            u8::MAX
        });
        self.window.record(sample);

        self.tick = true;
    }

    /// Toggle the beeper mute flag.
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Consume the pending-event marker. Returns whether feedback is due and
    /// whether it should stay silent. Idempotent until the next pulse.
    pub fn take_event(&mut self) -> (bool, bool) {
        (mem::replace(&mut self.event_pending, false), self.muted)
    }

    /// Consume one report if a tick has elapsed since the last call.
    ///
    /// Clears the tick flag, and the overflow flag along with it: when set,
    /// the overflow dictated this report's mode, so it must not leak into the
    /// next one.
    pub fn take_report(&mut self) -> Option<Report> {
        if !mem::replace(&mut self.tick, false) {
            return None;
        }

        let overflow = mem::replace(&mut self.overflow, false);
        let (mode, cpm) = mode::select(
            self.cps,
            self.window.fast_cpm(),
            self.window.slow_cpm(),
            overflow,
            THRESHOLD_CPM,
        );

        // Fits: 65535 * 57 / 100 < u16::MAX.
        let dose = Centi::from_bits((u32::from(cpm) * DOSE_SCALE_FACTOR / 100) as u16);

        Some(Report {
            cps: self.cps,
            cpm,
            dose,
            mode,
        })
    }
}
