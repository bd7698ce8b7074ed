use nano_fmt::{NanoDisplay, NanoWrite};
use progmem::P;

/// Active averaging strategy behind the reported CPM.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
#[repr(u8)]
pub enum Mode {
    /// Long window average, stable but sluggish.
    Slow,
    /// Short window average, responsive but noisy.
    Fast,
    /// Direct `cps * 60` extrapolation when a sample overflowed the buffer.
    Instantaneous,
}

impl NanoDisplay for Mode {
    fn fmt<F: NanoWrite>(self, f: &mut F) {
        let label = match self {
            Mode::Slow => P!("SLOW"),
            Mode::Fast => P!("FAST"),
            Mode::Instantaneous => P!("INST"),
        };
        label.fmt(f);
    }
}

/// Pick the reporting mode and CPM, in strict priority order.
///
/// An overflowed sample always wins and extrapolates straight from the raw
/// `cps`; this deliberately ignores both windows, so the reported value can
/// jump sharply at the transition. Saturates at `u16::MAX` instead of
/// truncating.
pub fn select(cps: u16, fast_cpm: u16, slow_cpm: u16, overflow: bool, threshold: u16) -> (Mode, u16) {
    if overflow {
        let cpm = u16::try_from(u32::from(cps) * 60).unwrap_or(u16::MAX);
        (Mode::Instantaneous, cpm)
    } else if fast_cpm > threshold {
        (Mode::Fast, fast_cpm)
    } else {
        (Mode::Slow, slow_cpm)
    }
}

#[cfg(test)]
mod tests {
    use super::{select, Mode};

    #[test]
    fn overflow_takes_priority() {
        let (mode, cpm) = select(300, 5000, 100, true, 1000);
        assert_eq!(mode, Mode::Instantaneous);
        assert_eq!(cpm, 300 * 60);
    }

    #[test]
    fn instantaneous_cpm_saturates() {
        let (mode, cpm) = select(u16::MAX, 0, 0, true, 1000);
        assert_eq!(mode, Mode::Instantaneous);
        assert_eq!(cpm, u16::MAX);
    }

    #[test]
    fn fast_wins_above_threshold() {
        let (mode, cpm) = select(20, 1200, 700, false, 1000);
        assert_eq!(mode, Mode::Fast);
        assert_eq!(cpm, 1200);
    }

    #[test]
    fn threshold_is_exclusive() {
        let (mode, cpm) = select(16, 1000, 950, false, 1000);
        assert_eq!(mode, Mode::Slow);
        assert_eq!(cpm, 950);
    }
}
