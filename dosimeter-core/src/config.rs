//! Compile-time configuration. There is no runtime reconfiguration surface.

/// CPM threshold above which the fast (short window) average is reported.
pub const THRESHOLD_CPM: u16 = 1000;

/// Number of one-second samples kept for the slow average.
pub const LONG_PERIOD: usize = 30;

/// Number of one-second samples backing the fast average.
pub const SHORT_PERIOD: usize = 5;

/// CPM to µSv/hr conversion factor, scaled by 10000 to avoid floats.
///
/// The value is folklore collected for SBM-20 style tubes and is not a
/// calibrated quantity.
pub const DOSE_SCALE_FACTOR: u32 = 57;

/// Acquisition tick rate in Hz. The averager assumes one sample per second.
pub const TICK_HZ: u32 = 1;
