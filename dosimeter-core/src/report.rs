use crate::fixed::Centi;
use crate::mode::Mode;
use nano_fmt::NanoWrite;
use progmem::write as uwrite;

/// One second's worth of results, produced when the tick flag fires.
#[derive(Clone, Copy)]
pub struct Report {
    /// Raw counts in the last one-second epoch.
    pub cps: u16,
    /// Reported counts per minute, per the active mode.
    pub cpm: u16,
    /// Dose rate in hundredths of a µSv/hr.
    pub dose: Centi,
    /// Averaging strategy behind `cpm`.
    pub mode: Mode,
}

impl Report {
    /// Write the CSV log line, e.g. `CPS, 18, CPM, 1080, uSv/hr, 6.15, FAST`.
    pub fn write_line<W: NanoWrite>(&self, w: &mut W) {
        uwrite!(
            &mut *w,
            "CPS, {}, CPM, {}, uSv/hr, {}, {}\r\n",
            self.cps,
            self.cpm,
            self.dose,
            self.mode
        );
    }
}

#[cfg(test)]
mod tests {
    use super::Report;
    use crate::fixed::Centi;
    use crate::mode::Mode;
    use nano_fmt::NanoWrite;
    use std::vec::Vec;

    struct Sink(Vec<u8>);

    impl NanoWrite for Sink {
        fn write_byte(&mut self, b: u8) {
            self.0.push(b);
        }
    }

    fn line(report: Report) -> std::string::String {
        let mut sink = Sink(Vec::new());
        report.write_line(&mut sink);
        std::string::String::from_utf8(sink.0).unwrap()
    }

    #[test]
    fn slow_line() {
        let report = Report {
            cps: 10,
            cpm: 600,
            dose: Centi::from_bits(342),
            mode: Mode::Slow,
        };
        assert_eq!(line(report), "CPS, 10, CPM, 600, uSv/hr, 3.42, SLOW\r\n");
    }

    #[test]
    fn instantaneous_line() {
        let report = Report {
            cps: 300,
            cpm: 18000,
            dose: Centi::from_bits(10260),
            mode: Mode::Instantaneous,
        };
        assert_eq!(
            line(report),
            "CPS, 300, CPM, 18000, uSv/hr, 102.60, INST\r\n"
        );
    }
}
