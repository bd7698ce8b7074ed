use nano_fmt::{NanoDisplay, NanoWrite};

/// Fixed point value with 2 implied decimal digits.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
pub struct Centi(u16);

impl Centi {
    /// Construct from a value pre-scaled by 100.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// The raw pre-scaled value.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }
}

impl NanoDisplay for Centi {
    fn fmt<F: NanoWrite>(self, f: &mut F) {
        let fract = (self.0 % 100) as u8;
        let integer = self.0 / 100;

        integer.fmt(f);

        f.write_byte(b'.');

        if fract < 10 {
            f.write_byte(b'0');
        }
        fract.fmt(f);
    }
}

#[cfg(test)]
mod tests {
    use super::Centi;
    use nano_fmt::{NanoDisplay, NanoWrite};
    use std::vec::Vec;

    struct Sink(Vec<u8>);

    impl NanoWrite for Sink {
        fn write_byte(&mut self, b: u8) {
            self.0.push(b);
        }
    }

    fn render(value: Centi) -> std::string::String {
        let mut sink = Sink(Vec::new());
        value.fmt(&mut sink);
        std::string::String::from_utf8(sink.0).unwrap()
    }

    #[test]
    fn zero() {
        assert_eq!(render(Centi::from_bits(0)), "0.00");
    }

    #[test]
    fn fraction_is_zero_padded() {
        assert_eq!(render(Centi::from_bits(7)), "0.07");
        assert_eq!(render(Centi::from_bits(57)), "0.57");
    }

    #[test]
    fn integer_and_fraction() {
        assert_eq!(render(Centi::from_bits(342)), "3.42");
        assert_eq!(render(Centi::from_bits(10260)), "102.60");
    }
}
