//! Minimal formatting support for targets where `core::fmt` is too heavy.
//!
//! Values format themselves byte by byte into a [`NanoWrite`] sink; there is
//! no padding, no width and no error path.

#![no_std]

#[cfg(test)]
extern crate std;

/// Writer trait for resource constrained systems.
pub trait NanoWrite {
    /// Write a byte to the writer.
    fn write_byte(&mut self, b: u8);
}

/// Display trait for resource constrained systems.
pub trait NanoDisplay {
    /// Write formatted representation of `self` to `f`.
    fn fmt<F: NanoWrite>(self, f: &mut F);
}

/// Implement NanoDisplay for an unsigned type.
///
/// Digits are produced most significant first by repeated division with a
/// descending power of ten, skipping leading zeros.
macro_rules! display_unsigned {
    ($ty:ident) => {
        impl $crate::NanoDisplay for $ty {
            fn fmt<F: $crate::NanoWrite>(mut self, f: &mut F) {
                const MAX_POW10: $ty = <$ty>::pow(10, $ty::MAX.ilog10() as u32);

                let mut div = MAX_POW10;
                let mut print = false;

                while div > 0 {
                    let dig = (self / div) as u8;
                    self %= div;
                    div /= 10;

                    if !print && dig > 0 {
                        print = true;
                    }

                    if print || (div == 0) {
                        f.write_byte(b'0' + dig);
                    }
                }
            }
        }
    };
}

display_unsigned!(u8);
display_unsigned!(u16);
display_unsigned!(u32);
display_unsigned!(u64);
display_unsigned!(usize);

#[cfg(test)]
mod tests {
    use super::{NanoDisplay, NanoWrite};
    use std::string::String;
    use std::vec::Vec;

    struct Sink(Vec<u8>);

    impl NanoWrite for Sink {
        fn write_byte(&mut self, b: u8) {
            self.0.push(b);
        }
    }

    fn render<T: NanoDisplay>(value: T) -> String {
        let mut sink = Sink(Vec::new());
        value.fmt(&mut sink);
        String::from_utf8(sink.0).unwrap()
    }

    #[test]
    fn zero_prints_one_digit() {
        assert_eq!(render(0u8), "0");
        assert_eq!(render(0u32), "0");
    }

    #[test]
    fn no_leading_zeros() {
        assert_eq!(render(7u16), "7");
        assert_eq!(render(1080u16), "1080");
        assert_eq!(render(10000u32), "10000");
    }

    #[test]
    fn max_values() {
        assert_eq!(render(u8::MAX), "255");
        assert_eq!(render(u16::MAX), "65535");
        assert_eq!(render(u32::MAX), "4294967295");
    }
}
