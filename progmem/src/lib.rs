//! Data placed in AVR program memory and read back with `lpm`.
//!
//! On non-AVR hosts (tests) the same types fall back to plain memory reads.

#![no_std]
#![feature(asm_experimental_arch)]

#[cfg(test)]
extern crate std;

#[cfg(target_arch = "avr")]
use core::arch::asm;

use cfg_if::cfg_if;
use nano_fmt::{NanoDisplay, NanoWrite};
pub use nano_fmt_macro::{write, P};

/// C-style string stored in program memory.
/// It is only suitable for formatted output.
#[derive(Clone, Copy)]
pub struct PStr(*const u8);

impl PStr {
    /// # Safety
    ///
    /// `ptr` must point to a nul-terminated byte string which, on AVR, lives
    /// in program memory (a static carrying `link_section = ".progmem.data"`).
    pub const unsafe fn new(ptr: *const u8) -> Self {
        Self(ptr)
    }
}

impl NanoDisplay for PStr {
    fn fmt<F: NanoWrite>(self, f: &mut F) {
        let mut p = self.0;

        loop {
            let b: u8;

            unsafe {
                cfg_if! {
                    if #[cfg(target_arch = "avr")] {
                        asm! {
                            "lpm {b}, Z+",
                            b = out(reg) b,
                            inout("Z") p,
                            // Technically, this does access program memory, but it should
                            // not in any way influence the program.
                            options(pure, nomem, preserves_flags, nostack),
                        };
                    } else {
                        b = *p;
                        p = p.add(1);
                    }
                }
            }

            if b == 0 {
                break;
            }

            f.write_byte(b);
        }
    }
}

/// Table of `N` 16-bit words stored in program memory.
///
/// Used for packed glyph columns; words are stored little endian, matching
/// what the compiler emits for a `[u16; N]` static on AVR.
#[derive(Clone, Copy)]
pub struct PWords<const N: usize>(*const u16);

impl<const N: usize> PWords<N> {
    /// # Safety
    ///
    /// `ptr` must point to `N` words which, on AVR, live in program memory.
    pub const unsafe fn new(ptr: *const u16) -> Self {
        Self(ptr)
    }

    /// Read the word at `index`. Panics on an out of range index.
    pub fn get(self, index: usize) -> u16 {
        assert!(index < N);

        let p = self.0.wrapping_add(index) as *const u8;
        let lo: u8;
        let hi: u8;

        unsafe {
            cfg_if! {
                if #[cfg(target_arch = "avr")] {
                    asm! {
                        "lpm {lo}, Z+",
                        "lpm {hi}, Z",
                        lo = out(reg) lo,
                        hi = out(reg) hi,
                        inout("Z") p => _,
                        options(pure, nomem, preserves_flags, nostack),
                    };
                } else {
                    lo = *p;
                    hi = *p.add(1);
                }
            }
        }

        u16::from_le_bytes([lo, hi])
    }
}

#[cfg(test)]
mod tests {
    use super::{PStr, PWords};
    use nano_fmt::{NanoDisplay, NanoWrite};
    use std::vec::Vec;

    struct Sink(Vec<u8>);

    impl NanoWrite for Sink {
        fn write_byte(&mut self, b: u8) {
            self.0.push(b);
        }
    }

    #[test]
    fn pstr_stops_at_nul() {
        static S: [u8; 5] = *b"INST\0";
        let s = unsafe { PStr::new(S.as_ptr()) };

        let mut sink = Sink(Vec::new());
        s.fmt(&mut sink);
        assert_eq!(sink.0, b"INST");
    }

    #[test]
    fn pwords_reads_by_index() {
        static W: [u16; 3] = [0x0001, 0x1234, 0x7fff];
        let words = unsafe { PWords::<3>::new(W.as_ptr()) };

        assert_eq!(words.get(0), 0x0001);
        assert_eq!(words.get(1), 0x1234);
        assert_eq!(words.get(2), 0x7fff);
    }

    #[test]
    #[should_panic]
    fn pwords_out_of_range_panics() {
        static W: [u16; 2] = [1, 2];
        let words = unsafe { PWords::<2>::new(W.as_ptr()) };
        words.get(2);
    }
}
