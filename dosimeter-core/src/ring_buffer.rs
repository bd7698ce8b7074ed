use core::mem;

/// Fixed-size ring of one-second samples.
///
/// The write cursor advances monotonically modulo `SIZE`; slots start out as
/// zero, so averages under-report until the ring has wrapped once.
pub struct RingBuffer<const SIZE: usize> {
    samples: [u8; SIZE],
    index: usize,
}

impl<const SIZE: usize> RingBuffer<SIZE> {
    /// Create a new buffer filled with zeroes.
    pub const fn new() -> Self {
        Self {
            samples: [0; SIZE],
            index: 0,
        }
    }

    /// Store `value` in the slot under the cursor and advance the cursor,
    /// returning the evicted value.
    pub fn replace(&mut self, value: u8) -> u8 {
        let old_value = mem::replace(&mut self.samples[self.index], value);

        self.index = if self.index == SIZE - 1 {
            0
        } else {
            self.index + 1
        };
        old_value
    }

    /// Value stored `steps` insertions ago (1 = the most recent).
    pub fn back(&self, steps: usize) -> u8 {
        debug_assert!(steps >= 1 && steps <= SIZE);
        let i = if self.index >= steps {
            self.index - steps
        } else {
            self.index + SIZE - steps
        };
        self.samples[i]
    }

    /// Current cursor position, in `[0, SIZE)`.
    pub fn cursor(&self) -> usize {
        self.index
    }

    /// Iterator over the most recent `count` values, newest first.
    pub fn iter_recent(&self, count: usize) -> RecentIter<'_, SIZE> {
        debug_assert!(count <= SIZE);
        RecentIter {
            samples: &self.samples,
            index: self.index,
            remaining: count,
        }
    }
}

/// Iterator walking backwards from the write cursor.
pub struct RecentIter<'a, const SIZE: usize> {
    samples: &'a [u8; SIZE],
    index: usize,
    remaining: usize,
}

impl<const SIZE: usize> Iterator for RecentIter<'_, SIZE> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        self.index = if self.index == 0 {
            SIZE - 1
        } else {
            self.index - 1
        };
        Some(self.samples[self.index])
    }
}

#[cfg(test)]
mod tests {
    use super::RingBuffer;
    use std::vec::Vec;

    #[test]
    fn replace_returns_evicted_value() {
        let mut ring = RingBuffer::<3>::new();
        assert_eq!(ring.replace(1), 0);
        assert_eq!(ring.replace(2), 0);
        assert_eq!(ring.replace(3), 0);
        // Second lap evicts the first.
        assert_eq!(ring.replace(4), 1);
        assert_eq!(ring.replace(5), 2);
    }

    #[test]
    fn cursor_wraps_to_zero() {
        let mut ring = RingBuffer::<4>::new();
        for i in 0..4 {
            assert_eq!(ring.cursor(), i);
            ring.replace(1);
        }
        assert_eq!(ring.cursor(), 0);
    }

    #[test]
    fn back_counts_from_most_recent() {
        let mut ring = RingBuffer::<5>::new();
        for v in 1..=7 {
            ring.replace(v);
        }
        assert_eq!(ring.back(1), 7);
        assert_eq!(ring.back(2), 6);
        assert_eq!(ring.back(5), 3);
    }

    #[test]
    fn iter_recent_is_newest_first() {
        let mut ring = RingBuffer::<4>::new();
        for v in [10, 20, 30, 40, 50] {
            ring.replace(v);
        }
        let values: Vec<u8> = ring.iter_recent(3).collect();
        assert_eq!(values, [50, 40, 30]);
    }
}
