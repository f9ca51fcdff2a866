//! Bit-offset allocation.
//!
//! There is no allocator object: the cursor is a plain `usize` that callers
//! thread through explicitly, feeding each range's `end` into the next call.

use serde::Serialize;
use std::fmt;

/// Half-open range of bit indices `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BitRange {
    pub start: usize,
    pub end: usize,
}

impl BitRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, bit: usize) -> bool {
        bit >= self.start && bit < self.end
    }

    pub fn overlaps(&self, other: &BitRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn iter(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Reserve `width` consecutive bits starting at `cursor`.
///
/// The next free cursor is the returned range's `end`.
///
/// # Panics
///
/// Panics if `cursor + width` overflows `usize`. Bit indices are written to
/// JSON as plain integers, so there is no meaningful range to hand out past
/// that point.
pub fn allocate(cursor: usize, width: usize) -> BitRange {
    match cursor.checked_add(width) {
        Some(end) => BitRange { start: cursor, end },
        None => panic!("bit cursor overflow: {} + {}", cursor, width),
    }
}
