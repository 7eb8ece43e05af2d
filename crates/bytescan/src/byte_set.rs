use core::fmt;

use bstr::ByteSlice;

/// An immutable set of byte values with O(1) membership tests.
///
/// Backed by a 256-bit bitmap, so building one is cheap and `contains` is a
/// single shift and mask. Sets are plain values: copy them, share them
/// across tokenizers and threads, nothing is mutated after construction.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ByteSet {
    bits: [u64; 4],
}

impl ByteSet {
    /// The set containing no bytes.
    pub const EMPTY: ByteSet = ByteSet { bits: [0; 4] };

    /// Builds the set containing exactly the given bytes.
    ///
    /// Duplicates are harmless.
    #[must_use]
    pub const fn new(members: &[u8]) -> Self {
        let mut bits = [0u64; 4];
        let mut i = 0;
        while i < members.len() {
            let b = members[i];
            bits[(b >> 6) as usize] |= 1 << (b & 63);
            i += 1;
        }
        ByteSet { bits }
    }

    /// Reports whether `b` is a member of the set.
    #[inline]
    #[must_use]
    pub const fn contains(&self, b: u8) -> bool {
        self.bits[(b >> 6) as usize] & (1 << (b & 63)) != 0
    }

    /// Returns the set holding every byte *not* in `self`.
    ///
    /// The result shares no state with the original; both remain usable
    /// independently.
    #[must_use]
    pub const fn complement(&self) -> Self {
        ByteSet {
            bits: [
                !self.bits[0],
                !self.bits[1],
                !self.bits[2],
                !self.bits[3],
            ],
        }
    }
}

impl fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<u8> = (0..=u8::MAX).filter(|&b| self.contains(b)).collect();
        write!(f, "ByteSet({:?})", members.as_bstr())
    }
}
