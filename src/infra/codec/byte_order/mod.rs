//! Mapping between logical data byte indices and the physical data slots of
//! an interface register set.
//!
//! The DCAN data registers hold byte 0 in bits 7:0 of IFxDATA. On a big-endian
//! core that byte sits at the highest address of the word, so byte-wide access
//! has to swap each 4-byte half. Transmit always applies the swap; receive
//! only applies it on big-endian targets.
use crate::core::MAX_DLC;

/// Fixed permutation `logical index -> physical slot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ByteOrderMap([usize; MAX_DLC]);

impl ByteOrderMap {
    /// Word-swapped layout of a big-endian core.
    pub const PERMUTED: Self = Self([3, 2, 1, 0, 7, 6, 5, 4]);
    /// Slots in memory order.
    pub const IDENTITY: Self = Self([0, 1, 2, 3, 4, 5, 6, 7]);

    /// Map used when staging outbound data bytes.
    #[inline]
    pub const fn transmit() -> Self {
        Self::PERMUTED
    }

    /// Map used when draining a loaded mailbox on the current target.
    #[inline]
    pub const fn receive_native() -> Self {
        if cfg!(target_endian = "big") {
            Self::PERMUTED
        } else {
            Self::IDENTITY
        }
    }

    /// Physical slot holding logical byte `index`.
    #[inline]
    pub const fn slot(&self, index: usize) -> usize {
        self.0[index]
    }

    /// `(slot, byte)` pairs for `payload`, in logical order.
    pub fn placements<'a>(&self, payload: &'a [u8]) -> impl Iterator<Item = (usize, u8)> + 'a {
        let map = *self;
        payload
            .iter()
            .take(MAX_DLC)
            .enumerate()
            .map(move |(index, byte)| (map.slot(index), *byte))
    }

    /// Collect `out.len()` logical bytes from an 8-slot register image.
    pub fn gather(&self, slots: &[u8; MAX_DLC], out: &mut [u8]) {
        for (index, byte) in out.iter_mut().take(MAX_DLC).enumerate() {
            *byte = slots[self.slot(index)];
        }
    }
}
