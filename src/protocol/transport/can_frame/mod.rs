//! In-memory representation of an extended CAN data frame as exchanged with
//! the upper protocol stack.
use embedded_can::{ExtendedId, Id};

use crate::core::MAX_DLC;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Extended data frame: 29-bit identifier and up to eight payload bytes.
pub struct CanFrame {
    id: ExtendedId,
    data: [u8; MAX_DLC],
    len: usize,
}

impl CanFrame {
    /// Build a frame, or `None` when the payload exceeds eight bytes.
    pub fn new(id: ExtendedId, payload: &[u8]) -> Option<Self> {
        if payload.len() > MAX_DLC {
            return None;
        }
        let mut data = [0u8; MAX_DLC];
        data[..payload.len()].copy_from_slice(payload);
        Some(Self {
            id,
            data,
            len: payload.len(),
        })
    }

    /// Build a frame from a register image and a length already clamped to 8.
    pub(crate) fn from_parts(id: ExtendedId, data: [u8; MAX_DLC], len: usize) -> Self {
        Self {
            id,
            data,
            len: len.min(MAX_DLC),
        }
    }

    /// 29-bit identifier.
    #[inline]
    pub fn extended_id(&self) -> ExtendedId {
        self.id
    }

    /// Raw identifier value.
    #[inline]
    pub fn raw_id(&self) -> u32 {
        self.id.as_raw()
    }

    /// Valid payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Number of valid payload bytes (0 to 8).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Only extended data frames travel through the mailboxes: standard
/// identifiers and remote frames are refused.
impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        match id.into() {
            Id::Extended(id) => CanFrame::new(id, data),
            Id::Standard(_) => None,
        }
    }

    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        true
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        Id::Extended(self.id)
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}
