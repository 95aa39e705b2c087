//! Encoding and decoding of the arbitration, message control, and command
//! fields of an interface register set.
use embedded_can::ExtendedId;

use crate::core::MAX_DLC;
use crate::infra::registers::bits::*;

/// Command staging arbitration, control, and both data halves into the
/// addressed message object and requesting its transmission.
pub const TX_COMMAND: u8 =
    CMD_WR | CMD_ARB | CMD_CONTROL | CMD_TXRQST_NEWDAT | CMD_DATA_A | CMD_DATA_B;

/// Command loading arbitration, control, and both data halves from a message
/// object while clearing its NewDat bit.
pub const RX_COMMAND: u8 = CMD_ARB | CMD_CONTROL | CMD_TXRQST_NEWDAT | CMD_DATA_A | CMD_DATA_B;

/// Mask value accepting every identifier.
pub const ACCEPT_ALL_MASK: u32 = 0;

/// Width used when extracting an identifier from a loaded arbitration word.
pub const IDENTIFIER_MASK: u32 = 0x3FFF_FFFF;

//==================================================================================ARBITRATION
/// IFxARB register word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Arbitration(pub u32);

impl Arbitration {
    /// Valid extended transmit object carrying `id`.
    pub fn transmit(id: ExtendedId) -> Self {
        Self(ARB_MSG_VAL | ARB_XTD | ARB_DIR | id.as_raw())
    }

    /// Identifier bits of a loaded object, masked to 30 bits.
    ///
    /// Receive objects have the direction bit clear, so the result is the
    /// 29-bit identifier itself.
    #[inline]
    pub const fn identifier(&self) -> u32 {
        self.0 & IDENTIFIER_MASK
    }

    /// Identifier as an [`ExtendedId`]. A stray direction bit is dropped.
    pub fn extended_id(&self) -> ExtendedId {
        let raw = self.identifier();
        ExtendedId::new(raw)
            .or_else(|| ExtendedId::new(raw & ARB_ID_MASK))
            .unwrap_or(ExtendedId::ZERO)
    }
}

//==================================================================================CONTROL
/// IFxMCTL register word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessageControl(pub u32);

impl MessageControl {
    /// Single-frame transmit object with TX/RX interrupts enabled and the
    /// acceptance mask in use.
    pub const fn transmit(len: u8) -> Self {
        Self(MCTL_UMASK | MCTL_EOB | MCTL_TX_IE | MCTL_RX_IE | (len as u32 & MCTL_DLC_MASK))
    }

    /// Data length code clamped to 8. The 4-bit field can encode up to 15.
    #[inline]
    pub fn data_length(&self) -> usize {
        ((self.0 & MCTL_DLC_MASK) as usize).min(MAX_DLC)
    }

    /// A message was overwritten before being read.
    #[inline]
    pub const fn message_lost(&self) -> bool {
        self.0 & MCTL_MSG_LST != 0
    }
}
