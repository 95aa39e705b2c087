//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (transmit staging, mailbox
//! load, interface registration, hardware readiness).
use thiserror_no_std::Error;

//==================================================================================BUSY
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// The interface register set did not report ready within the wait bound.
#[error("Interface register set still busy after {polls} polls")]
pub struct BusyTimeout {
    /// Number of status reads performed before giving up.
    pub polls: u32,
}

//==================================================================================TX_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors returned by the transmit path. None of them leaves a staged frame
/// behind: every check happens before the commit write.
pub enum TxError {
    /// More than eight data bytes were supplied. Rejected before any register access.
    #[error("Payload too large: {len} bytes (max 8)")]
    PayloadTooLarge { len: usize },
    /// Identifier does not fit in 29 bits.
    #[error("Invalid extended identifier: {raw:#X}")]
    InvalidIdentifier { raw: u32 },
    /// The TX interface register set never became ready.
    #[error("TX interface busy: {0}")]
    HardwareBusyTimeout(BusyTimeout),
}

impl From<BusyTimeout> for TxError {
    fn from(value: BusyTimeout) -> Self {
        TxError::HardwareBusyTimeout(value)
    }
}

//==================================================================================RX_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors returned by the receive path.
///
/// A lost message is not an error: it rides along with a successful
/// delivery as [`Reception::DeliveredWithLoss`](crate::protocol::mailbox::rx::Reception).
pub enum RxError {
    /// The RX interface register set never became ready, either before the
    /// command was issued or while the mailbox was being loaded.
    #[error("RX interface busy: {0}")]
    HardwareBusyTimeout(BusyTimeout),
}

impl From<BusyTimeout> for RxError {
    fn from(value: BusyTimeout) -> Self {
        RxError::HardwareBusyTimeout(value)
    }
}

//==================================================================================INIT_ERROR
#[derive(Error, Debug)]
/// Errors raised while building and registering a CAN interface.
pub enum InitError<E: core::fmt::Debug> {
    /// Message box number outside `1..=MAX_MESSAGE_BOXES`.
    #[error("Invalid message box number: {number}")]
    InvalidMessageBox { number: u8 },
    /// Transmit and receive were configured on the same message box.
    #[error("TX and RX share message box {number}")]
    MailboxConflict { number: u8 },
    /// The network layer refused the interface.
    #[error("Network registration failed: {0:?}")]
    Registration(E),
}
