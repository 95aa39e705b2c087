//! Transmit function handed to the protocol stack when an interface is
//! registered.
use embedded_can::ExtendedId;

use crate::core::MAX_DLC;
use crate::error::TxError;

/// Outbound path of a registered interface, as seen by the stack.
pub trait FrameTransmit {
    /// Largest payload one frame can carry.
    fn mtu(&self) -> usize {
        MAX_DLC
    }

    /// Send one extended frame.
    fn transmit_frame(&self, id: ExtendedId, payload: &[u8]) -> Result<(), TxError>;
}

impl<T: FrameTransmit + ?Sized> FrameTransmit for &T {
    fn mtu(&self) -> usize {
        (**self).mtu()
    }

    fn transmit_frame(&self, id: ExtendedId, payload: &[u8]) -> Result<(), TxError> {
        (**self).transmit_frame(id, payload)
    }
}
