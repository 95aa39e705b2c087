//! Transmit mailbox driver: stages one frame at a time into the TX interface
//! register set and commits it to the transmit message box.
//!
//! Success means the frame was accepted into the mailbox, not that it was
//! acknowledged on the bus. No completion tracking or retransmission is done
//! here; recovery belongs to the upper layer.
use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};
use embedded_can::ExtendedId;

use crate::core::MAX_DLC;
use crate::error::TxError;
use crate::infra::codec::byte_order::ByteOrderMap;
use crate::infra::codec::fields::{Arbitration, MessageControl, ACCEPT_ALL_MASK, TX_COMMAND};
use crate::infra::registers::InterfaceRegisters;
use crate::protocol::transport::{
    can_frame::CanFrame, message_box::MessageBox, traits::busy_wait::BusyWait,
};

struct TxInner<R, W> {
    regs: R,
    wait: W,
}

/// Exclusive owner of the TX interface register set.
pub struct TxMailbox<M: RawMutex, R, W> {
    mailbox: MessageBox,
    inner: Mutex<M, RefCell<TxInner<R, W>>>,
}

impl<M, R, W> TxMailbox<M, R, W>
where
    M: RawMutex,
    R: InterfaceRegisters,
    W: BusyWait,
{
    /// Take ownership of the register set; frames are committed to `mailbox`.
    pub fn new(regs: R, mailbox: MessageBox, wait: W) -> Self {
        Self {
            mailbox,
            inner: Mutex::new(RefCell::new(TxInner { regs, wait })),
        }
    }

    /// Message box frames are committed to.
    pub fn mailbox(&self) -> MessageBox {
        self.mailbox
    }

    /// Stage `payload` under `id` and request its transmission.
    ///
    /// Sequence:
    /// 1. Wait until the interface register set is free.
    /// 2. Accept-all mask, arbitration (valid, extended, transmit, id), control
    ///    (use mask, end of block, TX/RX interrupts, DLC).
    /// 3. Transfer command, then the data bytes in register order.
    /// 4. Write the message number, which commits the staged fields.
    ///
    /// Rejected payloads and busy timeouts return before the first write, so
    /// a failed call never leaves a half-staged frame behind.
    pub fn transmit(&self, id: ExtendedId, payload: &[u8]) -> Result<(), TxError> {
        if payload.len() > MAX_DLC {
            return Err(TxError::PayloadTooLarge { len: payload.len() });
        }

        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();
            let TxInner { regs, wait } = &mut *inner;

            wait.wait_while(|| regs.is_busy())?;

            regs.write_mask(ACCEPT_ALL_MASK);
            regs.write_arbitration(Arbitration::transmit(id).0);
            regs.write_control(MessageControl::transmit(payload.len() as u8).0);
            regs.write_command(TX_COMMAND);

            for (slot, byte) in ByteOrderMap::transmit().placements(payload) {
                regs.write_data(slot, byte);
            }

            regs.write_message_number(self.mailbox.number());

            #[cfg(feature = "defmt")]
            defmt::trace!(
                "TX box {}: id={:#X} len={}",
                self.mailbox.number(),
                id.as_raw(),
                payload.len()
            );
            Ok(())
        })
    }

    /// Same as [`transmit`](Self::transmit) for a raw identifier. Values wider
    /// than 29 bits are rejected, never truncated.
    pub fn transmit_raw(&self, id: u32, payload: &[u8]) -> Result<(), TxError> {
        if payload.len() > MAX_DLC {
            return Err(TxError::PayloadTooLarge { len: payload.len() });
        }
        let id = ExtendedId::new(id).ok_or(TxError::InvalidIdentifier { raw: id })?;
        self.transmit(id, payload)
    }

    pub fn send_frame(&self, frame: &CanFrame) -> Result<(), TxError> {
        self.transmit(frame.extended_id(), frame.payload())
    }
}
