//! Receive mailbox driver: drains a message box through the RX interface
//! register set when the hardware signals new data.
//!
//! Every call works on its own stack buffer; nothing received is retained
//! once the call returns.
use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};

use crate::core::MAX_DLC;
use crate::error::RxError;
use crate::infra::codec::byte_order::ByteOrderMap;
use crate::infra::codec::fields::{Arbitration, MessageControl, RX_COMMAND};
use crate::infra::registers::{InterfaceRegisters, NewDataRegisters};
use crate::protocol::transport::{
    can_frame::CanFrame, message_box::MessageBox, traits::busy_wait::BusyWait,
};

//==================================================================================RECEPTION
/// Outcome of one receive attempt.
///
/// The loss variant is a diagnostic that travels with a valid frame; it must
/// reach the sink and the counters untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reception {
    /// The message box holds no unread message.
    NoData,
    /// One frame, nothing missed.
    Delivered(CanFrame),
    /// One frame, and at least one earlier message was overwritten before it was read.
    DeliveredWithLoss(CanFrame),
}

impl Reception {
    /// Frame carried by a delivery.
    pub fn frame(&self) -> Option<&CanFrame> {
        match self {
            Reception::NoData => None,
            Reception::Delivered(frame) | Reception::DeliveredWithLoss(frame) => Some(frame),
        }
    }

    pub fn is_lost(&self) -> bool {
        matches!(self, Reception::DeliveredWithLoss(_))
    }
}

//==================================================================================RX_MAILBOX
struct RxInner<R, N, W> {
    regs: R,
    bitmap: N,
    wait: W,
}

/// Exclusive owner of the RX interface register set.
pub struct RxMailbox<M: RawMutex, R, N, W> {
    order: ByteOrderMap,
    inner: Mutex<M, RefCell<RxInner<R, N, W>>>,
}

impl<M, R, N, W> RxMailbox<M, R, N, W>
where
    M: RawMutex,
    R: InterfaceRegisters,
    N: NewDataRegisters,
    W: BusyWait,
{
    /// Take ownership of the RX register set and read access to the new-data bitmap.
    pub fn new(regs: R, bitmap: N, wait: W) -> Self {
        Self {
            order: ByteOrderMap::receive_native(),
            inner: Mutex::new(RefCell::new(RxInner { regs, bitmap, wait })),
        }
    }

    /// Replace the target byte order, e.g. when a simulated controller lays
    /// out its data registers like a big-endian core.
    pub fn with_byte_order(mut self, order: ByteOrderMap) -> Self {
        self.order = order;
        self
    }

    /// Byte order used to read the data slots.
    pub fn byte_order(&self) -> ByteOrderMap {
        self.order
    }

    /// Read `mailbox` if it holds new data.
    ///
    /// Sequence:
    /// 1. Test the mailbox bit in the new-data bitmap; stop with `NoData` when clear.
    /// 2. Wait for the interface, issue the read command, write the message
    ///    number, and wait for the load to finish.
    /// 3. Read the data registers, keep `min(DLC, 8)` bytes in logical order,
    ///    decode the identifier, and check the message-lost flag.
    ///
    /// A set message-lost flag on a mailbox without new data is ignored: the
    /// loss is only meaningful relative to the message just read.
    pub fn receive(&self, mailbox: MessageBox) -> Result<Reception, RxError> {
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();
            let RxInner { regs, bitmap, wait } = &mut *inner;

            let (word, mask) = mailbox.new_data_bit();
            if bitmap.new_data(word) & mask == 0 {
                return Ok(Reception::NoData);
            }

            wait.wait_while(|| regs.is_busy())?;
            regs.write_command(RX_COMMAND);
            regs.write_message_number(mailbox.number());
            wait.wait_while(|| regs.is_busy())?;

            let control = MessageControl(regs.read_control());
            let len = control.data_length();

            let mut image = [0u8; MAX_DLC];
            for (slot, byte) in image.iter_mut().enumerate() {
                *byte = regs.read_data(slot);
            }
            let mut data = [0u8; MAX_DLC];
            self.order.gather(&image, &mut data[..len]);

            let id = Arbitration(regs.read_arbitration()).extended_id();
            let frame = CanFrame::from_parts(id, data, len);

            if control.message_lost() {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "RX box {}: message lost before id={:#X}",
                    mailbox.number(),
                    id.as_raw()
                );
                Ok(Reception::DeliveredWithLoss(frame))
            } else {
                #[cfg(feature = "defmt")]
                defmt::trace!(
                    "RX box {}: id={:#X} len={}",
                    mailbox.number(),
                    id.as_raw(),
                    len
                );
                Ok(Reception::Delivered(frame))
            }
        })
    }
}
