//! Upstream sink receiving every frame drained from the RX mailbox.
//!
//! The sink may be invoked from the receive interrupt, so implementations
//! must not block. [`ChannelSink`] hands frames over to a task through a
//! pre-allocated [`embassy_sync::channel::Channel`]; the library performs no
//! allocation.
use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Channel};

use crate::protocol::transport::can_frame::CanFrame;

/// Hint returned to the interrupt handler: a higher-priority task became
/// ready and the handler should request a context switch on exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum Reschedule {
    #[default]
    No,
    Yes,
}

impl Reschedule {
    #[inline]
    pub fn is_requested(self) -> bool {
        matches!(self, Reschedule::Yes)
    }
}

/// Consumer of received frames (the protocol stack's CAN interface).
pub trait UpstreamSink {
    /// Take one frame. `lost` is set when at least one earlier message in the
    /// same mailbox was overwritten before it could be read.
    ///
    /// A sink that has to drop the frame reports it through [`Delivery::dropped`].
    fn deliver(&self, frame: &CanFrame, lost: bool) -> Delivery;
}

/// Result of handing a frame to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Delivery {
    pub accepted: bool,
    pub reschedule: Reschedule,
}

impl Delivery {
    pub const fn queued(reschedule: Reschedule) -> Self {
        Self {
            accepted: true,
            reschedule,
        }
    }

    pub const fn dropped() -> Self {
        Self {
            accepted: false,
            reschedule: Reschedule::No,
        }
    }
}

impl<S: UpstreamSink + ?Sized> UpstreamSink for &S {
    fn deliver(&self, frame: &CanFrame, lost: bool) -> Delivery {
        (**self).deliver(frame, lost)
    }
}

//==================================================================================CHANNEL_SINK
/// Frame queued for a task, with its loss flag preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceivedFrame {
    pub frame: CanFrame,
    pub lost: bool,
}

/// Sink pushing frames into a bounded channel drained by a task.
pub struct ChannelSink<'a, M: RawMutex, const N: usize> {
    channel: &'a Channel<M, ReceivedFrame, N>,
}

impl<'a, M: RawMutex, const N: usize> ChannelSink<'a, M, N> {
    pub fn new(channel: &'a Channel<M, ReceivedFrame, N>) -> Self {
        Self { channel }
    }
}

impl<M: RawMutex, const N: usize> UpstreamSink for ChannelSink<'_, M, N> {
    fn deliver(&self, frame: &CanFrame, lost: bool) -> Delivery {
        match self.channel.try_send(ReceivedFrame {
            frame: *frame,
            lost,
        }) {
            // The receiving task was woken by the send.
            Ok(()) => Delivery::queued(Reschedule::Yes),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("RX queue full, dropping frame id={:#X}", frame.raw_id());
                Delivery::dropped()
            }
        }
    }
}
