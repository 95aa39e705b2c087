//! Per-interface counters. They are observability state only: no protocol
//! decision reads them.
use core::sync::atomic::{AtomicU32, Ordering};

/// Live counters updated from both the transmit and the receive context.
#[derive(Debug, Default)]
pub struct InterfaceStats {
    tx_frames: AtomicU32,
    tx_errors: AtomicU32,
    rx_frames: AtomicU32,
    rx_lost: AtomicU32,
    rx_dropped: AtomicU32,
    rx_errors: AtomicU32,
}

/// Point-in-time copy of [`InterfaceStats`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatsSnapshot {
    /// Frames accepted into the TX mailbox.
    pub tx_frames: u32,
    /// Transmit calls that failed.
    pub tx_errors: u32,
    /// Frames read from an RX mailbox.
    pub rx_frames: u32,
    /// Reads that reported an overwritten earlier message.
    pub rx_lost: u32,
    /// Frames the upstream sink could not take.
    pub rx_dropped: u32,
    /// Receive notifications aborted by the hardware. A timeout after the
    /// load command may have consumed a frame.
    pub rx_errors: u32,
}

impl InterfaceStats {
    pub const fn new() -> Self {
        Self {
            tx_frames: AtomicU32::new(0),
            tx_errors: AtomicU32::new(0),
            rx_frames: AtomicU32::new(0),
            rx_lost: AtomicU32::new(0),
            rx_dropped: AtomicU32::new(0),
            rx_errors: AtomicU32::new(0),
        }
    }

    pub(crate) fn record_tx(&self, ok: bool) {
        let counter = if ok { &self.tx_frames } else { &self.tx_errors };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one delivery, and one loss on top of it when `lost` is set.
    pub(crate) fn record_rx(&self, lost: bool) {
        self.rx_frames.fetch_add(1, Ordering::Relaxed);
        if lost {
            self.rx_lost.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_dropped(&self) {
        self.rx_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rx_error(&self) {
        self.rx_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            tx_frames: self.tx_frames.load(Ordering::Relaxed),
            tx_errors: self.tx_errors.load(Ordering::Relaxed),
            rx_frames: self.rx_frames.load(Ordering::Relaxed),
            rx_lost: self.rx_lost.load(Ordering::Relaxed),
            rx_dropped: self.rx_dropped.load(Ordering::Relaxed),
            rx_errors: self.rx_errors.load(Ordering::Relaxed),
        }
    }
}
