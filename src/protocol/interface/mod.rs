//! CAN interface registered with the network layer.
//!
//! [`CanInterface`] is the explicit handle tying together the two mailbox
//! drivers, the upstream sink, and the counters. Firmware creates it once
//! (usually into a `static_cell::StaticCell`), then lends it by reference to
//! the receive interrupt and to every task that transmits.
//!
//! ```rust,ignore
//! static CAN: StaticCell<Can> = StaticCell::new();
//!
//! let can = CAN.init(CanInterface::register(&config, parts, sink, &mut stack)?);
//!
//! // DCAN message interrupt
//! let notified = can.on_notify(MessageBox::new(message_box).unwrap())?;
//! if notified.reschedule.is_requested() {
//!     // request a context switch on exit
//! }
//! ```
pub mod config;
pub mod stats;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_can::ExtendedId;

use crate::error::{InitError, RxError, TxError};
use crate::infra::registers::{InterfaceRegisters, NewDataRegisters};
use crate::protocol::mailbox::{
    rx::{Reception, RxMailbox},
    tx::TxMailbox,
};
use crate::protocol::transport::{
    can_frame::CanFrame,
    message_box::MessageBox,
    traits::{
        busy_wait::BusyWait,
        frame_transmit::FrameTransmit,
        network_registry::NetworkRegistry,
        upstream_sink::{Reschedule, UpstreamSink},
    },
};
use config::{InterfaceConfig, InterfaceName};
use stats::{InterfaceStats, StatsSnapshot};

/// Hardware resources handed over at registration.
pub struct InterfaceParts<TR, TW, RR, N, RW> {
    /// TX interface register set (IF1).
    pub tx_regs: TR,
    pub tx_wait: TW,
    /// RX interface register set (IF2).
    pub rx_regs: RR,
    pub new_data: N,
    pub rx_wait: RW,
}

/// Outcome of one receive notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notified {
    pub reception: Reception,
    /// The sink woke a task; the interrupt handler should yield on exit.
    pub reschedule: Reschedule,
}

/// Registered CAN interface.
pub struct CanInterface<M: RawMutex, TR, TW, RR, N, RW, S> {
    name: InterfaceName,
    rx_mailbox: MessageBox,
    tx: TxMailbox<M, TR, TW>,
    rx: RxMailbox<M, RR, N, RW>,
    sink: S,
    stats: InterfaceStats,
}

impl<M, TR, TW, RR, N, RW, S> CanInterface<M, TR, TW, RR, N, RW, S>
where
    M: RawMutex,
    TR: InterfaceRegisters,
    TW: BusyWait,
    RR: InterfaceRegisters,
    N: NewDataRegisters,
    RW: BusyWait,
    S: UpstreamSink,
{
    /// Validate the configuration, register the interface with the network
    /// layer, and return the handle.
    ///
    /// Mailbox numbers must lie in `1..=MAX_MESSAGE_BOXES` and differ. Names
    /// longer than `INTERFACE_NAME_MAX` are truncated.
    pub fn register<G: NetworkRegistry>(
        config: &InterfaceConfig<'_>,
        parts: InterfaceParts<TR, TW, RR, N, RW>,
        sink: S,
        registry: &mut G,
    ) -> Result<Self, InitError<G::Error>> {
        let tx_mailbox = MessageBox::new(config.tx_mailbox).ok_or(InitError::InvalidMessageBox {
            number: config.tx_mailbox,
        })?;
        let rx_mailbox = MessageBox::new(config.rx_mailbox).ok_or(InitError::InvalidMessageBox {
            number: config.rx_mailbox,
        })?;
        if tx_mailbox == rx_mailbox {
            return Err(InitError::MailboxConflict {
                number: tx_mailbox.number(),
            });
        }

        let interface = Self {
            name: InterfaceName::truncated(config.name),
            rx_mailbox,
            tx: TxMailbox::new(parts.tx_regs, tx_mailbox, parts.tx_wait),
            rx: RxMailbox::new(parts.rx_regs, parts.new_data, parts.rx_wait),
            sink,
            stats: InterfaceStats::new(),
        };

        registry
            .add_interface(interface.name(), &interface)
            .map_err(InitError::Registration)?;
        if config.default_route {
            registry
                .set_default_route(interface.name())
                .map_err(InitError::Registration)?;
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "CAN interface {} registered: TX box {}, RX box {}",
            interface.name(),
            tx_mailbox.number(),
            rx_mailbox.number()
        );

        Ok(interface)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn tx_mailbox(&self) -> MessageBox {
        self.tx.mailbox()
    }

    pub fn rx_mailbox(&self) -> MessageBox {
        self.rx_mailbox
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Transmit function handed to the protocol stack.
    pub fn transmit(&self, id: ExtendedId, payload: &[u8]) -> Result<(), TxError> {
        let result = self.tx.transmit(id, payload);
        self.stats.record_tx(result.is_ok());
        result
    }

    /// Transmit with a raw identifier; identifiers wider than 29 bits are rejected.
    pub fn transmit_raw(&self, id: u32, payload: &[u8]) -> Result<(), TxError> {
        let result = self.tx.transmit_raw(id, payload);
        self.stats.record_tx(result.is_ok());
        result
    }

    pub fn send_frame(&self, frame: &CanFrame) -> Result<(), TxError> {
        self.transmit(frame.extended_id(), frame.payload())
    }

    /// Receive entry point, called by the message interrupt for `mailbox`.
    ///
    /// Reads the mailbox, counts the outcome, and forwards any frame to the sink.
    pub fn on_notify(&self, mailbox: MessageBox) -> Result<Notified, RxError> {
        let reception = match self.rx.receive(mailbox) {
            Ok(reception) => reception,
            Err(err) => {
                self.stats.record_rx_error();
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "CAN interface {}: RX box {} aborted: {}",
                    self.name.as_str(),
                    mailbox.number(),
                    err
                );
                return Err(err);
            }
        };

        let reschedule = match reception.frame() {
            None => Reschedule::No,
            Some(frame) => {
                let lost = reception.is_lost();
                self.stats.record_rx(lost);
                let delivery = self.sink.deliver(frame, lost);
                if !delivery.accepted {
                    self.stats.record_dropped();
                }
                delivery.reschedule
            }
        };

        Ok(Notified {
            reception,
            reschedule,
        })
    }

    /// [`on_notify`](Self::on_notify) for the configured RX mailbox.
    pub fn poll(&self) -> Result<Notified, RxError> {
        self.on_notify(self.rx_mailbox)
    }
}

impl<M, TR, TW, RR, N, RW, S> FrameTransmit for CanInterface<M, TR, TW, RR, N, RW, S>
where
    M: RawMutex,
    TR: InterfaceRegisters,
    TW: BusyWait,
    RR: InterfaceRegisters,
    N: NewDataRegisters,
    RW: BusyWait,
    S: UpstreamSink,
{
    fn transmit_frame(&self, id: ExtendedId, payload: &[u8]) -> Result<(), TxError> {
        self.transmit(id, payload)
    }
}
