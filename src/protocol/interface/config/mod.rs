//! Registration parameters of a CAN interface.
use crate::core::INTERFACE_NAME_MAX;

//==================================================================================CONFIG
#[derive(Debug, Clone, Copy)]
/// Fluent description of the interface to register.
pub struct InterfaceConfig<'a> {
    pub name: &'a str,
    /// Message box frames are transmitted from.
    pub tx_mailbox: u8,
    /// Message box the receive notification is wired to.
    pub rx_mailbox: u8,
    /// Install the interface as the default route of the network layer.
    pub default_route: bool,
}

impl<'a> InterfaceConfig<'a> {
    /// TX on box 1, RX on box 2, default route enabled.
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            tx_mailbox: 1,
            rx_mailbox: 2,
            default_route: true,
        }
    }

    pub fn with_tx_mailbox(mut self, number: u8) -> Self {
        self.tx_mailbox = number;
        self
    }

    pub fn with_rx_mailbox(mut self, number: u8) -> Self {
        self.rx_mailbox = number;
        self
    }

    /// Register the interface without touching the routing table.
    pub fn without_default_route(mut self) -> Self {
        self.default_route = false;
        self
    }
}

//==================================================================================NAME
/// Interface name stored inline, at most `INTERFACE_NAME_MAX` bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct InterfaceName {
    bytes: [u8; INTERFACE_NAME_MAX],
    len: usize,
}

impl InterfaceName {
    /// Copy `name`, cutting it at the last char boundary that fits.
    pub fn truncated(name: &str) -> Self {
        let mut len = name.len().min(INTERFACE_NAME_MAX);
        while !name.is_char_boundary(len) {
            len -= 1;
        }
        let mut bytes = [0u8; INTERFACE_NAME_MAX];
        bytes[..len].copy_from_slice(&name.as_bytes()[..len]);
        Self { bytes, len }
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }
}

impl core::fmt::Debug for InterfaceName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("InterfaceName").field(&self.as_str()).finish()
    }
}
