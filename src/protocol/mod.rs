//! Transport components: frame vocabulary and abstraction traits, the TX/RX
//! mailbox drivers, and the interface registered with the network layer.
pub mod interface;
pub mod mailbox;
pub mod transport;
