//! Abstraction traits used by the mailbox drivers (wait strategy, upstream
//! sink, network registry, and the transmit function given to the stack).
pub mod busy_wait;
pub mod frame_transmit;
pub mod network_registry;
pub mod upstream_sink;
