//! Fixed properties of the DCAN controller shared by the codecs, the mailbox
//! drivers and the network interface.

/// Largest data length code carried by a classic CAN frame.
pub const MAX_DLC: usize = 8;

/// Number of message objects available in the DCAN message RAM.
/// Message boxes are numbered from 1.
pub const MAX_MESSAGE_BOXES: u8 = 64;

/// Number of 32-bit words in the new-data bitmap (NWDAT1..NWDAT4).
pub const NEW_DATA_WORDS: usize = 4;

/// Maximum interface name length accepted by the network layer.
/// Longer names are truncated on registration.
pub const INTERFACE_NAME_MAX: usize = 10;

/// Default number of status polls before a busy interface register set is
/// reported as stuck.
///
/// A transfer between the message RAM and an interface register set takes a
/// handful of peripheral clock cycles; this bound only trips when the
/// controller has stopped servicing the interface (bus-off, clock gated…).
pub const DEFAULT_MAX_BUSY_POLLS: u32 = 100_000;
