//! `dcan-mailbox` library: `no_std` transport moving extended CAN frames
//! between an upper protocol stack and a DCAN controller through two
//! dedicated interface register sets (one for transmit, one for receive).
//! The crate exposes the infrastructure modules (register access, field and
//! byte-order codecs) and the transport itself (frame, mailbox drivers,
//! registered interface).
#![no_std]
//==================================================================================
/// Controller constants shared by the codecs and the drivers.
pub mod core;
/// Transmit, receive, busy-wait, and registration errors.
pub mod error;
/// Interface register access and the codecs producing register words.
pub mod infra;
/// Transport implementation: frame type, mailbox drivers, and the registered
/// CAN interface.
pub mod protocol;
//==================================================================================
