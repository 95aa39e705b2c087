//! Mailbox drivers. Each driver owns one interface register set behind a
//! blocking mutex, so concurrent callers are serialized over the whole
//! staging sequence.
//!
//! The mutex flavour is chosen by the firmware through the `M: RawMutex`
//! parameter: `CriticalSectionRawMutex` when the driver is shared with an
//! interrupt handler, `NoopRawMutex` when it never leaves one context.
pub mod rx;
pub mod tx;
