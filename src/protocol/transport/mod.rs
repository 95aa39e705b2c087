//! Transport vocabulary shared by the mailbox drivers: the CAN frame, message
//! box numbering, and the abstraction traits injected at construction
//! (wait strategy, upstream sink, network registry).
//!
//! ## Timing
//!
//! The busy waits of the drivers are bounded by the [`BusyWait`](traits::busy_wait::BusyWait)
//! strategy supplied by the caller. The constant below is the recommended
//! bound for deadline-based waits outside interrupt context.

pub mod can_frame;
pub mod message_box;
pub mod traits;

/// Recommended wall-clock bound for one interface register transfer (µs).
///
/// A message RAM transfer completes within a few peripheral clock cycles.
/// A wait reaching this bound means the controller stopped servicing the
/// interface register set.
///
/// # Example
///
/// ```rust,ignore
/// use embassy_time::Duration;
/// use dcan_mailbox::protocol::transport::{traits::busy_wait::DeadlineSpin, BUSY_TIMEOUT_US};
///
/// let wait = DeadlineSpin::new(Duration::from_micros(BUSY_TIMEOUT_US));
/// ```
pub const BUSY_TIMEOUT_US: u64 = 500;
