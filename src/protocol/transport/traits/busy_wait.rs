//! Wait strategy applied while an interface register set reports busy.
//!
//! Interrupt handlers keep a tight spin; task contexts should bound the wait
//! so that a faulted controller surfaces as [`BusyTimeout`] instead of
//! hanging the caller.
use embassy_time::{Duration, Instant};

use crate::core::DEFAULT_MAX_BUSY_POLLS;
use crate::error::BusyTimeout;

/// Strategy used to wait for the hardware to clear a busy flag.
pub trait BusyWait {
    /// Call `busy` until it returns `false`, or give up.
    fn wait_while<F: FnMut() -> bool>(&mut self, busy: F) -> Result<(), BusyTimeout>;
}

impl<W: BusyWait + ?Sized> BusyWait for &mut W {
    fn wait_while<F: FnMut() -> bool>(&mut self, busy: F) -> Result<(), BusyTimeout> {
        (**self).wait_while(busy)
    }
}

//==================================================================================SPIN
/// Unbounded spin. Only suitable where the hardware is trusted to finish,
/// such as the receive interrupt.
#[derive(Debug, Default, Clone, Copy)]
pub struct Spin;

impl BusyWait for Spin {
    fn wait_while<F: FnMut() -> bool>(&mut self, mut busy: F) -> Result<(), BusyTimeout> {
        while busy() {
            core::hint::spin_loop();
        }
        Ok(())
    }
}

//==================================================================================BOUNDED_SPIN
/// Spin for at most `max_polls` status reads.
#[derive(Debug, Clone, Copy)]
pub struct BoundedSpin {
    max_polls: u32,
}

impl BoundedSpin {
    pub const fn new(max_polls: u32) -> Self {
        Self { max_polls }
    }
}

impl Default for BoundedSpin {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BUSY_POLLS)
    }
}

impl BusyWait for BoundedSpin {
    fn wait_while<F: FnMut() -> bool>(&mut self, mut busy: F) -> Result<(), BusyTimeout> {
        let mut polls = 0;
        while busy() {
            polls += 1;
            if polls >= self.max_polls {
                #[cfg(feature = "defmt")]
                defmt::warn!("Interface still busy after {} polls", polls);
                return Err(BusyTimeout { polls });
            }
            core::hint::spin_loop();
        }
        Ok(())
    }
}

//==================================================================================DEADLINE_SPIN
/// Spin until a wall-clock deadline measured with `embassy_time`.
///
/// `Duration::MAX` never expires and behaves like [`Spin`].
#[derive(Debug, Clone, Copy)]
pub struct DeadlineSpin {
    timeout: Duration,
}

impl DeadlineSpin {
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl BusyWait for DeadlineSpin {
    fn wait_while<F: FnMut() -> bool>(&mut self, mut busy: F) -> Result<(), BusyTimeout> {
        // A timeout past the end of the clock means no bound at all.
        let Some(deadline) = Instant::now().checked_add(self.timeout) else {
            return Spin.wait_while(busy);
        };
        let mut polls: u32 = 0;
        while busy() {
            polls = polls.saturating_add(1);
            if Instant::now() >= deadline {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Interface still busy after {} us",
                    self.timeout.as_micros()
                );
                return Err(BusyTimeout { polls });
            }
            core::hint::spin_loop();
        }
        Ok(())
    }
}
