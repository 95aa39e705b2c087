//! One-time registration of a CAN interface with the network layer
//! (interface list and routing table of the protocol stack).
use super::frame_transmit::FrameTransmit;

/// Interface list and routing table of the upper protocol stack.
pub trait NetworkRegistry {
    type Error: core::fmt::Debug;

    /// Add an interface under `name`, reachable through `tx`.
    ///
    /// `tx` is only borrowed for the call. Stacks that keep the interface
    /// reach it afterwards through the `'static` handle the firmware owns.
    fn add_interface(&mut self, name: &str, tx: &dyn FrameTransmit) -> Result<(), Self::Error>;

    /// Route every destination without a more specific entry through `name`.
    fn set_default_route(&mut self, name: &str) -> Result<(), Self::Error>;
}

/// Registry for stacks that keep no interface list.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unregistered;

impl NetworkRegistry for Unregistered {
    type Error = core::convert::Infallible;

    fn add_interface(&mut self, _name: &str, _tx: &dyn FrameTransmit) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_default_route(&mut self, _name: &str) -> Result<(), Self::Error> {
        Ok(())
    }
}
