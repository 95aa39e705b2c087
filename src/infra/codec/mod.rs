//! Encoding helpers for the DCAN interface register layout.
pub mod byte_order;
pub mod fields;
