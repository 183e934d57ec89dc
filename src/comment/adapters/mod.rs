//! Adapter implementations of the comment ports.

pub mod memory;
pub mod postgres;
