//! Step definitions for comment threading scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
