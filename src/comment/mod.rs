//! Threaded comments on marketplace tasks.
//!
//! Comments are posted once, either top-level or as a reply to another
//! comment on the same task. Reads return a one-level projection: each
//! top-level comment with its replies flattened beneath it. The module
//! follows the same hexagonal layout as [`crate::task`]:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
