//! Marketplace task posting and geo-radius search.
//!
//! Tasks are created once with a database-generated identifier and a
//! server-assigned timestamp, fetched by identifier, and searched by
//! great-circle distance from a point with optional structured predicates.
//! The module follows hexagonal architecture:
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
