//! Taskmarket: data access for a local task marketplace.
//!
//! Users post tasks with a price and a location, discuss them in threaded
//! comments, and look for work near a point on the map. This crate maps
//! those operations onto parameterized `PostgreSQL` statements.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture:
//!
//! - **Domain**: validated values and pure logic such as distance and
//!   comment threading
//! - **Ports**: repository traits
//! - **Adapters**: Diesel-backed `PostgreSQL` and in-memory implementations
//! - **Services**: the public operations, stamping creation times from an
//!   injected clock
//!
//! # Modules
//!
//! - [`task`]: task creation, lookup, and geo-radius search
//! - [`comment`]: comments, replies, and threaded reads
//! - [`user`]: references to the external user directory
//! - [`config`]: layered configuration and pool construction
//! - [`telemetry`]: tracing subscriber setup

pub mod comment;
pub mod config;
pub mod task;
pub mod telemetry;
pub mod user;

#[cfg(test)]
mod test_support;
