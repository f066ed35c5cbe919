//! Preference persistence and synchronization.
//!
//! # Responsibility
//! - `store`: durable partial-record persistence contracts and backends.
//! - `synchronizer`: optimistic in-memory preferences with deferred writes.

pub mod store;
pub mod synchronizer;
