//! Domain model for list records and view filters.
//!
//! # Responsibility
//! - Define the record shape shared by the store, seeds and consumers.
//! - Keep filter vocabulary independent of any presentation layer.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId`.
//! - Filter state never leaks into records.

pub mod filter;
pub mod record;
