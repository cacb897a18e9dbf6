//! Core domain logic for tasklist.
//! This crate is the single source of truth for collection invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod seed;
pub mod store;

pub use config::{ConfigError, IdStrategy, StoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_env, logging_status};
pub use model::filter::{FilterKind, FilterParseError};
pub use model::record::{Priority, PriorityParseError, Record, RecordId, RecordValidationError};
pub use seed::{parse_checklist, SeedRecord};
pub use store::collection_store::{CollectionStore, Snapshot, StoreError, StoreResult};
pub use store::id_gen::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use store::observer::{ChangeEvent, ChangeKind, SubscriptionId};
pub use store::view::RecordCounts;

/// Minimal health-check API for host wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
