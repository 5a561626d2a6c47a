//! Core module for the neowatch database
//!
//! The in-memory heart of the crate, with I/O kept out:
//!
//! - `models`: the `NearEarthObject` and `CloseApproach` entities
//! - `database`: the linker/index builder and lazy query engine
//! - `filters`: predicate builders consumed by queries
//! - `time`: calendar-date parsing for approach timestamps
//! - `error`: error types using thiserror

pub mod database;
pub mod error;
pub mod filters;
pub mod models;
pub mod time;

// Re-export commonly used types
pub use database::{NeoDatabase, Query};
pub use error::{NeoError, Result};
pub use filters::{Criteria, Filter};
pub use models::{ApproachRecord, CloseApproach, NearEarthObject, NeoRecord};
