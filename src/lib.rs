//! neowatch - Near-Earth object close-approach database (Rust engine)
//!
//! This library links NASA's NEO catalog with its close approach dataset
//! into a single in-memory relational structure, and answers predicate
//! queries over the approaches. It is designed to be consumed by:
//! - The CLI binary (src/bin/neowatch.rs)
//! - Other tools embedding the database directly
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs** (this file): Pure logic, no CLI concerns
//! - **bin/neowatch.rs**: Thin wrapper that calls the library
//!
//! The data flows in one direction:
//!
//! 1. `extract` reads the two raw datasets into unlinked entity collections
//! 2. `core::database` links them: indices by designation and by name, plus
//!    bidirectional NEO/approach references, built in one pass
//! 3. `core::filters` turns user criteria into predicates, and
//!    `NeoDatabase::query` streams the matching approaches lazily
//! 4. `write` serializes a result stream to CSV or JSON
//!
//! The database is single-threaded by design: built once, read-only after,
//! with `Rc`-shared entities and weak back-references.

pub mod core;
pub mod extract;
pub mod write;

use std::path::Path;

// Re-export the public surface at the crate root
pub use crate::core::database::{NeoDatabase, Query};
pub use crate::core::error::{NeoError, Result};
pub use crate::core::filters::{self, Criteria, Filter};
pub use crate::core::models::{ApproachRecord, CloseApproach, NearEarthObject, NeoRecord};
pub use crate::extract::{load_approaches, load_neos};
pub use crate::write::{write_results, write_to_csv, write_to_json, OutputFormat};

/// Version of the neowatch library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load both datasets and build the linked database in one call.
///
/// # Arguments
///
/// * `neo_csv` - Path to the NEO catalog CSV file
/// * `cad_json` - Path to the close approach JSON dataset
///
/// # Returns
///
/// * `Ok(NeoDatabase)` - The fully linked, queryable database
/// * `Err(NeoError)` - If either dataset cannot be read or parsed
pub fn build_database(neo_csv: impl AsRef<Path>, cad_json: impl AsRef<Path>) -> Result<NeoDatabase> {
    let neos = extract::load_neos(neo_csv)?;
    let approaches = extract::load_approaches(cad_json)?;
    Ok(NeoDatabase::new(neos, approaches))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_manifest() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_build_database_missing_file_is_an_error() {
        let result = build_database("/nonexistent/neos.csv", "/nonexistent/cad.json");
        assert!(matches!(result, Err(NeoError::Io(_))));
    }
}
