//! Statpub Database Library
//!
//! Postgres repositories for the import pipeline: the `imports` table and
//! the read-only view of files linked to a release. The `ImportStore` and
//! `ReleaseFileStore` traits are the seams consumed by the validator and the
//! orchestration services, so callers can substitute in-memory
//! implementations in tests.

pub mod db;
pub mod traits;

pub use db::{ImportRepository, ReleaseFileRepository};
pub use traits::{ImportStore, ReleaseFileStore};
