//! Database repositories for the import pipeline.
//!
//! Each repository owns a `PgPool` clone and is responsible for one domain
//! entity. Enum columns are stored as text and parsed through the model's
//! `FromStr` implementation.

pub mod imports;
pub mod release_files;

pub use imports::ImportRepository;
pub use release_files::ReleaseFileRepository;
