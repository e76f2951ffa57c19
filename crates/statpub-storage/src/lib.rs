//! Statpub Storage Library
//!
//! Read-side blob storage seam for the import pipeline. Uploaded files are
//! written elsewhere; the pipeline only needs to check existence, read
//! content, and delete blobs when an import is removed.
//!
//! # Storage key format
//!
//! Keys are release- and type-scoped: `releases/{release_id}/{file_type}/{filename}`.
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module so all backends stay consistent.

pub mod keys;
pub mod local;
pub mod traits;

pub use keys::file_storage_key;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
