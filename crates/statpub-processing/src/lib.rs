//! Statpub Processing Library
//!
//! Deterministic upload validation for the import pipeline: content-based
//! file-type and encoding sniffing, zip archive inspection, and the ordered
//! business rules applied to uploads before anything is persisted.

pub mod archive;
pub mod file_type;
pub mod validator;

pub use archive::{inspect_data_archive, DataArchiveFile};
pub use validator::UploadValidator;
