//! Store traits implemented by the Postgres repositories.

use async_trait::async_trait;
use statpub_core::models::{FileType, Import, NewImport, ReleaseFileReference};
use statpub_core::AppError;
use uuid::Uuid;

/// Persistence contract for import records.
#[async_trait]
pub trait ImportStore: Send + Sync {
    /// Insert a new record with status `queued`, no errors, and the
    /// migration flag cleared.
    async fn create(&self, new_import: NewImport) -> Result<Import, AppError>;

    /// The live import for a data file, if any.
    async fn get_by_file_id(&self, file_id: Uuid) -> Result<Option<Import>, AppError>;

    /// Remove the import for a data file. Idempotent; returns the number of
    /// records removed (0 or 1).
    async fn delete_by_file_id(&self, file_id: Uuid) -> Result<u64, AppError>;

    /// True when any file linked to the release has an import whose status
    /// is not `complete`.
    async fn has_incomplete_imports(&self, release_id: Uuid) -> Result<bool, AppError>;
}

/// Read-only contract over files linked to a release.
#[async_trait]
pub trait ReleaseFileStore: Send + Sync {
    /// Look up a file within a release.
    async fn get_file(
        &self,
        release_id: Uuid,
        file_id: Uuid,
    ) -> Result<Option<ReleaseFileReference>, AppError>;

    /// Case-insensitive check for an existing, un-replaced file of the given
    /// type and name in the release.
    async fn filename_in_use(
        &self,
        release_id: Uuid,
        file_type: FileType,
        filename: &str,
    ) -> Result<bool, AppError>;

    /// Whether another data file in the release already uses this subject name.
    async fn subject_name_in_use(&self, release_id: Uuid, name: &str) -> Result<bool, AppError>;
}
