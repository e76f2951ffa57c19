//! Import orchestration.
//!
//! The submission path is all-or-nothing: no validation rule may have failed
//! by the time an import record exists, and no record exists without exactly
//! one processing message having been attempted. A publish failure after
//! record creation leaves an orphaned `queued` record; that condition is
//! logged at error level for alerting and surfaced to the caller rather
//! than retried, since a late duplicate message would risk double
//! processing.

use std::sync::Arc;

use uuid::Uuid;

use statpub_core::models::{FileType, Import, NewImport, UploadedFile};
use statpub_core::AppError;
use statpub_db::{ImportStore, ReleaseFileStore};
use statpub_processing::UploadValidator;
use statpub_queue::{ImportMessage, ImportQueue, QueuePublisher};

pub struct DataImportService {
    imports: Arc<dyn ImportStore>,
    release_files: Arc<dyn ReleaseFileStore>,
    queue: Arc<dyn QueuePublisher>,
    validator: UploadValidator,
}

impl DataImportService {
    pub fn new(
        imports: Arc<dyn ImportStore>,
        release_files: Arc<dyn ReleaseFileStore>,
        queue: Arc<dyn QueuePublisher>,
        validator: UploadValidator,
    ) -> Self {
        Self {
            imports,
            release_files,
            queue,
            validator,
        }
    }

    /// Submit a loose data/metadata pair for import.
    ///
    /// Validates the pair, counts the data file's rows, creates the import
    /// record with status `queued`, and publishes one processing message.
    #[tracing::instrument(
        skip(self, data, meta),
        fields(data_file = %data.filename, meta_file = %meta.filename)
    )]
    pub async fn import(
        &self,
        release_id: Uuid,
        subject_id: Uuid,
        data: &UploadedFile,
        meta: &UploadedFile,
    ) -> Result<Import, AppError> {
        self.validator
            .validate_data_set_pair(release_id, data, meta)
            .await?;

        // Counting is proportional to file size; keep it off the async workers.
        let counted = data.clone();
        let rows = tokio::task::spawn_blocking(move || counted.line_count())
            .await
            .map_err(|e| AppError::Internal(format!("Row counting task failed: {}", e)))?;

        let import = self
            .imports
            .create(NewImport {
                subject_id,
                file_id: data.id,
                meta_file_id: meta.id,
                zip_file_id: None,
                rows: Some(rows),
            })
            .await?;

        self.publish_pending(&import).await?;

        tracing::info!(
            import_id = %import.id,
            file_id = %import.file_id,
            rows = rows,
            "Data set import queued"
        );

        Ok(import)
    }

    /// Submit a zipped data set for import.
    ///
    /// `data` and `meta` are the extracted entries as persisted by the
    /// caller; `zip` is the original archive, retained for traceability.
    /// Row counting is deferred to the worker, which has the unpacked files.
    #[tracing::instrument(
        skip(self, data, meta, zip),
        fields(zip_file = %zip.filename)
    )]
    pub async fn import_archive(
        &self,
        release_id: Uuid,
        subject_id: Uuid,
        data: &UploadedFile,
        meta: &UploadedFile,
        zip: &UploadedFile,
    ) -> Result<Import, AppError> {
        self.validator
            .validate_data_archive(release_id, zip)
            .await?;

        let import = self
            .imports
            .create(NewImport {
                subject_id,
                file_id: data.id,
                meta_file_id: meta.id,
                zip_file_id: Some(zip.id),
                rows: None,
            })
            .await?;

        self.publish_pending(&import).await?;

        tracing::info!(
            import_id = %import.id,
            file_id = %import.file_id,
            zip_file_id = %zip.id,
            "Archived data set import queued"
        );

        Ok(import)
    }

    /// Request cancellation of a running import.
    ///
    /// Verifies the file belongs to the release and is a data file, then
    /// publishes a cancellation message referencing the import. The status
    /// is not changed here; the worker observes the message and moves the
    /// record through `cancelling` to `cancelled`.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, release_id: Uuid, file_id: Uuid) -> Result<(), AppError> {
        let file = self
            .release_files
            .get_file(release_id, file_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("File {} is not part of release {}", file_id, release_id))
            })?;

        if file.file_type != FileType::Data {
            return Err(AppError::InvalidInput(format!(
                "Cancellation target must be a data file, got {}",
                file.file_type
            )));
        }

        let import = self
            .imports
            .get_by_file_id(file_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No import exists for file {}", file_id)))?;

        self.queue
            .publish(
                ImportQueue::CancellingImports,
                &ImportMessage::new(import.id),
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    import_id = %import.id,
                    error = %e,
                    "Failed to publish cancellation message"
                );
                AppError::Queue(e.to_string())
            })?;

        tracing::info!(import_id = %import.id, file_id = %file_id, "Import cancellation requested");

        Ok(())
    }

    /// Remove the import record for a data file. No-op when none exists.
    #[tracing::instrument(skip(self))]
    pub async fn delete_import(&self, file_id: Uuid) -> Result<(), AppError> {
        self.imports.delete_by_file_id(file_id).await?;
        Ok(())
    }

    /// Whether any file linked to the release has an unfinished import.
    #[tracing::instrument(skip(self))]
    pub async fn has_incomplete_imports(&self, release_id: Uuid) -> Result<bool, AppError> {
        self.imports.has_incomplete_imports(release_id).await
    }

    async fn publish_pending(&self, import: &Import) -> Result<(), AppError> {
        self.queue
            .publish(ImportQueue::PendingImports, &ImportMessage::new(import.id))
            .await
            .map_err(|e| {
                tracing::error!(
                    import_id = %import.id,
                    file_id = %import.file_id,
                    error = %e,
                    "Failed to publish processing message; import record is orphaned in queued state and needs operator intervention"
                );
                AppError::Queue(e.to_string())
            })
    }
}
