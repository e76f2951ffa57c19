//! In-memory implementations of the pipeline's seams for service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use statpub_core::models::{
    FileType, Import, ImportStatus, NewImport, ReleaseFileReference, UploadedFile,
};
use statpub_core::{AppError, Config};
use statpub_db::{ImportStore, ReleaseFileStore};
use statpub_queue::{ImportMessage, ImportQueue, QueueError, QueuePublisher};
use statpub_storage::{Storage, StorageError, StorageResult};

/// Blob store with nothing in it; uploads in these tests are always new.
#[derive(Default)]
pub struct EmptyStorage;

#[async_trait]
impl Storage for EmptyStorage {
    async fn exists(&self, _storage_key: &str) -> StorageResult<bool> {
        Ok(false)
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        Err(StorageError::NotFound(storage_key.to_string()))
    }

    async fn download_stream(
        &self,
        storage_key: &str,
    ) -> StorageResult<
        std::pin::Pin<
            Box<dyn futures::Stream<Item = Result<bytes::Bytes, StorageError>> + Send>,
        >,
    > {
        Err(StorageError::NotFound(storage_key.to_string()))
    }

    async fn content_length(&self, storage_key: &str) -> StorageResult<u64> {
        Err(StorageError::NotFound(storage_key.to_string()))
    }

    async fn delete(&self, _storage_key: &str) -> StorageResult<()> {
        Ok(())
    }
}

/// Import store over a mutex-guarded map keyed by file id. Mirrors the
/// database's one-live-import-per-file constraint by rejecting duplicate
/// creates.
#[derive(Default)]
pub struct FakeImportStore {
    imports: Mutex<HashMap<Uuid, Import>>,
}

impl FakeImportStore {
    pub fn insert(&self, import: Import) {
        self.imports
            .lock()
            .unwrap()
            .insert(import.file_id, import);
    }

    pub fn count(&self) -> usize {
        self.imports.lock().unwrap().len()
    }
}

#[async_trait]
impl ImportStore for FakeImportStore {
    async fn create(&self, new_import: NewImport) -> Result<Import, AppError> {
        let mut imports = self.imports.lock().unwrap();
        if imports.contains_key(&new_import.file_id) {
            return Err(AppError::Internal(format!(
                "duplicate import for file {}",
                new_import.file_id
            )));
        }
        let import = Import {
            id: Uuid::new_v4(),
            subject_id: new_import.subject_id,
            file_id: new_import.file_id,
            meta_file_id: new_import.meta_file_id,
            zip_file_id: new_import.zip_file_id,
            status: ImportStatus::Queued,
            rows: new_import.rows,
            stage_percentage_complete: 0,
            errors: Vec::new(),
            created: Utc::now(),
            migrated: false,
        };
        imports.insert(import.file_id, import.clone());
        Ok(import)
    }

    async fn get_by_file_id(&self, file_id: Uuid) -> Result<Option<Import>, AppError> {
        Ok(self.imports.lock().unwrap().get(&file_id).cloned())
    }

    async fn delete_by_file_id(&self, file_id: Uuid) -> Result<u64, AppError> {
        let removed = self.imports.lock().unwrap().remove(&file_id);
        Ok(removed.map(|_| 1).unwrap_or(0))
    }

    async fn has_incomplete_imports(&self, _release_id: Uuid) -> Result<bool, AppError> {
        Ok(self
            .imports
            .lock()
            .unwrap()
            .values()
            .any(|i| i.status.is_incomplete()))
    }
}

/// Release file store over a vector of references.
#[derive(Default)]
pub struct FakeReleaseFiles {
    files: Vec<ReleaseFileReference>,
}

impl FakeReleaseFiles {
    pub fn with_file(mut self, release_id: Uuid, file_id: Uuid, file_type: FileType, filename: &str) -> Self {
        self.files.push(ReleaseFileReference {
            id: file_id,
            release_id,
            filename: filename.to_string(),
            file_type,
            replaced_by: None,
            created: Utc::now(),
        });
        self
    }
}

#[async_trait]
impl ReleaseFileStore for FakeReleaseFiles {
    async fn get_file(
        &self,
        release_id: Uuid,
        file_id: Uuid,
    ) -> Result<Option<ReleaseFileReference>, AppError> {
        Ok(self
            .files
            .iter()
            .find(|f| f.release_id == release_id && f.id == file_id)
            .cloned())
    }

    async fn filename_in_use(
        &self,
        release_id: Uuid,
        file_type: FileType,
        filename: &str,
    ) -> Result<bool, AppError> {
        Ok(self.files.iter().any(|f| {
            f.release_id == release_id
                && f.file_type == file_type
                && f.filename.eq_ignore_ascii_case(filename)
                && f.replaced_by.is_none()
        }))
    }

    async fn subject_name_in_use(&self, _release_id: Uuid, _name: &str) -> Result<bool, AppError> {
        Ok(false)
    }
}

/// Queue publisher that records every message, optionally failing publishes.
#[derive(Default)]
pub struct FakeQueue {
    pub published: Mutex<Vec<(ImportQueue, ImportMessage)>>,
    pub fail_publish: bool,
}

impl FakeQueue {
    pub fn failing() -> Self {
        FakeQueue {
            published: Mutex::new(Vec::new()),
            fail_publish: true,
        }
    }

    pub fn messages(&self) -> Vec<(ImportQueue, ImportMessage)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueuePublisher for FakeQueue {
    async fn publish(&self, queue: ImportQueue, message: &ImportMessage) -> Result<(), QueueError> {
        if self.fail_publish {
            return Err(QueueError::Publish {
                queue: queue.as_str(),
                source: anyhow::anyhow!("queue unavailable"),
            });
        }
        self.published.lock().unwrap().push((queue, message.clone()));
        Ok(())
    }

    async fn approximate_pending_count(&self, queue: ImportQueue) -> Result<i64, QueueError> {
        Ok(self
            .published
            .lock()
            .unwrap()
            .iter()
            .filter(|(q, _)| *q == queue)
            .count() as i64)
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/statpub_test".to_string(),
        db_max_connections: 5,
        db_timeout_seconds: 5,
        environment: "test".to_string(),
        max_ancillary_file_size_bytes: 1024 * 1024,
        max_chart_file_size_bytes: 1024 * 1024,
        ancillary_allowed_mime_types: vec!["application/pdf".to_string()],
        chart_allowed_mime_types: vec!["image/png".to_string()],
    }
}

pub fn csv_upload(filename: &str, content: &str) -> UploadedFile {
    UploadedFile::new(Uuid::new_v4(), filename, content.as_bytes().to_vec())
}
