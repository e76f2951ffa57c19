//! Import status reporting.
//!
//! Derives the caller-facing view of an import's progress. Reads are
//! eventually consistent with the worker: a status fetched immediately
//! after submission will typically still be `queued`.

use std::sync::Arc;

use uuid::Uuid;

use statpub_core::models::{ImportStatus, ImportView};
use statpub_core::AppError;
use statpub_db::ImportStore;

pub struct ImportStatusService {
    imports: Arc<dyn ImportStore>,
}

impl ImportStatusService {
    pub fn new(imports: Arc<dyn ImportStore>) -> Self {
        Self { imports }
    }

    /// The lifecycle state for a data file, or the `NotFound` sentinel when
    /// no import record exists.
    #[tracing::instrument(skip(self))]
    pub async fn get_status(&self, file_id: Uuid) -> Result<ImportStatus, AppError> {
        let import = self.imports.get_by_file_id(file_id).await?;
        Ok(import
            .map(|i| i.status)
            .unwrap_or(ImportStatus::NotFound))
    }

    /// Progress view for a data file: worker errors, overall and stage-local
    /// percentages, row count, and status.
    #[tracing::instrument(skip(self))]
    pub async fn get_import_view(&self, file_id: Uuid) -> Result<ImportView, AppError> {
        let import = self.imports.get_by_file_id(file_id).await?;
        Ok(import
            .map(|i| ImportView::from(&i))
            .unwrap_or_else(ImportView::not_found))
    }
}
