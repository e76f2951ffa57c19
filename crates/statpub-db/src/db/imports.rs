use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use statpub_core::models::{Import, ImportStatus, NewImport};
use statpub_core::AppError;

use crate::traits::ImportStore;

/// Repository over the `imports` table.
///
/// A partial unique index on `file_id` enforces the one-live-import-per-file
/// invariant at the database level; a second insert for the same file fails
/// rather than silently creating a duplicate.
#[derive(Clone)]
pub struct ImportRepository {
    pool: PgPool,
}

impl ImportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImportStore for ImportRepository {
    #[tracing::instrument(skip(self))]
    async fn create(&self, new_import: NewImport) -> Result<Import, AppError> {
        let import: Import = sqlx::query_as::<Postgres, Import>(
            r#"
            INSERT INTO imports (
                subject_id, file_id, meta_file_id, zip_file_id, status,
                rows, stage_percentage_complete, errors, migrated
            )
            VALUES ($1, $2, $3, $4, $5, $6, 0, '{}', FALSE)
            RETURNING
                id,
                subject_id,
                file_id,
                meta_file_id,
                zip_file_id,
                status,
                rows,
                stage_percentage_complete,
                errors,
                created,
                migrated
            "#,
        )
        .bind(new_import.subject_id)
        .bind(new_import.file_id)
        .bind(new_import.meta_file_id)
        .bind(new_import.zip_file_id)
        .bind(ImportStatus::Queued.to_string())
        .bind(new_import.rows)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                file_id = %new_import.file_id,
                subject_id = %new_import.subject_id,
                "Failed to insert import record"
            );
            AppError::Database(e)
        })?;

        tracing::info!(
            import_id = %import.id,
            file_id = %import.file_id,
            subject_id = %import.subject_id,
            "Import record created"
        );

        Ok(import)
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_file_id(&self, file_id: Uuid) -> Result<Option<Import>, AppError> {
        let import: Option<Import> = sqlx::query_as::<Postgres, Import>(
            r#"
            SELECT
                id,
                subject_id,
                file_id,
                meta_file_id,
                zip_file_id,
                status,
                rows,
                stage_percentage_complete,
                errors,
                created,
                migrated
            FROM imports
            WHERE file_id = $1
            "#,
        )
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(import)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_file_id(&self, file_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM imports WHERE file_id = $1")
            .bind(file_id)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected();
        if removed > 0 {
            tracing::info!(file_id = %file_id, "Import record deleted");
        }

        Ok(removed)
    }

    #[tracing::instrument(skip(self))]
    async fn has_incomplete_imports(&self, release_id: Uuid) -> Result<bool, AppError> {
        let incomplete: bool = sqlx::query_scalar::<Postgres, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM release_files rf
                JOIN imports i ON i.file_id = rf.file_id
                WHERE rf.release_id = $1
                    AND i.status <> $2
            )
            "#,
        )
        .bind(release_id)
        .bind(ImportStatus::Complete.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(incomplete)
    }
}
