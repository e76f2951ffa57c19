use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use statpub_core::models::{FileType, ReleaseFileReference};
use statpub_core::AppError;

use crate::traits::ReleaseFileStore;

/// Read-only repository over the `release_files` link table.
#[derive(Clone)]
pub struct ReleaseFileRepository {
    pool: PgPool,
}

impl ReleaseFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReleaseFileStore for ReleaseFileRepository {
    #[tracing::instrument(skip(self))]
    async fn get_file(
        &self,
        release_id: Uuid,
        file_id: Uuid,
    ) -> Result<Option<ReleaseFileReference>, AppError> {
        let file: Option<ReleaseFileReference> =
            sqlx::query_as::<Postgres, ReleaseFileReference>(
                r#"
                SELECT
                    id,
                    release_id,
                    filename,
                    file_type,
                    replaced_by,
                    created
                FROM release_files
                WHERE release_id = $1 AND id = $2
                "#,
            )
            .bind(release_id)
            .bind(file_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(file)
    }

    #[tracing::instrument(skip(self))]
    async fn filename_in_use(
        &self,
        release_id: Uuid,
        file_type: FileType,
        filename: &str,
    ) -> Result<bool, AppError> {
        // Replaced files do not block reuse of their filename.
        let in_use: bool = sqlx::query_scalar::<Postgres, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM release_files
                WHERE release_id = $1
                    AND file_type = $2
                    AND LOWER(filename) = LOWER($3)
                    AND replaced_by IS NULL
            )
            "#,
        )
        .bind(release_id)
        .bind(file_type.to_string())
        .bind(filename)
        .fetch_one(&self.pool)
        .await?;

        Ok(in_use)
    }

    #[tracing::instrument(skip(self))]
    async fn subject_name_in_use(&self, release_id: Uuid, name: &str) -> Result<bool, AppError> {
        let in_use: bool = sqlx::query_scalar::<Postgres, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM release_files
                WHERE release_id = $1
                    AND file_type = $2
                    AND LOWER(subject_name) = LOWER($3)
                    AND replaced_by IS NULL
            )
            "#,
        )
        .bind(release_id)
        .bind(FileType::Data.to_string())
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(in_use)
    }
}
