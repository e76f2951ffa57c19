//! Postgres-backed queue publisher.
//!
//! Messages are rows in `import_messages`; workers either poll the table or
//! LISTEN on the notify channel to wake immediately. The insert and the
//! notify share a transaction so a worker can never be woken for a message
//! that was not committed.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::publisher::{ImportMessage, ImportQueue, QueueError, QueuePublisher};

/// Channel name for PostgreSQL LISTEN/NOTIFY when a message is published.
pub const MESSAGE_NOTIFY_CHANNEL: &str = "statpub_import_message";

#[derive(Clone)]
pub struct PgQueuePublisher {
    pool: PgPool,
}

impl PgQueuePublisher {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueuePublisher for PgQueuePublisher {
    #[tracing::instrument(skip(self), fields(queue = %queue, import_id = %message.import_id))]
    async fn publish(&self, queue: ImportQueue, message: &ImportMessage) -> Result<(), QueueError> {
        let payload = serde_json::to_value(message).map_err(|e| QueueError::Publish {
            queue: queue.as_str(),
            source: e.into(),
        })?;

        let mut tx = self.pool.begin().await.map_err(|e| QueueError::Publish {
            queue: queue.as_str(),
            source: e.into(),
        })?;

        sqlx::query(
            r#"
            INSERT INTO import_messages (queue, payload, status)
            VALUES ($1, $2, 'pending')
            "#,
        )
        .bind(queue.as_str())
        .bind(payload)
        .execute(&mut *tx)
        .await
        .map_err(|e| QueueError::Publish {
            queue: queue.as_str(),
            source: e.into(),
        })?;

        // Wake listening workers immediately instead of waiting for their
        // poll interval. Non-fatal: workers fall back to polling.
        if let Err(e) = sqlx::query("SELECT pg_notify($1, '')")
            .bind(MESSAGE_NOTIFY_CHANNEL)
            .execute(&mut *tx)
            .await
        {
            tracing::warn!(
                error = %e,
                import_id = %message.import_id,
                "Failed to send pg_notify for queue message, workers will discover it via polling"
            );
        }

        tx.commit().await.map_err(|e| QueueError::Publish {
            queue: queue.as_str(),
            source: e.into(),
        })?;

        tracing::info!(
            queue = %queue,
            import_id = %message.import_id,
            "Import message published"
        );

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn approximate_pending_count(&self, queue: ImportQueue) -> Result<i64, QueueError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM import_messages
            WHERE queue = $1 AND status = 'pending'
            "#,
        )
        .bind(queue.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| QueueError::Backend(e.to_string()))?;

        Ok(count)
    }
}
