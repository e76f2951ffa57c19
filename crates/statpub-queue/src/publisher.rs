use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// The two channels the pipeline publishes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportQueue {
    /// New imports awaiting worker pickup.
    PendingImports,
    /// Cancellation requests for in-flight imports.
    CancellingImports,
}

impl ImportQueue {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportQueue::PendingImports => "pending_imports",
            ImportQueue::CancellingImports => "cancelling_imports",
        }
    }
}

impl Display for ImportQueue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// The message shape the worker consumes. The import id is the whole
/// contract; everything else the worker needs lives on the import record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportMessage {
    pub import_id: Uuid,
}

impl ImportMessage {
    pub fn new(import_id: Uuid) -> Self {
        ImportMessage { import_id }
    }
}

/// Queue operation errors
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Publish to '{queue}' failed: {source}")]
    Publish {
        queue: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("Queue backend error: {0}")]
    Backend(String),
}

/// Publisher contract consumed by the orchestrator.
///
/// Publishing is fire-and-forget: the pipeline never awaits worker
/// completion, and a failed publish is surfaced, not retried (a late
/// duplicate message would risk double processing).
#[async_trait]
pub trait QueuePublisher: Send + Sync {
    /// Publish a message to the given queue.
    async fn publish(&self, queue: ImportQueue, message: &ImportMessage) -> Result<(), QueueError>;

    /// Approximate number of messages waiting on the queue. Advisory only,
    /// for operational dashboards.
    async fn approximate_pending_count(&self, queue: ImportQueue) -> Result<i64, QueueError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_names() {
        assert_eq!(ImportQueue::PendingImports.as_str(), "pending_imports");
        assert_eq!(ImportQueue::CancellingImports.as_str(), "cancelling_imports");
    }

    #[test]
    fn test_message_serializes_to_import_id_only() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(ImportMessage::new(id)).unwrap();
        assert_eq!(json, serde_json::json!({ "import_id": id }));
    }
}
