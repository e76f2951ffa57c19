//! Statpub Queue Library
//!
//! The boundary between the synchronous upload pipeline and the
//! out-of-process import worker. The pipeline only publishes: a processing
//! message when an import is created and a cancellation message when a
//! caller requests one. Delivery is at-least-once; the worker must be
//! idempotent against duplicate import ids.

pub mod pg;
pub mod publisher;

pub use pg::{PgQueuePublisher, MESSAGE_NOTIFY_CHANNEL};
pub use publisher::{ImportMessage, ImportQueue, QueueError, QueuePublisher};
