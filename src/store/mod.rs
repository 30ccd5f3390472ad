//! Session persistence
//!
//! `SessionStore` is the document-store seam the orchestrator writes through.
//! Two implementations:
//! - `CosmosStore` - Azure Cosmos DB over its REST API
//! - `MemoryStore` - process-local map for tests and local development

mod cosmos;
mod memory;

pub use cosmos::CosmosStore;
pub use memory::MemoryStore;

use crate::session::Session;
use anyhow::Result;

/// Store outcomes callers may want to tell apart
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session document {id} not found in {container}")]
    NotFound { container: String, id: String },

    /// The stored revision changed since it was read
    #[error("session document {id} was modified concurrently")]
    Conflict { id: String },

    #[error("session document has no id")]
    MissingId,

    #[error("document store returned {status}: {body}")]
    Service { status: u16, body: String },
}

/// Document store holding interview sessions, partitioned by `session_id`
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a new session, assigning its `id` if absent
    async fn create(&self, container: &str, session: Session) -> Result<Session>;

    async fn read(&self, container: &str, id: &str, partition_key: &str) -> Result<Session>;

    /// Overwrite the stored session.
    ///
    /// When `session.etag` is set the write only succeeds if the stored
    /// revision still matches, otherwise it fails with `StoreError::Conflict`.
    async fn replace(&self, container: &str, session: Session) -> Result<Session>;

    /// Store name for logging
    fn name(&self) -> &str;
}
