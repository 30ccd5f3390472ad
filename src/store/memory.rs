use super::{SessionStore, StoreError};
use crate::session::Session;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// In-process session store with the same etag semantics as Cosmos
#[derive(Default)]
pub struct MemoryStore {
    /// (container, id) → session
    documents: RwLock<HashMap<(String, String), Session>>,
    revision: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_etag(&self) -> String {
        format!("\"{:016x}\"", self.revision.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Number of documents across all containers
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl SessionStore for MemoryStore {
    async fn create(&self, container: &str, mut session: Session) -> Result<Session> {
        let id = session
            .id
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
            .clone();
        session.etag = Some(self.next_etag());

        debug!("Creating session {} in {}", id, container);

        let mut documents = self.documents.write().await;
        documents.insert((container.to_string(), id), session.clone());
        Ok(session)
    }

    async fn read(&self, container: &str, id: &str, partition_key: &str) -> Result<Session> {
        let documents = self.documents.read().await;
        documents
            .get(&(container.to_string(), id.to_string()))
            .filter(|session| session.session_id == partition_key)
            .cloned()
            .ok_or_else(|| {
                StoreError::NotFound {
                    container: container.to_string(),
                    id: id.to_string(),
                }
                .into()
            })
    }

    async fn replace(&self, container: &str, mut session: Session) -> Result<Session> {
        let id = session.id.clone().ok_or(StoreError::MissingId)?;
        let key = (container.to_string(), id.clone());

        let mut documents = self.documents.write().await;
        let stored = documents
            .get(&key)
            .filter(|stored| stored.session_id == session.session_id)
            .ok_or_else(|| StoreError::NotFound {
                container: container.to_string(),
                id: id.clone(),
            })?;

        if session.etag.is_some() && session.etag != stored.etag {
            return Err(StoreError::Conflict { id }.into());
        }

        session.etag = Some(self.next_etag());
        documents.insert(key, session.clone());
        Ok(session)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Candidate, JobContext, Message};

    fn session() -> Session {
        Session::start(Candidate::default(), JobContext::default(), 0)
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_etag() {
        let store = MemoryStore::new();
        let created = store.create("sessions", session()).await.unwrap();

        assert!(created.id.is_some());
        assert!(created.etag.is_some());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_read_requires_matching_partition_key() {
        let store = MemoryStore::new();
        let created = store.create("sessions", session()).await.unwrap();
        let id = created.id.clone().unwrap();

        let loaded = store
            .read("sessions", &id, &created.session_id)
            .await
            .unwrap();
        assert_eq!(loaded, created);

        let err = store.read("sessions", &id, "other").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::NotFound { .. })
        ));

        assert!(store
            .read("archive", &id, &created.session_id)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_replace_with_stale_etag_conflicts() {
        let store = MemoryStore::new();
        let created = store.create("sessions", session()).await.unwrap();

        let mut first = created.clone();
        first.push(Message::user("first"));
        store.replace("sessions", first).await.unwrap();

        let mut second = created;
        second.push(Message::user("second"));
        let err = store.replace("sessions", second).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn test_replace_without_etag_overwrites() {
        let store = MemoryStore::new();
        let created = store.create("sessions", session()).await.unwrap();

        let mut updated = created.clone();
        updated.etag = None;
        updated.push(Message::assistant("hello"));
        let saved = store.replace("sessions", updated).await.unwrap();

        assert_ne!(saved.etag, created.etag);
        let loaded = store
            .read("sessions", created.id.as_deref().unwrap(), &created.session_id)
            .await
            .unwrap();
        assert_eq!(loaded.transcript_len(), 3);
    }

    #[tokio::test]
    async fn test_replace_unknown_document() {
        let store = MemoryStore::new();
        let mut orphan = session();
        orphan.id = Some("missing".to_string());

        assert!(store.replace("sessions", orphan).await.is_err());
    }
}
