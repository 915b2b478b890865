//! Session management
//!
//! A session binds a browser cookie to an authenticated [`ObjectStore`].
//! Sessions live in memory only and expire after a period of inactivity.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use jiff::{SignedDuration, Timestamp};
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::models::ConnectionCredentials;
use crate::traits::{ObjectStore, StoreConnector};

/// A connected browser session
#[derive(Clone)]
pub struct Session {
    /// Random session identifier, also the cookie value
    pub id: String,

    /// Normalized endpoint URL
    pub endpoint: String,

    /// Region the client signs for
    pub region: String,

    /// Whether the endpoint was requested over TLS
    pub use_ssl: bool,

    /// Authenticated storage client
    pub store: Arc<dyn ObjectStore>,

    pub created_at: Timestamp,
    pub last_used: Timestamp,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("use_ssl", &self.use_ssl)
            .field("created_at", &self.created_at)
            .field("last_used", &self.last_used)
            .finish_non_exhaustive()
    }
}

/// In-memory session table
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Session>>,
    connector: Arc<dyn StoreConnector>,
    config: SessionConfig,
    shutdown: watch::Sender<bool>,
}

impl SessionManager {
    /// Create a manager that builds stores through `connector`
    pub fn new(connector: Arc<dyn StoreConnector>, config: SessionConfig) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            sessions: RwLock::new(HashMap::new()),
            connector,
            config,
            shutdown,
        }
    }

    /// Session settings in effect
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Validate credentials, test the connection and register a new session
    pub async fn create(&self, credentials: &ConnectionCredentials) -> Result<Session> {
        credentials.validate()?;
        let endpoint = credentials.normalized_endpoint()?;

        let store = self.connector.connect(credentials).await?;

        let timeout = Duration::from_secs(self.config.connect_timeout_secs);
        match tokio::time::timeout(timeout, store.list_buckets()).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(Error::Network(format!("connection test failed: {e}"))),
            Err(_) => {
                return Err(Error::Network(format!(
                    "connection test failed: no response within {}s",
                    timeout.as_secs()
                )));
            }
        }

        let now = Timestamp::now();
        let session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            endpoint,
            region: credentials.region.clone(),
            use_ssl: credentials.use_ssl,
            store,
            created_at: now,
            last_used: now,
        };

        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());

        tracing::info!(session_id = %session.id, "Session created");
        Ok(session)
    }

    /// Look up a session and mark it as used
    pub async fn get(&self, id: &str) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id)?;
        session.last_used = Timestamp::now();
        Some(session.clone())
    }

    /// Remove a session, returning whether it existed
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session destroyed");
        }
        removed
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Remove sessions idle for longer than the TTL
    pub async fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_at(Timestamp::now()).await
    }

    async fn cleanup_expired_at(&self, now: Timestamp) -> usize {
        let ttl_secs = i64::try_from(self.config.ttl_secs).unwrap_or(i64::MAX);
        let ttl = SignedDuration::from_secs(ttl_secs);
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, session| {
            let keep = now.duration_since(session.last_used) <= ttl;
            if !keep {
                tracing::info!(session_id = %id, "Session expired and removed");
            }
            keep
        });

        before - sessions.len()
    }

    /// Run [`cleanup_expired`](Self::cleanup_expired) periodically until [`shutdown`](Self::shutdown)
    pub fn spawn_cleanup(self: &Arc<Self>) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        let mut shutdown = self.shutdown.subscribe();
        let period = Duration::from_secs(self.config.cleanup_interval_secs.max(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = manager.cleanup_expired().await;
                        tracing::debug!(removed, "Session cleanup finished");
                    }
                    _ = shutdown.changed() => break,
                }
            }
            tracing::debug!("Session cleanup stopped");
        })
    }

    /// Stop the background cleanup task
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockObjectStore, MockStoreConnector};

    fn credentials() -> ConnectionCredentials {
        ConnectionCredentials::new("localhost:9000", "minioadmin", "minioadmin", "us-east-1")
    }

    fn healthy_connector() -> MockStoreConnector {
        let mut connector = MockStoreConnector::new();
        connector.expect_connect().returning(|_| {
            let mut store = MockObjectStore::new();
            store.expect_list_buckets().returning(|| Ok(vec![]));
            Ok(Arc::new(store) as Arc<dyn ObjectStore>)
        });
        connector
    }

    fn manager(connector: MockStoreConnector) -> SessionManager {
        SessionManager::new(Arc::new(connector), SessionConfig::default())
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let manager = manager(healthy_connector());

        let session = manager.create(&credentials()).await.unwrap();
        assert_eq!(session.endpoint, "http://localhost:9000");
        assert_eq!(session.region, "us-east-1");
        assert!(uuid::Uuid::parse_str(&session.id).is_ok());

        let found = manager.get(&session.id).await.unwrap();
        assert_eq!(found.id, session.id);
        assert!(found.last_used >= session.last_used);
        assert_eq!(manager.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_session() {
        let manager = manager(healthy_connector());
        assert!(manager.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_missing_fields() {
        let mut connector = MockStoreConnector::new();
        connector.expect_connect().never();
        let manager = manager(connector);

        let mut creds = credentials();
        creds.secret_key.clear();

        let err = manager.create(&creds).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(manager.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_fails_when_listing_fails() {
        let mut connector = MockStoreConnector::new();
        connector.expect_connect().returning(|_| {
            let mut store = MockObjectStore::new();
            store
                .expect_list_buckets()
                .returning(|| Err(Error::AccessDenied("InvalidAccessKeyId".into())));
            Ok(Arc::new(store) as Arc<dyn ObjectStore>)
        });
        let manager = manager(connector);

        let err = manager.create(&credentials()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "connection test failed: InvalidAccessKeyId"
        );
        assert!(manager.is_empty().await);
    }

    /// Store whose bucket listing never completes
    struct StalledStore;

    #[async_trait::async_trait]
    impl ObjectStore for StalledStore {
        async fn list_buckets(&self) -> Result<Vec<crate::traits::BucketInfo>> {
            std::future::pending().await
        }
        async fn create_bucket(&self, _: &str) -> Result<()> {
            Ok(())
        }
        async fn delete_bucket(&self, _: &str) -> Result<()> {
            Ok(())
        }
        async fn list_objects(
            &self,
            _: &str,
            _: crate::traits::ListOptions,
        ) -> Result<crate::traits::ListResult> {
            Ok(Default::default())
        }
        async fn get_object(&self, _: &str, _: &str) -> Result<crate::traits::ObjectBody> {
            Err(Error::NotFound("Object not found".into()))
        }
        async fn put_object(
            &self,
            bucket: &str,
            key: &str,
            _: Vec<u8>,
            _: Option<String>,
        ) -> Result<crate::traits::ObjectInfo> {
            Err(Error::NotFound(format!("{bucket}/{key}")))
        }
        async fn delete_object(&self, _: &str, _: &str) -> Result<()> {
            Ok(())
        }
        async fn presigned_get_url(
            &self,
            _: &str,
            _: &str,
            _: &str,
            _: Duration,
        ) -> Result<String> {
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn test_create_times_out_when_listing_hangs() {
        let mut connector = MockStoreConnector::new();
        connector
            .expect_connect()
            .returning(|_| Ok(Arc::new(StalledStore) as Arc<dyn ObjectStore>));

        let mut config = SessionConfig::default();
        config.connect_timeout_secs = 1;
        let manager = SessionManager::new(Arc::new(connector), config);

        let err = manager.create(&credentials()).await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
        assert_eq!(
            err.to_string(),
            "connection test failed: no response within 1s"
        );
        assert!(manager.is_empty().await);
    }

    #[tokio::test]
    async fn test_remove() {
        let manager = manager(healthy_connector());
        let session = manager.create(&credentials()).await.unwrap();

        assert!(manager.remove(&session.id).await);
        assert!(!manager.remove(&session.id).await);
        assert!(manager.get(&session.id).await.is_none());
    }

    #[tokio::test]
    async fn test_cleanup_removes_idle_sessions() {
        let manager = manager(healthy_connector());
        let session = manager.create(&credentials()).await.unwrap();

        assert_eq!(manager.cleanup_expired().await, 0);

        let later = session
            .last_used
            .checked_add(SignedDuration::from_hours(25))
            .unwrap();
        assert_eq!(manager.cleanup_expired_at(later).await, 1);
        assert!(manager.is_empty().await);
    }

    #[tokio::test]
    async fn test_cleanup_with_huge_ttl_keeps_sessions() {
        let mut config = SessionConfig::default();
        config.ttl_secs = u64::MAX;
        let manager = SessionManager::new(Arc::new(healthy_connector()), config);
        let session = manager.create(&credentials()).await.unwrap();

        let later = session
            .last_used
            .checked_add(SignedDuration::from_hours(24 * 365))
            .unwrap();
        assert_eq!(manager.cleanup_expired_at(later).await, 0);
        assert_eq!(manager.len().await, 1);
    }

    #[tokio::test]
    async fn test_cleanup_task_stops_on_shutdown() {
        let manager = Arc::new(manager(healthy_connector()));
        let handle = manager.spawn_cleanup();

        manager.shutdown();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("cleanup task did not stop")
            .unwrap();
    }
}
