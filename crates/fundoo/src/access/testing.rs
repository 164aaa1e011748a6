//! Shared fixture for access and service tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::mpsc;

use fundoo_core::cache::{Cache, CacheError};
use fundoo_core::notes::{RegisterUserRequest, UserProfile};
use fundoo_core::notify::{EmailMessage, Notifier, NotifyError};

use super::{CollabAccess, LabelAccess, NoteAccess, UserAccess};
use crate::auth::Argon2Hasher;
use crate::cache::MemoryCache;
use crate::files::LocalFileStore;
use crate::storage::InMemoryRepository;

pub(crate) const TTL: Duration = Duration::from_secs(30 * 60);

/// Notifier that hands every message to a channel.
pub(crate) struct ChannelNotifier(pub mpsc::UnboundedSender<EmailMessage>);

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        self.0
            .send(message.clone())
            .map_err(|e| NotifyError::DeliveryFailed(e.to_string()))
    }
}

/// Cache whose every call fails, as when the server is unreachable.
pub(crate) struct UnavailableCache;

impl UnavailableCache {
    fn failure<T>() -> fundoo_core::cache::Result<T> {
        Err(CacheError::OperationFailed("cache unavailable".to_string()))
    }
}

#[async_trait]
impl Cache for UnavailableCache {
    async fn get(&self, _key: &str) -> fundoo_core::cache::Result<Option<Vec<u8>>> {
        Self::failure()
    }

    async fn set(
        &self,
        _key: &str,
        _value: &[u8],
        _ttl: Option<Duration>,
    ) -> fundoo_core::cache::Result<()> {
        Self::failure()
    }

    async fn delete(&self, _key: &str) -> fundoo_core::cache::Result<()> {
        Self::failure()
    }

    async fn list_push(&self, _key: &str, _value: &[u8]) -> fundoo_core::cache::Result<()> {
        Self::failure()
    }

    async fn list_range(&self, _key: &str) -> fundoo_core::cache::Result<Vec<Vec<u8>>> {
        Self::failure()
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> fundoo_core::cache::Result<()> {
        Self::failure()
    }
}

pub(crate) fn alice_request() -> RegisterUserRequest {
    RegisterUserRequest {
        first_name: "Alice".to_string(),
        last_name: "Smith".to_string(),
        email: "alice@example.com".to_string(),
        password: "Abcdef1".to_string(),
    }
}

pub(crate) fn bob_request() -> RegisterUserRequest {
    RegisterUserRequest {
        first_name: "Bob".to_string(),
        last_name: "Jones".to_string(),
        email: "bob@example.com".to_string(),
        password: "Abcdef1".to_string(),
    }
}

/// Fast hasher for tests.
pub(crate) fn test_hasher() -> Arc<Argon2Hasher> {
    Arc::new(Argon2Hasher::with_params(argon2::Params::MIN_M_COST, 1, 1).unwrap())
}

/// Every access service over one in-memory store and a shared cache.
pub(crate) struct Fixture<C: Cache = MemoryCache> {
    pub repository: Arc<InMemoryRepository>,
    pub cache: Arc<C>,
    pub users: UserAccess<InMemoryRepository, C>,
    pub notes: NoteAccess<InMemoryRepository, C>,
    pub labels: LabelAccess<InMemoryRepository, C>,
    pub collabs: CollabAccess<InMemoryRepository, C>,
    pub uploads: TempDir,
    emails: mpsc::UnboundedReceiver<EmailMessage>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_cache(Arc::new(MemoryCache::new(1_000)))
    }
}

impl<C: Cache> Fixture<C> {
    pub fn with_cache(cache: Arc<C>) -> Self {
        let repository = Arc::new(InMemoryRepository::new());
        let uploads = tempfile::tempdir().unwrap();
        let (tx, emails) = mpsc::unbounded_channel();

        Self {
            users: UserAccess::new(repository.clone(), cache.clone(), TTL)
                .with_hasher(test_hasher())
                .with_notifier(Arc::new(ChannelNotifier(tx))),
            notes: NoteAccess::new(
                repository.clone(),
                cache.clone(),
                Arc::new(LocalFileStore::new(uploads.path())),
                TTL,
            ),
            labels: LabelAccess::new(repository.clone(), cache.clone(), TTL),
            collabs: CollabAccess::new(repository.clone(), cache.clone(), TTL),
            repository,
            cache,
            uploads,
            emails,
        }
    }

    pub async fn register_alice(&self) -> UserProfile {
        self.users
            .register(alice_request())
            .await
            .unwrap()
            .data
            .unwrap()
    }

    /// Waits for the next background email.
    pub async fn next_email(&mut self) -> EmailMessage {
        tokio::time::timeout(Duration::from_secs(5), self.emails.recv())
            .await
            .unwrap()
            .unwrap()
    }
}
