//! Authentication session holder: owns "who is the current actor" for the
//! lifetime of the process. Constructed once by an async factory and passed
//! by reference to whatever needs it; there is no ambient global.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::models::{User, UserCreate, UserLogin};

/// Durable storage for the bearer token, the desktop analogue of the
/// browser's local storage. Load/clear are best-effort; a missing or
/// unreadable token just means an anonymous session.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Option<String>;
    async fn save(&self, token: &str) -> Result<()>;
    async fn clear(&self);
}

/// Token persisted as a plain file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Option<String> {
        let contents = tokio::fs::read_to_string(&self.path).await.ok()?;
        let token = contents.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    async fn save(&self, token: &str) -> Result<()> {
        tokio::fs::write(&self.path, token)
            .await
            .with_context(|| format!("Failed to write token file {}", self.path.display()))
    }

    async fn clear(&self) {
        if let Err(err) = tokio::fs::remove_file(&self.path).await {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove token file: {}", err);
            }
        }
    }
}

/// In-memory store, for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|slot| slot.clone())
    }

    async fn save(&self, token: &str) -> Result<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
        Ok(())
    }

    async fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

/// The current actor. Overlapping login attempts are last-write-wins; the
/// struct is `&mut`-threaded, so callers serialize naturally.
pub struct Session {
    api: ApiClient,
    store: Box<dyn TokenStore>,
    user: Option<User>,
}

impl Session {
    /// One-shot async factory. If a stored token exists it is exchanged
    /// for the current user; any failure (expired or invalid token)
    /// discards the token and yields an anonymous session. Never fails.
    pub async fn initialize(api: ApiClient, store: Box<dyn TokenStore>) -> Self {
        let mut session = Self {
            api,
            store,
            user: None,
        };

        if let Some(token) = session.store.load().await {
            session.api.set_token(token);
            match session.api.current_user().await {
                Ok(user) => {
                    debug!("restored session for {}", user.email);
                    session.user = Some(user);
                }
                Err(err) => {
                    info!("stored token rejected ({}), starting anonymous", err);
                    session.api.clear_token();
                    session.store.clear().await;
                }
            }
        }

        session
    }

    /// Exchange credentials for a token, persist it, then fetch and hold
    /// the current user. Rejected credentials surface as
    /// `ApiError::Authentication`.
    pub async fn login(&mut self, email: &str, password: &str) -> ApiResult<&User> {
        let credentials = UserLogin {
            email: email.to_string(),
            password: password.to_string(),
        };
        let token = self.api.login(&credentials).await?;
        self.api.set_token(token.access_token.as_str());
        if let Err(err) = self.store.save(&token.access_token).await {
            // Session still works for this page load; only durability is lost.
            warn!("failed to persist access token: {:#}", err);
        }

        let user = self.api.current_user().await?;
        info!("logged in as {}", user.email);
        Ok(self.user.insert(user))
    }

    /// Create the account, then immediately log in with the same
    /// credentials. There is no separate confirmation step.
    pub async fn register(&mut self, new_user: UserCreate) -> ApiResult<&User> {
        let email = new_user.email.clone();
        let password = new_user.password.clone();
        self.api.register(&new_user).await?;
        self.login(&email, &password).await
    }

    /// Drop the token (client and store) and the in-memory user. Purely
    /// local; the server is not told.
    pub async fn logout(&mut self) {
        self.api.clear_token();
        self.store.clear().await;
        self.user = None;
        info!("logged out");
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether host-only UI branches should be shown. Advisory: the server
    /// gates the actual operations.
    pub fn is_host(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.is_host)
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load().await, None);
        store.save("tok-1").await.unwrap();
        assert_eq!(store.load().await, Some("tok-1".to_string()));
        store.clear().await;
        assert_eq!(store.load().await, None);
    }

    #[tokio::test]
    async fn file_store_round_trip() {
        let path = std::env::temp_dir().join(format!("stayhub-token-{}", std::process::id()));
        let store = FileTokenStore::new(&path);

        assert_eq!(store.load().await, None);
        store.save("tok-2").await.unwrap();
        assert_eq!(store.load().await, Some("tok-2".to_string()));
        store.clear().await;
        assert_eq!(store.load().await, None);
        // Clearing twice must stay silent.
        store.clear().await;
    }

    #[tokio::test]
    async fn file_store_ignores_blank_token_files() {
        let path = std::env::temp_dir().join(format!("stayhub-blank-{}", std::process::id()));
        tokio::fs::write(&path, "  \n").await.unwrap();
        let store = FileTokenStore::new(&path);
        assert_eq!(store.load().await, None);
        store.clear().await;
    }

    #[tokio::test]
    async fn initialize_without_token_is_anonymous_and_offline() {
        // No stored token: the factory must not touch the network at all,
        // so an unroutable base URL is fine here.
        let api = ApiClient::new("http://127.0.0.1:9").unwrap();
        let session = Session::initialize(api, Box::new(MemoryTokenStore::new())).await;

        assert!(!session.is_authenticated());
        assert!(!session.is_host());
        assert!(session.current_user().is_none());
        assert_eq!(session.api().token(), None);
    }
}
