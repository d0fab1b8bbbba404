//! Session state shared by every call site of one [`ApiClient`](crate::ApiClient).
//!
//! The manager owns the in-memory credentials and mirrors them to an
//! injected [`SessionStore`] under fixed keys, so a restarted process picks
//! up the same session. Credentials are always replaced as a whole value;
//! the lock guarding them is never held across an `.await`.

use serde_json::Value;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

use crate::storage::{MemoryStore, SessionStore, StorageError};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user";

const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY];

/// Bearer credentials currently held by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    credentials: RwLock<Credentials>,
    // Serializes token refreshes so concurrent 401s share one refresh call.
    refresh_gate: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// An empty session on top of `store`. Nothing is read from the store.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            credentials: RwLock::new(Credentials::default()),
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Rebuilds the session persisted in `store`.
    pub fn restore(store: Arc<dyn SessionStore>) -> Result<Self, StorageError> {
        let credentials = Credentials {
            access_token: store.get(ACCESS_TOKEN_KEY)?,
            refresh_token: store.get(REFRESH_TOKEN_KEY)?,
        };
        debug!(
            "session restored (access token: {}, refresh token: {})",
            credentials.access_token.is_some(),
            credentials.refresh_token.is_some()
        );
        Ok(Self {
            store,
            credentials: RwLock::new(credentials),
            refresh_gate: tokio::sync::Mutex::new(()),
        })
    }

    /// A session that is never persisted.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn credentials(&self) -> Credentials {
        self.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().access_token.is_some()
    }

    /// Installs a fresh session after a successful login.
    ///
    /// The store is written first; if that fails the in-memory session is
    /// left untouched and whatever was partially written is removed.
    pub fn establish(
        &self,
        access_token: &str,
        refresh_token: &str,
        user: Option<&Value>,
    ) -> Result<(), StorageError> {
        if let Err(err) = self.persist(access_token, refresh_token, user) {
            self.purge_store();
            return Err(err);
        }

        *self.write() = Credentials {
            access_token: Some(access_token.to_string()),
            refresh_token: Some(refresh_token.to_string()),
        };
        debug!("session established");
        Ok(())
    }

    /// Swaps in a refreshed access token, keeping the refresh token.
    pub fn replace_access_token(&self, access_token: &str) {
        {
            let mut credentials = self.write();
            *credentials = Credentials {
                access_token: Some(access_token.to_string()),
                refresh_token: credentials.refresh_token.clone(),
            };
        }
        if let Err(err) = self.store.set(ACCESS_TOKEN_KEY, access_token) {
            warn!("refreshed access token not persisted: {}", err);
        }
        debug!("access token replaced");
    }

    /// Drops every credential, in memory and in the store.
    ///
    /// Infallible and idempotent; store failures are logged.
    pub fn clear(&self) {
        *self.write() = Credentials::default();
        self.purge_store();
        debug!("session cleared");
    }

    /// The user profile saved at login, if any.
    pub fn current_user(&self) -> Option<Value> {
        let raw = match self.store.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!("could not read stored user: {}", err);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(Value::Null) => None,
            Ok(user) => Some(user),
            Err(err) => {
                warn!("stored user is not valid JSON: {}", err);
                None
            }
        }
    }

    /// Overwrites the stored user profile, e.g. after a profile update.
    ///
    /// Ignored without a session; store failures are logged.
    pub fn replace_user(&self, user: &Value) {
        if !self.is_authenticated() {
            debug!("no session, updated user not stored");
            return;
        }
        let stored = serde_json::to_string(user)
            .map_err(StorageError::from)
            .and_then(|raw| self.store.set(USER_KEY, &raw));
        match stored {
            Ok(()) => debug!("stored user replaced"),
            Err(err) => warn!("updated user not persisted: {}", err),
        }
    }

    pub(crate) fn refresh_gate(&self) -> &tokio::sync::Mutex<()> {
        &self.refresh_gate
    }

    fn persist(
        &self,
        access_token: &str,
        refresh_token: &str,
        user: Option<&Value>,
    ) -> Result<(), StorageError> {
        self.store.set(ACCESS_TOKEN_KEY, access_token)?;
        self.store.set(REFRESH_TOKEN_KEY, refresh_token)?;
        match user {
            Some(user) if !user.is_null() => {
                self.store.set(USER_KEY, &serde_json::to_string(user)?)?
            }
            _ => self.store.remove(USER_KEY)?,
        }
        Ok(())
    }

    fn purge_store(&self) {
        for key in SESSION_KEYS {
            if let Err(err) = self.store.remove(key) {
                warn!("could not remove '{}' from session store: {}", key, err);
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Credentials> {
        self.credentials.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Credentials> {
        self.credentials.write().unwrap_or_else(|e| e.into_inner())
    }
}
