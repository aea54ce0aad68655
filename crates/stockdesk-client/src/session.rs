//! Session (token) store shared by the API client and the auth store.

use std::sync::Arc;

use stockdesk_api_models::{LoginData, SessionUser};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::storage::{
    ACCESS_TOKEN_KEY, EXPIRY_KEY, MemoryStorage, SessionStorage, USER_KEY,
};

/// Current unix time in seconds.
#[must_use]
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Authenticated identity with its bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token.
    pub token: String,
    /// Expiry as unix seconds.
    pub expiry: i64,
    /// Signed-in user.
    pub user: SessionUser,
}

impl Session {
    /// Build a session from a login reply received at `now`.
    #[must_use]
    pub fn from_login(data: LoginData, now: i64) -> Self {
        Self {
            token: data.token,
            expiry: now.saturating_add(data.expires_in),
            user: data.user,
        }
    }

    /// Whether the token is past its expiry at `now`.
    #[must_use]
    pub const fn is_expired_at(&self, now: i64) -> bool {
        self.expiry < now
    }
}

/// Cloneable handle to the single session slot.
#[derive(Clone)]
pub struct SessionStore {
    slot: Arc<watch::Sender<Option<Session>>>,
    storage: Arc<dyn SessionStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("signed_in", &self.slot.borrow().is_some())
            .finish_non_exhaustive()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }
}

impl SessionStore {
    /// Empty store mirroring into `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot: Arc::new(slot),
            storage,
        }
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.slot.borrow().clone()
    }

    /// Bearer token, if signed in.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.slot.borrow().as_ref().map(|session| session.token.clone())
    }

    /// Signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<SessionUser> {
        self.slot.borrow().as_ref().map(|session| session.user.clone())
    }

    /// Token present and not expired.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.slot
            .borrow()
            .as_ref()
            .is_some_and(|session| !session.is_expired_at(unix_now()))
    }

    /// Token present but expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.slot
            .borrow()
            .as_ref()
            .is_some_and(|session| session.is_expired_at(unix_now()))
    }

    /// Observe session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.slot.subscribe()
    }

    /// Replace the session and mirror it to storage.
    pub async fn set(&self, session: Session) {
        let user = match serde_json::to_string(&session.user) {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "session user could not be serialized");
                String::new()
            }
        };
        let entries = [
            (ACCESS_TOKEN_KEY, session.token.clone()),
            (EXPIRY_KEY, session.expiry.to_string()),
            (USER_KEY, user),
        ];
        self.slot.send_replace(Some(session));
        if let Err(err) = self.storage.set_many(&entries).await {
            warn!(error = %err, "session could not be persisted");
        }
    }

    /// Drop the session and its persisted copy.
    pub async fn clear(&self) {
        self.slot.send_replace(None);
        if let Err(err) = self
            .storage
            .remove_many(&[ACCESS_TOKEN_KEY, EXPIRY_KEY, USER_KEY])
            .await
        {
            warn!(error = %err, "persisted session could not be removed");
        }
    }

    /// Restore a persisted session. Malformed entries are ignored; an expired
    /// session is restored as-is and cleared by the next request's expiry check.
    ///
    /// Returns whether a live session was restored.
    pub async fn hydrate(&self) -> bool {
        let Some(session) = self.read_persisted().await else {
            return false;
        };
        let live = !session.is_expired_at(unix_now());
        if !live {
            debug!("persisted session already expired");
        }
        self.slot.send_replace(Some(session));
        live
    }

    async fn read_persisted(&self) -> Option<Session> {
        let read = |key: &'static str| async move {
            match self.storage.get(key).await {
                Ok(value) => value,
                Err(err) => {
                    warn!(error = %err, key, "persisted session could not be read");
                    None
                }
            }
        };
        let token = read(ACCESS_TOKEN_KEY).await.filter(|token| !token.is_empty())?;
        let expiry = read(EXPIRY_KEY).await?.trim().parse::<i64>().ok()?;
        let user = serde_json::from_str::<SessionUser>(&read(USER_KEY).await?).ok()?;
        Some(Session {
            token,
            expiry,
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileStorage;
    use anyhow::Result;

    fn session(expiry: i64) -> Session {
        Session {
            token: "tok-1".into(),
            expiry,
            user: SessionUser {
                user_uuid: "u-1".into(),
                full_name: "Amina Clerk".into(),
                email: "amina@example.com".into(),
                ..SessionUser::default()
            },
        }
    }

    #[test]
    fn login_expiry_is_relative_to_now() {
        let data = LoginData {
            token: "t".into(),
            user: SessionUser::default(),
            expires_in: 3600,
        };
        let session = Session::from_login(data, 1_000);
        assert_eq!(session.expiry, 4_600);
        assert!(!session.is_expired_at(4_600));
        assert!(session.is_expired_at(4_601));
    }

    #[tokio::test]
    async fn set_then_hydrate_through_file_storage() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");

        let writer = SessionStore::new(Arc::new(FileStorage::new(&path)));
        writer.set(session(unix_now() + 600)).await;
        assert!(writer.is_authenticated());

        let reader = SessionStore::new(Arc::new(FileStorage::new(&path)));
        assert!(reader.hydrate().await);
        assert_eq!(reader.token().as_deref(), Some("tok-1"));
        assert_eq!(reader.user().map(|user| user.email), Some("amina@example.com".into()));
        Ok(())
    }

    #[tokio::test]
    async fn expired_persisted_session_is_restored_but_not_live() -> Result<()> {
        let storage = Arc::new(MemoryStorage::new());
        let writer = SessionStore::new(storage.clone());
        writer.set(session(unix_now() - 10)).await;
        assert!(writer.is_expired());
        assert!(!writer.is_authenticated());

        let reader = SessionStore::new(storage.clone());
        assert!(!reader.hydrate().await);
        assert!(reader.is_expired());
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).await?.as_deref(), Some("tok-1"));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_entries_are_ignored() -> Result<()> {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set_many(&[
                (ACCESS_TOKEN_KEY, "tok".into()),
                (EXPIRY_KEY, "tomorrow".into()),
                (USER_KEY, "{}".into()),
            ])
            .await?;
        let store = SessionStore::new(storage);
        assert!(!store.hydrate().await);
        assert!(store.current().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn clear_notifies_subscribers() {
        let store = SessionStore::default();
        let mut updates = store.subscribe();
        store.set(session(unix_now() + 60)).await;
        store.clear().await;
        assert!(updates.has_changed().unwrap_or(false));
        assert!(updates.borrow_and_update().is_none());
    }
}
