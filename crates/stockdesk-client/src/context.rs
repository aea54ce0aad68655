//! Bundle of the shared handles a host application wires together once.

use std::sync::Arc;

use stockdesk_config::ClientConfig;
use tracing::debug;

use crate::alert::AlertChannel;
use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::navigator::Navigator;
use crate::session::SessionStore;
use crate::storage::{FileStorage, MemoryStorage, SessionStorage};

/// Configuration plus the session, alert and routing handles behind one client.
#[derive(Clone)]
pub struct AppContext {
    /// Effective configuration.
    pub config: ClientConfig,
    /// Session slot.
    pub session: SessionStore,
    /// Alert slot.
    pub alerts: AlertChannel,
    /// Redirect sink.
    pub navigator: Arc<dyn Navigator>,
    /// HTTP client sharing the handles above.
    pub api: ApiClient,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Wire the handles for `config`. The session is mirrored to
    /// `config.session_file` when set, otherwise kept in memory.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiClient::new`] failures.
    pub fn new(config: ClientConfig, navigator: Arc<dyn Navigator>) -> ClientResult<Self> {
        let storage: Arc<dyn SessionStorage> = match &config.session_file {
            Some(path) => {
                debug!(path = %path.display(), "session mirrored to file");
                Arc::new(FileStorage::new(path))
            }
            None => Arc::new(MemoryStorage::new()),
        };
        let session = SessionStore::new(storage);
        let alerts = AlertChannel::new(config.alert_duration());
        let api = ApiClient::new(&config, session.clone(), alerts.clone(), Arc::clone(&navigator))?;
        Ok(Self {
            config,
            session,
            alerts,
            navigator,
            api,
        })
    }

    /// Default page size for paginated stores.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.config.per_page
    }
}
