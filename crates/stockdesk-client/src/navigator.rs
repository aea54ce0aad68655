//! Routing seam: the client and stores ask for redirects, the host decides how.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

/// Root route; signed-out users land here.
pub const ROOT_ROUTE: &str = "/";
/// Landing route after a successful login.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Receives redirect requests.
pub trait Navigator: Send + Sync {
    /// Navigate to `route`.
    fn navigate(&self, route: &str);
}

/// Navigator that remembers every redirect; the CLI and tests use it.
#[derive(Debug, Clone)]
pub struct RecordingNavigator {
    history: Arc<watch::Sender<Vec<String>>>,
}

impl Default for RecordingNavigator {
    fn default() -> Self {
        let (history, _) = watch::channel(Vec::new());
        Self {
            history: Arc::new(history),
        }
    }
}

impl RecordingNavigator {
    /// Empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every route requested so far, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    /// Most recent route.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.history.borrow().last().cloned()
    }

    /// Observe redirects.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.history.subscribe()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        info!(route, "navigate");
        self.history.send_modify(|history| history.push(route.to_string()));
    }
}
