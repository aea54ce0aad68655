//! Single-slot alert (toast) channel observed by the rendering layer.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

/// Default auto-dismiss delay.
pub const DEFAULT_ALERT_DURATION: Duration = Duration::from_millis(3_000);

/// Visual tone of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertColor {
    /// Completed action.
    Success,
    /// Failed action.
    Error,
    /// Neutral information.
    #[default]
    Info,
    /// Something needs attention.
    Warning,
}

impl AlertColor {
    /// Icon token paired with the tone.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "$success",
            Self::Error => "$error",
            Self::Info => "$info",
            Self::Warning => "$warning",
        }
    }
}

/// Contents of the alert slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Alert {
    /// Show counter; bumps on every `show`.
    pub id: u64,
    /// Headline.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Tone.
    pub color: AlertColor,
    /// Icon token.
    pub icon: String,
    /// Whether the alert is on screen.
    pub visible: bool,
    /// Auto-dismiss delay.
    #[serde(skip)]
    pub duration: Duration,
}

/// Parameters for [`AlertChannel::show`].
#[derive(Debug, Clone, Default)]
pub struct AlertOptions {
    /// Headline.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Tone.
    pub color: AlertColor,
    /// Icon override; defaults to the tone's icon.
    pub icon: Option<String>,
    /// Delay override; defaults to the channel's duration.
    pub duration: Option<Duration>,
}

/// Cloneable handle to the alert slot.
#[derive(Debug, Clone)]
pub struct AlertChannel {
    slot: Arc<watch::Sender<Alert>>,
    default_duration: Duration,
}

impl Default for AlertChannel {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_DURATION)
    }
}

impl AlertChannel {
    /// Channel whose alerts dismiss after `default_duration` unless overridden.
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        let (slot, _) = watch::channel(Alert::default());
        Self {
            slot: Arc::new(slot),
            default_duration,
        }
    }

    /// Replace the current alert and restart the dismiss timer. Returns the new id.
    pub fn show(&self, options: AlertOptions) -> u64 {
        let duration = options.duration.unwrap_or(self.default_duration);
        let mut id = 0;
        self.slot.send_modify(|alert| {
            id = alert.id + 1;
            *alert = Alert {
                id,
                icon: options
                    .icon
                    .unwrap_or_else(|| options.color.icon().to_string()),
                title: options.title,
                text: options.text,
                color: options.color,
                visible: true,
                duration,
            };
        });
        debug!(id, "alert shown");
        self.schedule_dismiss(id, duration);
        id
    }

    /// Hide the current alert immediately.
    pub fn hide(&self) {
        self.slot.send_if_modified(|alert| {
            let was_visible = alert.visible;
            alert.visible = false;
            was_visible
        });
    }

    /// Success tone helper.
    pub fn success(&self, title: impl Into<String>, text: impl Into<String>) -> u64 {
        self.show_tone(AlertColor::Success, title.into(), text.into())
    }

    /// Error tone helper.
    pub fn error(&self, title: impl Into<String>, text: impl Into<String>) -> u64 {
        self.show_tone(AlertColor::Error, title.into(), text.into())
    }

    /// Info tone helper.
    pub fn info(&self, title: impl Into<String>, text: impl Into<String>) -> u64 {
        self.show_tone(AlertColor::Info, title.into(), text.into())
    }

    /// Warning tone helper.
    pub fn warning(&self, title: impl Into<String>, text: impl Into<String>) -> u64 {
        self.show_tone(AlertColor::Warning, title.into(), text.into())
    }

    /// Snapshot of the slot.
    #[must_use]
    pub fn current(&self) -> Alert {
        self.slot.borrow().clone()
    }

    /// Number of alerts shown so far.
    #[must_use]
    pub fn shown(&self) -> u64 {
        self.slot.borrow().id
    }

    /// Observe slot changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Alert> {
        self.slot.subscribe()
    }

    fn show_tone(&self, color: AlertColor, title: String, text: String) -> u64 {
        self.show(AlertOptions {
            title,
            text,
            color,
            ..AlertOptions::default()
        })
    }

    // A later `show` bumps the id, so a stale timer finds a different alert and
    // leaves it alone.
    fn schedule_dismiss(&self, id: u64, duration: Duration) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!(id, "no runtime; alert will not auto-dismiss");
            return;
        };
        let slot = Arc::clone(&self.slot);
        runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            slot.send_if_modified(|alert| {
                if alert.id == id && alert.visible {
                    alert.visible = false;
                    true
                } else {
                    false
                }
            });
        });
    }
}
