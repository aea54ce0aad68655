//! Shared context, error types, and outcome handling for the CLI.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use anyhow::anyhow;
use stockdesk_api_models::FormErrors;
use stockdesk_client::{AlertColor, AppContext, ROOT_ROUTE, RecordingNavigator};
use stockdesk_config::ClientConfig;
use stockdesk_ui::{ActionOutcome, AuthStore};

use crate::cli::OutputFormat;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Handles shared by every command: the wired client context, the redirect
/// sink, and the selected output format.
pub(crate) struct CliContext {
    pub(crate) app: AppContext,
    pub(crate) navigator: Arc<RecordingNavigator>,
    pub(crate) output: OutputFormat,
}

impl CliContext {
    /// Wire the client for `config` and restore any persisted session.
    pub(crate) async fn connect(config: ClientConfig, output: OutputFormat) -> CliResult<Self> {
        let navigator = Arc::new(RecordingNavigator::new());
        let app = AppContext::new(config, navigator.clone()).map_err(|err| {
            CliError::failure(anyhow::Error::new(err).context("failed to build API client"))
        })?;
        AuthStore::new(app.api.clone()).hydrate().await;
        Ok(Self {
            app,
            navigator,
            output,
        })
    }

    /// Fail early when no usable session is stored.
    pub(crate) fn require_session(&self) -> CliResult<()> {
        if self.app.session.is_authenticated() {
            Ok(())
        } else if self.app.session.is_expired() {
            Err(CliError::validation(
                "session expired (run `stockdesk login --email <EMAIL>`)",
            ))
        } else {
            Err(CliError::validation(
                "not signed in (run `stockdesk login --email <EMAIL>`)",
            ))
        }
    }

    /// Map a store outcome onto the CLI result, echoing the alert it raised.
    pub(crate) fn settle(&self, outcome: ActionOutcome) -> CliResult<()> {
        match outcome {
            ActionOutcome::Completed => {
                self.echo_alert();
                Ok(())
            }
            ActionOutcome::Failed => Err(CliError::failure(anyhow!(self.failure_message()))),
            ActionOutcome::Invalid(errors) => {
                Err(CliError::validation(describe_form_errors(&errors)))
            }
        }
    }

    /// Print the current success alert, if any, to stderr.
    pub(crate) fn echo_alert(&self) {
        let alert = self.app.alerts.current();
        if alert.visible && alert.color != AlertColor::Error {
            eprintln!("{}: {}", alert.title, alert.text);
        }
    }

    fn failure_message(&self) -> String {
        let alert = self.app.alerts.current();
        let mut message = if alert.visible && alert.color == AlertColor::Error {
            alert.text
        } else {
            "request failed".to_string()
        };
        if self.navigator.current().as_deref() == Some(ROOT_ROUTE) {
            message.push_str(" (session ended; run `stockdesk login` again)");
        }
        message
    }
}

/// One line per field error: `path: message`.
pub(crate) fn describe_form_errors(errors: &FormErrors) -> String {
    errors
        .errors()
        .iter()
        .map(|error| format!("{}: {}", error.path, error.message))
        .collect::<Vec<_>>()
        .join("\n")
}
