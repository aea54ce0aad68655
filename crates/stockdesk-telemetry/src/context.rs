//! Span helpers for command-scoped context.

use tracing::{Span, span::Entered};

use crate::init::build_sha;

/// Guard that keeps the command-level span entered for the lifetime of the process.
pub struct CommandContextGuard {
    _guard: Entered<'static>,
}

impl CommandContextGuard {
    /// Enter a top-level span tagged with the command name and build SHA.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        let command = command.into();
        let span: &'static Span = Box::leak(Box::new(tracing::info_span!(
            "stockdesk",
            command = %command,
            build_sha = %build_sha(),
            user = tracing::field::Empty,
        )));
        let guard = span.enter();
        Self { _guard: guard }
    }
}

/// Record the signed-in user on the active span.
pub fn record_user(email: &str) {
    Span::current().record("user", tracing::field::display(email));
}

/// Span wrapping one store action.
#[must_use]
pub fn action_span(resource: &'static str, action: &'static str) -> Span {
    tracing::debug_span!("store_action", resource, action)
}
