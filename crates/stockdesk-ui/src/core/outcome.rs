//! Action results and the single-toast failure rule.

use stockdesk_api_models::FormErrors;
use stockdesk_client::{AlertChannel, ClientError, ERROR_TITLE};
use tracing::warn;

/// Text shown when a failure carries no usable message.
pub const FALLBACK_ERROR: &str = "Something went wrong";

/// How a store action ended. Failures are already reported through the alert
/// channel; the outcome only lets callers branch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ActionOutcome {
    /// The backend accepted the action.
    Completed,
    /// The action failed and an error alert was shown.
    Failed,
    /// The form did not pass validation; nothing was sent.
    Invalid(FormErrors),
}

impl ActionOutcome {
    /// Whether the backend accepted the action.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Field errors when the form was rejected locally.
    #[must_use]
    pub const fn form_errors(&self) -> Option<&FormErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Message describing a failure to the user.
#[must_use]
pub fn failure_text(error: &ClientError) -> String {
    let text = match error {
        ClientError::Status { message, .. } => message.clone(),
        other => other.to_string(),
    };
    if text.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        text
    }
}

/// Show one error alert for `error` unless the client already did.
pub fn report_failure(alerts: &AlertChannel, error: &ClientError) {
    warn!(error = %error, "store action failed");
    if error.is_surfaced() {
        return;
    }
    alerts.error(ERROR_TITLE, failure_text(error));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surfaced_failures_are_not_repeated() {
        let alerts = AlertChannel::default();
        let surfaced = ClientError::Status {
            status: 404,
            message: "Resource not found".into(),
            surfaced: true,
        };
        report_failure(&alerts, &surfaced);
        assert_eq!(alerts.shown(), 0);

        report_failure(&alerts, &ClientError::SessionExpired);
        assert_eq!(alerts.shown(), 1);
        assert_eq!(alerts.current().text, "Token expired");
        assert_eq!(alerts.current().title, ERROR_TITLE);
    }

    #[test]
    fn empty_message_falls_back() {
        let blank = ClientError::Status {
            status: 400,
            message: "  ".into(),
            surfaced: false,
        };
        assert_eq!(failure_text(&blank), FALLBACK_ERROR);
    }

    #[test]
    fn outcome_helpers() {
        assert!(ActionOutcome::Completed.is_completed());
        assert!(!ActionOutcome::Failed.is_completed());
        let invalid = ActionOutcome::Invalid(FormErrors::default());
        assert!(invalid.form_errors().is_some());
    }
}
