//! Two-step password-gated database reset.
//!
//! The flow is `Idle -> PasswordEntry -> ConfirmPending -> (Deleted | Idle)`.
//! A submitted password is first validated server-side with `checkOnly`; only
//! an explicit second confirmation reuses it for the destructive call. The
//! password lives in a [`ResetSession`] for exactly that window and is
//! redacted from all debug output.


use crate::api::InspectionApi;
use std::fmt;
use std::time::Duration;

/// Inline error when the password field is submitted empty.
pub const MSG_EMPTY_PASSWORD: &str = "Password must not be empty.";
/// Inline error when the server rejects the password.
pub const MSG_WRONG_PASSWORD: &str = "Wrong password.";
/// Inline error when the password check never reached the server.
pub const MSG_SERVER_DOWN: &str = "Server not responding.";
/// Toast message after a completed wipe.
pub const MSG_DELETED: &str = "All data deleted.";
/// Toast message when the backend refused the wipe without details.
pub const MSG_DELETE_FAILED: &str = "Failed to delete data.";
/// Toast message when the wipe request itself failed.
pub const MSG_SERVER_ERROR: &str = "Server error.";

/// Delay between a successful wipe and reloading the dashboard, long enough
/// for the success toast to be seen.
pub const RELOAD_DELAY: Duration = Duration::from_millis(1500);

/// Validated password held between the check and the destructive call.
///
/// Never cloned, serialized, or printed; dropped on cancel, completion, and
/// flow reset.
pub struct ResetSession {
    key: String,
}

impl ResetSession {
    fn new(key: String) -> Self {
        Self { key }
    }

    fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for ResetSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetSession")
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Where the flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetState {
    Idle,
    PasswordEntry,
    ConfirmPending,
    Deleted,
}

/// Result of submitting a password for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordOutcome {
    /// Rejected client-side; no request was sent
    Empty,
    /// Server said the password is wrong
    Wrong,
    /// The check request failed at the transport level
    Unreachable,
    /// Password accepted; the flow advanced to the confirmation step
    Accepted,
}

impl PasswordOutcome {
    /// Inline error to show next to the password field, if any.
    pub fn inline_error(&self) -> Option<&'static str> {
        match self {
            PasswordOutcome::Empty => Some(MSG_EMPTY_PASSWORD),
            PasswordOutcome::Wrong => Some(MSG_WRONG_PASSWORD),
            PasswordOutcome::Unreachable => Some(MSG_SERVER_DOWN),
            PasswordOutcome::Accepted => None,
        }
    }
}

/// Result of the final confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The wipe completed; callers show a success toast and reload after
    /// [`RELOAD_DELAY`]
    Deleted,
    /// The backend refused; message is server-provided or a fallback
    Rejected(String),
    /// The wipe request failed at the transport level
    Unreachable,
}

/// Drives the two-step reset against the backend.
#[derive(Debug)]
pub struct ResetFlow {
    api: InspectionApi,
    state: ResetState,
    session: Option<ResetSession>,
}

impl ResetFlow {
    pub fn new(api: InspectionApi) -> Self {
        Self {
            api,
            state: ResetState::Idle,
            session: None,
        }
    }

    pub fn state(&self) -> ResetState {
        self.state
    }

    /// Open the password dialog, discarding any previous session.
    pub fn open(&mut self) {
        self.session = None;
        self.state = ResetState::PasswordEntry;
    }

    /// Abandon the flow from either intermediate step.
    pub fn cancel(&mut self) {
        self.session = None;
        self.state = ResetState::Idle;
    }

    /// Step one: validate the password server-side with `checkOnly`.
    ///
    /// An empty or whitespace-only password is rejected before any network
    /// call. On acceptance the trimmed password is retained for the
    /// confirmation step; on any rejection the flow stays in `PasswordEntry`.
    pub async fn submit_password(&mut self, password: &str) -> PasswordOutcome {
        let password = password.trim();
        if password.is_empty() {
            return PasswordOutcome::Empty;
        }

        match self.api.reset(password, true).await {
            Ok(ack) if ack.ok => {
                self.session = Some(ResetSession::new(password.to_string()));
                self.state = ResetState::ConfirmPending;
                PasswordOutcome::Accepted
            }
            Ok(_) => PasswordOutcome::Wrong,
            Err(err) => {
                tracing::warn!(error = %err, "reset password check failed");
                PasswordOutcome::Unreachable
            }
        }
    }

    /// Step two: execute the wipe with the retained password.
    ///
    /// On success the session is cleared and the flow is `Deleted`; on
    /// rejection or transport failure it stays in `ConfirmPending` so the
    /// user may retry or cancel.
    pub async fn confirm(&mut self) -> ConfirmOutcome {
        let Some(session) = self.session.as_ref() else {
            return ConfirmOutcome::Rejected(MSG_DELETE_FAILED.to_string());
        };

        match self.api.reset(session.key(), false).await {
            Ok(ack) if ack.ok => {
                self.session = None;
                self.state = ResetState::Deleted;
                ConfirmOutcome::Deleted
            }
            Ok(ack) => {
                ConfirmOutcome::Rejected(ack.msg.unwrap_or_else(|| MSG_DELETE_FAILED.to_string()))
            }
            Err(err) => {
                tracing::warn!(error = %err, "reset execution failed");
                ConfirmOutcome::Unreachable
            }
        }
    }
}
