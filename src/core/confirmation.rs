use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info, warn};

use super::outcome::ActivationOutcome;
use super::ports::{ActivationApi, Navigator, Notifier};
use super::route::HOME_PATH;
use super::token::ActivationToken;

pub const REJECTED_MESSAGE: &str = "Failed to confirm token";
pub const TRANSPORT_MESSAGE: &str = "Failed to confirm token: the server could not be reached";

/// What to do when the request never produced a status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportErrorPolicy {
    /// Log and show the failure notice.
    #[default]
    Alert,
    /// Log only; the user gets no feedback.
    Log,
}

/// What to do when the route carries no token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTokenPolicy {
    /// Send the request with an empty token segment.
    #[default]
    Send,
    /// Show the failure notice without contacting the backend.
    Reject,
}

impl FromStr for TransportErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alert" => Ok(Self::Alert),
            "log" => Ok(Self::Log),
            other => Err(format!("unknown transport error policy \"{other}\" (expected alert|log)")),
        }
    }
}

impl FromStr for MissingTokenPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "send" => Ok(Self::Send),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown missing token policy \"{other}\" (expected send|reject)")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmOptions {
    pub transport_errors: TransportErrorPolicy,
    pub missing_token: MissingTokenPolicy,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfirmationState {
    Idle,
    AwaitingResponse,
    Navigated,
    Alerted,
    SilentlyFailed,
}

/// Result of one call to [`ConfirmationView::confirm`].
#[derive(Debug)]
pub struct Attempt {
    /// State the view settled in after this attempt.
    pub state: ConfirmationState,
    /// `None` when no request was sent.
    pub outcome: Option<ActivationOutcome>,
}

enum Effect {
    Navigate,
    Alert(&'static str),
    Nothing,
}

/// The confirmation page: one action that activates the account behind the
/// route token, then navigates home or alerts.
///
/// Concurrent calls are allowed and each sends its own request, but the view
/// navigates at most once. After navigation, later outcomes are logged only.
pub struct ConfirmationView {
    api: Arc<dyn ActivationApi>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    options: ConfirmOptions,
    state: Mutex<ViewState>,
}

struct ViewState {
    current: ConfirmationState,
    in_flight: usize,
}

impl ConfirmationView {
    pub fn new(
        api: Arc<dyn ActivationApi>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        options: ConfirmOptions,
    ) -> Self {
        Self {
            api,
            navigator,
            notifier,
            options,
            state: Mutex::new(ViewState {
                current: ConfirmationState::Idle,
                in_flight: 0,
            }),
        }
    }

    pub fn state(&self) -> ConfirmationState {
        self.lock().current
    }

    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }

    pub async fn confirm(&self, token: Option<&ActivationToken>) -> Attempt {
        let empty;
        let token = match token.filter(|t| !t.is_empty()) {
            Some(t) => t,
            None => match self.options.missing_token {
                MissingTokenPolicy::Send => {
                    empty = ActivationToken::new("");
                    &empty
                }
                MissingTokenPolicy::Reject => {
                    warn!("no activation token in route; not contacting the backend");
                    let state = self.settle(Effect::Alert(REJECTED_MESSAGE), false);
                    return Attempt {
                        state,
                        outcome: None,
                    };
                }
            },
        };

        {
            let mut st = self.lock();
            st.in_flight += 1;
            if st.current != ConfirmationState::Navigated {
                st.current = ConfirmationState::AwaitingResponse;
            }
        }
        info!(empty_token = token.is_empty(), "sending activation request");

        let outcome = self.api.activate(token).await;

        let effect = match &outcome {
            ActivationOutcome::Activated => {
                info!("account activated");
                Effect::Navigate
            }
            ActivationOutcome::Rejected(status) => {
                warn!(status = status.as_u16(), "activation rejected");
                Effect::Alert(REJECTED_MESSAGE)
            }
            ActivationOutcome::TransportError(err) => {
                error!(error = %err, "activation request failed");
                match self.options.transport_errors {
                    TransportErrorPolicy::Alert => Effect::Alert(TRANSPORT_MESSAGE),
                    TransportErrorPolicy::Log => Effect::Nothing,
                }
            }
        };
        let state = self.settle(effect, true);
        Attempt {
            state,
            outcome: Some(outcome),
        }
    }

    fn settle(&self, effect: Effect, finished_request: bool) -> ConfirmationState {
        let (state, act) = {
            let mut st = self.lock();
            if finished_request {
                st.in_flight = st.in_flight.saturating_sub(1);
            }
            if st.current == ConfirmationState::Navigated {
                info!("view already navigated; ignoring outcome");
                return ConfirmationState::Navigated;
            }
            let next = match effect {
                Effect::Navigate => ConfirmationState::Navigated,
                Effect::Alert(_) => ConfirmationState::Alerted,
                Effect::Nothing if st.in_flight > 0 => ConfirmationState::AwaitingResponse,
                Effect::Nothing => ConfirmationState::SilentlyFailed,
            };
            st.current = next;
            (next, effect)
        };
        match act {
            Effect::Navigate => self.navigator.navigate(HOME_PATH),
            Effect::Alert(msg) => self.notifier.alert(msg),
            Effect::Nothing => {}
        }
        state
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
