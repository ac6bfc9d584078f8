use async_trait::async_trait;

use super::outcome::ActivationOutcome;
use super::token::ActivationToken;

/// Backend activation endpoint.
///
/// Implementations never fail: every error is folded into
/// [`ActivationOutcome::TransportError`] so callers handle all branches.
#[async_trait]
pub trait ActivationApi: Send + Sync {
    async fn activate(&self, token: &ActivationToken) -> ActivationOutcome;
}

// Host-side effects of the confirmation view.

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

pub trait Notifier: Send + Sync {
    /// Show a blocking, user-visible notice.
    fn alert(&self, message: &str);
}
