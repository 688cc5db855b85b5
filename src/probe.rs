use std::sync::Arc;
use tracing::{info, warn};

use crate::provider::{Direction, Translator};

/// Where the startup connectivity check currently stands.
///
/// `Invalid` waits on a user decision: re-entering credentials moves back
/// to `Untested` for a fresh probe, declining moves to `Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    Untested,
    Valid,
    Invalid,
    Aborted,
}

impl ProbeState {
    /// The user supplied new credentials; a re-probe is due.
    pub fn on_credentials_reentered(self) -> Self {
        match self {
            Self::Invalid => Self::Untested,
            other => other,
        }
    }

    /// The user declined to fix the credential; the session ends.
    pub fn on_declined(self) -> Self {
        match self {
            Self::Invalid => Self::Aborted,
            other => other,
        }
    }

    pub fn is_usable(self) -> bool {
        self == Self::Valid
    }
}

/// One lightweight round trip to validate a provider's credential before
/// translation is enabled. Only the active provider is probed.
pub async fn probe(provider: Arc<dyn Translator>) -> ProbeState {
    info!("Probing {} connectivity...", provider.kind());

    match provider.translate("Hello", Direction::EnglishToChinese).await {
        Ok(_) => {
            info!("{} connectivity check succeeded", provider.kind());
            ProbeState::Valid
        }
        Err(e) => {
            warn!("{} connectivity check failed: {}", provider.kind(), e);
            ProbeState::Invalid
        }
    }
}
