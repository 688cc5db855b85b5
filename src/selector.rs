use std::sync::Arc;
use tracing::info;

use crate::error::{BilinError, Result};
use crate::provider::{ProviderKind, Translator};

/// Holds the configured translation backends and designates one as active.
///
/// At most two backends exist (one per [`ProviderKind`]) and switching is a
/// pure two-state toggle. Providers are shared as `Arc` so a switch never
/// affects requests already in flight.
#[derive(Default)]
pub struct ProviderSelector {
    gemini: Option<Arc<dyn Translator>>,
    zhipu: Option<Arc<dyn Translator>>,
    active: Option<ProviderKind>,
}

impl ProviderSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a constructed provider. The first configured provider
    /// becomes active; later ones do not steal activation.
    pub fn configure(&mut self, provider: Arc<dyn Translator>) {
        let kind = provider.kind();
        match kind {
            ProviderKind::Gemini => self.gemini = Some(provider),
            ProviderKind::Zhipu => self.zhipu = Some(provider),
        }
        if self.active.is_none() {
            info!("Provider {} is now active", kind);
            self.active = Some(kind);
        }
    }

    fn slot(&self, kind: ProviderKind) -> Option<&Arc<dyn Translator>> {
        match kind {
            ProviderKind::Gemini => self.gemini.as_ref(),
            ProviderKind::Zhipu => self.zhipu.as_ref(),
        }
    }

    /// Toggle the active provider to the other kind, if that kind is
    /// configured. Returns the kind that is active afterwards. A no-op
    /// when the other kind is absent or nothing is configured at all.
    pub fn switch(&mut self) -> Option<ProviderKind> {
        if let Some(current) = self.active {
            let other = current.other();
            if self.slot(other).is_some() {
                info!("Switching active provider: {} -> {}", current, other);
                self.active = Some(other);
            }
        }
        self.active
    }

    /// The provider servicing the next translation request.
    pub fn active(&self) -> Result<Arc<dyn Translator>> {
        self.active
            .and_then(|kind| self.slot(kind))
            .cloned()
            .ok_or(BilinError::NoProvider)
    }

    pub fn active_kind(&self) -> Option<ProviderKind> {
        self.active
    }

    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        self.slot(kind).is_some()
    }
}
