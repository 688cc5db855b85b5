//! End-to-end flow over the public API: saved credential record ->
//! provider selection -> background translation outcome.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bilin::credentials::{CredentialStore, Credentials};
use bilin::error::Result;
use bilin::provider::{Direction, ProviderKind, Translator};
use bilin::selector::ProviderSelector;
use bilin::task::{spawn_translation, TranslationOutcome};

struct StubBackend {
    kind: ProviderKind,
    reply: &'static str,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Translator for StubBackend {
    async fn translate(&self, _text: &str, _direction: Direction) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.to_string())
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }
}

#[tokio::test]
async fn single_gemini_credential_drives_one_translation() {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::new(dir.path().join("bilin_keys.json"));
    store
        .save(&Credentials {
            gemini_key: Some("X".to_string()),
            zhipu_key: None,
        })
        .unwrap();

    // Configure one provider per saved credential, as the shell does.
    let creds = store.load();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut selector = ProviderSelector::new();
    if creds.gemini_key.is_some() {
        selector.configure(Arc::new(StubBackend {
            kind: ProviderKind::Gemini,
            reply: "你好",
            calls: calls.clone(),
        }));
    }
    if creds.zhipu_key.is_some() {
        selector.configure(Arc::new(StubBackend {
            kind: ProviderKind::Zhipu,
            reply: "unused",
            calls: calls.clone(),
        }));
    }

    // Exactly one provider, of Gemini kind, and switching is a no-op.
    assert_eq!(selector.active_kind(), Some(ProviderKind::Gemini));
    assert!(!selector.is_configured(ProviderKind::Zhipu));
    assert_eq!(selector.switch(), Some(ProviderKind::Gemini));

    let task = spawn_translation(
        selector.active().unwrap(),
        "Hello".to_string(),
        Direction::EnglishToChinese,
    );

    assert_eq!(
        task.outcome().await,
        TranslationOutcome::Success("你好".to_string())
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
