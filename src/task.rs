use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, error, info};

use crate::provider::{Direction, Translator};

/// Outcome of one background translation: the trimmed translated text, or
/// a human-readable failure message. Nothing above this boundary throws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Success(String),
    Failure(String),
}

impl TranslationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Handle to a dispatched translation. Awaiting it resolves to exactly one
/// outcome, even if the underlying call fails or panics.
pub struct TranslationTask {
    receiver: oneshot::Receiver<TranslationOutcome>,
}

impl TranslationTask {
    pub async fn outcome(self) -> TranslationOutcome {
        match self.receiver.await {
            Ok(outcome) => outcome,
            // Sender dropped without a send: the task panicked. Report it
            // as an ordinary failure instead of propagating the fault.
            Err(_) => TranslationOutcome::Failure(
                "Translation task terminated unexpectedly".to_string(),
            ),
        }
    }
}

/// Run one `translate` call on a background task so the caller is never
/// blocked on network I/O. One spawned task per request, no queueing, no
/// cancellation; a hung call hangs only its own task.
pub fn spawn_translation(
    provider: Arc<dyn Translator>,
    text: String,
    direction: Direction,
) -> TranslationTask {
    let (sender, receiver) = oneshot::channel();

    tokio::spawn(async move {
        debug!(
            "Translating {} words / {} chars via {} ({})",
            text.split_whitespace().count(),
            text.chars().count(),
            provider.kind(),
            direction
        );

        let outcome = match provider.translate(&text, direction).await {
            Ok(translation) => {
                info!("Translation completed via {}", provider.kind());
                TranslationOutcome::Success(translation)
            }
            Err(e) => {
                error!("Translation failed via {}: {}", provider.kind(), e);
                TranslationOutcome::Failure(e.to_string())
            }
        };

        // The receiver may have been dropped by an uninterested caller.
        let _ = sender.send(outcome);
    });

    TranslationTask { receiver }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BilinError, Result};
    use crate::provider::ProviderKind;
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub Backend {}

        #[async_trait]
        impl Translator for Backend {
            async fn translate(&self, text: &str, direction: Direction) -> Result<String>;
            fn kind(&self) -> ProviderKind;
        }
    }

    fn echo_backend() -> MockBackend {
        let mut backend = MockBackend::new();
        backend
            .expect_translate()
            .returning(|text, _| Ok(format!("<{}>", text)));
        backend.expect_kind().return_const(ProviderKind::Gemini);
        backend
    }

    #[tokio::test]
    async fn test_stub_transform_delivered_unchanged() {
        let task = spawn_translation(
            Arc::new(echo_backend()),
            "Hello".to_string(),
            Direction::EnglishToChinese,
        );
        assert_eq!(
            task.outcome().await,
            TranslationOutcome::Success("<Hello>".to_string())
        );
    }

    #[tokio::test]
    async fn test_provider_error_becomes_failure_outcome() {
        let mut backend = MockBackend::new();
        backend
            .expect_translate()
            .returning(|_, _| Err(BilinError::Provider("connection refused".to_string())));
        backend.expect_kind().return_const(ProviderKind::Zhipu);

        let task = spawn_translation(
            Arc::new(backend),
            "Hello".to_string(),
            Direction::EnglishToChinese,
        );

        match task.outcome().await {
            TranslationOutcome::Failure(msg) => assert!(msg.contains("connection refused")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_panicking_call_reported_as_failure() {
        struct PanickingBackend;

        #[async_trait]
        impl Translator for PanickingBackend {
            async fn translate(&self, _text: &str, _direction: Direction) -> Result<String> {
                panic!("malformed response");
            }

            fn kind(&self) -> ProviderKind {
                ProviderKind::Zhipu
            }
        }

        let task = spawn_translation(
            Arc::new(PanickingBackend),
            "Hello".to_string(),
            Direction::EnglishToChinese,
        );

        match task.outcome().await {
            TranslationOutcome::Failure(msg) => assert!(msg.contains("unexpectedly")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_overlapping_tasks_each_deliver_once() {
        let provider: Arc<dyn Translator> = Arc::new(echo_backend());

        let first = spawn_translation(
            provider.clone(),
            "one".to_string(),
            Direction::EnglishToChinese,
        );
        let second = spawn_translation(
            provider.clone(),
            "two".to_string(),
            Direction::ChineseToEnglish,
        );

        assert_eq!(
            second.outcome().await,
            TranslationOutcome::Success("<two>".to_string())
        );
        assert_eq!(
            first.outcome().await,
            TranslationOutcome::Success("<one>".to_string())
        );
    }
}
