//! Retry controller wrapping a question generator.

use crate::RetryPolicy;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use talespin_core::GenerateRequest;
use talespin_error::{GenerationError, GenerationErrorKind, TalespinError, TalespinErrorKind, TalespinResult};
use talespin_interface::{GenerationStatus, QuestionGenerator};
use tokio::sync::watch;
use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff};
use tracing::{debug, instrument, warn};

/// The outcome of one next-question request.
///
/// Generation never surfaces a hard failure to the caller; when the
/// service cannot be reached the fixed fallback question is returned with
/// `fallback` set so the UI can still distinguish it if needed.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedQuestion {
    /// The question text to present
    pub text: String,
    /// True if this is the fallback rather than a generated question
    pub fallback: bool,
}

/// Wraps a [`QuestionGenerator`] with bounded backoff and a fallback.
///
/// Guarantees at most one in-flight call to the remote generator;
/// concurrent invocations are rejected rather than queued. The loading
/// state (`Idle | Waiting | Retrying(n)`) is published on a watch
/// channel for the UI.
pub struct RetryingGenerator<G> {
    inner: G,
    policy: RetryPolicy,
    in_flight: AtomicBool,
    status_tx: watch::Sender<GenerationStatus>,
}

/// Clears the in-flight flag and resets status on scope exit, so an
/// early return or panic in the retry loop cannot wedge the session.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
    status: &'a watch::Sender<GenerationStatus>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.status.send_replace(GenerationStatus::Idle);
        self.flag.store(false, Ordering::Release);
    }
}

impl<G: QuestionGenerator> RetryingGenerator<G> {
    /// Create a controller with the default policy.
    pub fn new(inner: G) -> Self {
        Self::with_policy(inner, RetryPolicy::default())
    }

    /// Create a controller with an explicit policy.
    pub fn with_policy(inner: G, policy: RetryPolicy) -> Self {
        let (status_tx, _) = watch::channel(GenerationStatus::Idle);
        Self {
            inner,
            policy,
            in_flight: AtomicBool::new(false),
            status_tx,
        }
    }

    /// Subscribe to loading-state changes.
    pub fn status(&self) -> watch::Receiver<GenerationStatus> {
        self.status_tx.subscribe()
    }

    /// The current loading state.
    pub fn current_status(&self) -> GenerationStatus {
        *self.status_tx.borrow()
    }

    /// The retry policy in effect.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Request the next question, retrying rate limits with backoff.
    ///
    /// Returns the generated question, or the fallback question once the
    /// retry ceiling is exhausted or a terminal failure occurs. The only
    /// error surfaced is [`GenerationErrorKind::InFlight`], raised when a
    /// call is already outstanding for this controller.
    #[instrument(skip(self, request), fields(provider = %self.inner.provider_name()))]
    pub async fn next_question(&self, request: &GenerateRequest) -> TalespinResult<GeneratedQuestion> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Rejecting concurrent generation request");
            return Err(GenerationError::new(GenerationErrorKind::InFlight).into());
        }
        let _guard = InFlightGuard {
            flag: &self.in_flight,
            status: &self.status_tx,
        };
        self.status_tx.send_replace(GenerationStatus::Waiting);

        match self.generate_with_backoff(request).await {
            Ok(text) => {
                debug!("Generated next question");
                Ok(GeneratedQuestion {
                    text,
                    fallback: false,
                })
            }
            Err(e) => {
                warn!(error = %e, "Generation gave up, emitting fallback question");
                Ok(GeneratedQuestion {
                    text: self.policy.fallback_question().clone(),
                    fallback: true,
                })
            }
        }
    }

    async fn generate_with_backoff(&self, request: &GenerateRequest) -> TalespinResult<String> {
        // ExponentialBackoff::from_millis(2) yields 2^n; the factor scales
        // that to base_delay_ms * 2^(n-1), i.e. 1s, 2s, 4s, 8s, 16s at the
        // defaults. No jitter: the delay sequence is part of the contract.
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(*self.policy.base_delay_ms() / 2)
            .take(*self.policy.max_retries());

        let attempt = AtomicU32::new(0);
        Retry::spawn(strategy, || async {
            match self.inner.generate(request).await {
                Ok(response) => Ok(response.text),
                Err(e) if is_rate_limited(&e) => {
                    let n = attempt.fetch_add(1, Ordering::SeqCst) + 1;
                    if n <= *self.policy.max_retries() as u32 {
                        warn!(
                            error = %e,
                            attempt = n,
                            delay_ms = self.policy.delay_for_attempt(n - 1).as_millis() as u64,
                            "Rate limited, backing off before retry"
                        );
                        self.status_tx.send_replace(GenerationStatus::Retrying(n));
                    } else {
                        warn!(error = %e, attempt = n, "Rate limit retries exhausted");
                    }
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Terminal generation failure, not retrying");
                    Err(RetryError::Permanent(e))
                }
            }
        })
        .await
    }
}

fn is_rate_limited(err: &TalespinError) -> bool {
    match err.kind() {
        TalespinErrorKind::Generation(g) => g.is_retryable(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use talespin_core::GenerateResponse;
    use tokio::time::Instant;

    /// Generator that fails a set number of times before succeeding.
    struct FlakyGenerator {
        calls: AtomicUsize,
        failures: usize,
        kind: GenerationErrorKind,
    }

    impl FlakyGenerator {
        fn rate_limited(failures: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failures,
                kind: GenerationErrorKind::RateLimited,
            }
        }

        fn terminal() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failures: usize::MAX,
                kind: GenerationErrorKind::ApiStatus {
                    status: 500,
                    message: "boom".to_string(),
                },
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl QuestionGenerator for &FlakyGenerator {
        async fn generate(&self, _req: &GenerateRequest) -> TalespinResult<GenerateResponse> {
            // A real provider call parks on the socket, giving status
            // watchers a chance to run between transitions.
            tokio::task::yield_now().await;
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(GenerationError::new(self.kind.clone()).into())
            } else {
                Ok(GenerateResponse::new("What happened next?"))
            }
        }

        fn provider_name(&self) -> &'static str {
            "flaky"
        }

        fn model_name(&self) -> &str {
            "test"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn success_passes_through_without_delay() {
        let generator = FlakyGenerator::rate_limited(0);
        let controller = RetryingGenerator::new(&generator);
        let start = Instant::now();

        let question = controller
            .next_question(&GenerateRequest::default())
            .await
            .unwrap();
        assert_eq!(question.text, "What happened next?");
        assert!(!question.fallback);
        assert_eq!(generator.call_count(), 1);
        assert_eq!(start.elapsed(), std::time::Duration::ZERO);
        assert_eq!(controller.current_status(), GenerationStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limits_retry_then_succeed() {
        let generator = FlakyGenerator::rate_limited(2);
        let controller = RetryingGenerator::new(&generator);
        let start = Instant::now();

        let question = controller
            .next_question(&GenerateRequest::default())
            .await
            .unwrap();
        assert!(!question.fallback);
        assert_eq!(generator.call_count(), 3);
        // Two backoffs: 1s + 2s.
        assert_eq!(start.elapsed(), std::time::Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_rate_limits_fall_back_after_full_backoff() {
        let generator = FlakyGenerator::rate_limited(usize::MAX);
        let controller = RetryingGenerator::new(&generator);
        let start = Instant::now();

        let question = controller
            .next_question(&GenerateRequest::default())
            .await
            .unwrap();
        assert!(question.fallback);
        assert!(question.text.contains("having trouble connecting"));
        // Initial call plus five retries.
        assert_eq!(generator.call_count(), 6);
        // 1s + 2s + 4s + 8s + 16s of backoff.
        assert_eq!(start.elapsed(), std::time::Duration::from_secs(31));
        assert_eq!(controller.current_status(), GenerationStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_failure_falls_back_without_retry() {
        let generator = FlakyGenerator::terminal();
        let controller = RetryingGenerator::new(&generator);
        let start = Instant::now();

        let question = controller
            .next_question(&GenerateRequest::default())
            .await
            .unwrap();
        assert!(question.fallback);
        assert_eq!(generator.call_count(), 1);
        assert_eq!(start.elapsed(), std::time::Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn status_reports_retry_attempts() {
        let generator = FlakyGenerator::rate_limited(3);
        let controller = RetryingGenerator::new(&generator);
        let mut status = controller.status();

        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let watcher = async move {
            while status.changed().await.is_ok() {
                let current = *status.borrow();
                seen_clone.lock().unwrap().push(current);
                if current == GenerationStatus::Idle {
                    break;
                }
            }
        };

        let request = GenerateRequest::default();
        let (question, _) = tokio::join!(controller.next_question(&request), watcher);
        assert!(!question.unwrap().fallback);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                GenerationStatus::Waiting,
                GenerationStatus::Retrying(1),
                GenerationStatus::Retrying(2),
                GenerationStatus::Retrying(3),
                GenerationStatus::Idle,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_invocation_is_rejected() {
        let generator = FlakyGenerator::rate_limited(1);
        let controller = Arc::new(RetryingGenerator::new(&generator));

        // Hold the controller in its backoff sleep, then try a second call.
        let first = {
            let controller = Arc::clone(&controller);
            async move { controller.next_question(&GenerateRequest::default()).await }
        };
        tokio::pin!(first);

        // Poll the first call until it is parked in the backoff timer.
        tokio::select! {
            biased;
            _ = &mut first => panic!("first call should still be backing off"),
            _ = tokio::time::sleep(std::time::Duration::from_millis(500)) => {}
        }

        let second = controller.next_question(&GenerateRequest::default()).await;
        match second {
            Err(e) => match e.kind() {
                TalespinErrorKind::Generation(g) => {
                    assert_eq!(g.kind, GenerationErrorKind::InFlight)
                }
                other => panic!("unexpected error kind: {other:?}"),
            },
            Ok(_) => panic!("second call should be rejected while one is in flight"),
        }

        let question = first.await.unwrap();
        assert!(!question.fallback);
    }
}
