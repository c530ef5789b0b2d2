//! Background worker that applies queued visit increments.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use crate::application::services::LinkService;
use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;

const RETRY_ATTEMPTS: usize = 3;

/// Drains the visit channel until every sender is dropped.
///
/// Each event is applied through [`LinkService::record_visit`] with a short
/// jittered exponential backoff. Unknown codes are not retried. An event that
/// still fails is logged and counted in `shortlink_visits_dropped_total`.
pub async fn run_visit_worker(mut rx: mpsc::Receiver<VisitEvent>, service: Arc<LinkService>) {
    while let Some(event) = rx.recv().await {
        let lag = event.received_at.elapsed();
        debug!(code = %event.code, lag_ms = lag.as_millis() as u64, "Applying visit");

        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(Duration::from_secs(1))
            .map(jitter)
            .take(RETRY_ATTEMPTS);

        let result = RetryIf::spawn(
            strategy,
            || service.record_visit(&event.code),
            |e: &AppError| !matches!(e, AppError::NotFound { .. }),
        )
        .await;

        if let Err(e) = result {
            metrics::counter!("shortlink_visits_dropped_total").increment(1);
            warn!(code = %event.code, error = %e, "Dropping visit after retries");
        }
    }

    debug!("Visit channel closed, worker exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::link_service::AllocationPolicy;
    use crate::domain::entities::{NewShortLink, ShortLink};
    use crate::domain::repositories::{LinkRepository, MockLinkRepository};
    use crate::infrastructure::cache::NullCache;
    use crate::infrastructure::persistence::InMemoryLinkRepository;
    use crate::utils::code_generator::RandomCodeGenerator;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service_with(repo: Arc<dyn LinkRepository>) -> Arc<LinkService> {
        Arc::new(LinkService::new(
            repo,
            Arc::new(NullCache::new()),
            Arc::new(RandomCodeGenerator),
            AllocationPolicy::default(),
        ))
    }

    #[tokio::test]
    async fn test_worker_applies_queued_visits() {
        let repo = Arc::new(InMemoryLinkRepository::new());
        repo.insert_if_absent(NewShortLink {
            code: "abc123".to_string(),
            original_url: "https://example.com".to_string(),
        })
        .await
        .unwrap();

        let (tx, rx) = mpsc::channel(16);
        let worker = tokio::spawn(run_visit_worker(rx, service_with(repo.clone())));

        for _ in 0..3 {
            tx.send(VisitEvent::new("abc123")).await.unwrap();
        }
        drop(tx);
        worker.await.unwrap();

        let link = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(link.visits, 3);
    }

    #[tokio::test]
    async fn test_worker_does_not_retry_unknown_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_increment_visits()
            .times(1)
            .returning(|code| {
                Err(AppError::not_found("Short link not found", json!({ "code": code })))
            });

        let (tx, rx) = mpsc::channel(4);
        let worker = tokio::spawn(run_visit_worker(rx, service_with(Arc::new(repo))));

        tx.send(VisitEvent::new("zzz999")).await.unwrap();
        drop(tx);
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_retries_transient_failures() {
        let calls = AtomicUsize::new(0);
        let mut repo = MockLinkRepository::new();
        repo.expect_increment_visits().times(3).returning(move |_| {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(AppError::internal("Database error", json!({})))
            } else {
                Ok(ShortLink::new(
                    "abc123".to_string(),
                    "https://example.com".to_string(),
                    1,
                    Utc::now(),
                ))
            }
        });

        let (tx, rx) = mpsc::channel(4);
        let worker = tokio::spawn(run_visit_worker(rx, service_with(Arc::new(repo))));

        tx.send(VisitEvent::new("abc123")).await.unwrap();
        drop(tx);
        worker.await.unwrap();
    }
}
