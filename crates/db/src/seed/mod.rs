//! Database seeding: fixed records and randomized development data.
//!
//! Fixture seeding loads the deterministic records the portal needs to run
//! (roles, themes, departments, locations). Random seeding generates bulk
//! development data on top.
//!
//! Random generation can collide with uniqueness constraints, so each record
//! gets up to three attempts before it is counted as failed. Failures are
//! reported in aggregate per model; only a 100% failure rate is an error.

pub mod fixtures;
pub mod random;

use std::future::Future;

use thiserror::Error;
use tracing::{error, warn};

/// Attempts per record before it is counted as failed.
const MAX_ATTEMPTS: u32 = 3;

/// Errors raised by seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Every requested record for a model failed to generate.
    #[error("failed to generate any {model} seed instances")]
    AllFailed {
        /// The model that failed to seed.
        model: &'static str,
    },

    /// Underlying database failure during fixture loading.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

/// Aggregate result of seeding one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Records requested.
    pub requested: usize,
    /// Records created.
    pub created: usize,
    /// Records that failed all their attempts.
    pub failed: usize,
}

impl SeedOutcome {
    /// Logs the aggregate failure count and converts a total failure into an
    /// error. Partial failure is reported but tolerated; random generation
    /// can always collide with uniqueness constraints.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::AllFailed`] when every requested record failed.
    pub fn check(self, model: &'static str) -> Result<Self, SeedError> {
        if self.failed > 0 {
            if self.failed == self.requested {
                error!(model, requested = self.requested, "all seed instances failed");
                return Err(SeedError::AllFailed { model });
            }
            warn!(
                model,
                failed = self.failed,
                requested = self.requested,
                "some seed instances failed to generate"
            );
        }
        Ok(self)
    }
}

/// Runs `attempt` once per requested record, retrying each record up to
/// three times. Failed records are counted, never retried further, and never
/// abort the batch.
pub async fn seed_with_retry<F, Fut, T, E>(requested: usize, mut attempt: F) -> SeedOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut created = 0;
    let mut failed = 0;

    for _ in 0..requested {
        let mut attempts = 0;
        loop {
            attempts += 1;
            if attempt().await.is_ok() {
                created += 1;
                break;
            }
            if attempts >= MAX_ATTEMPTS {
                failed += 1;
                break;
            }
        }
    }

    SeedOutcome {
        requested,
        created,
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_all_records_succeed() {
        let outcome = seed_with_retry(5, || async { Ok::<_, ()>(()) }).await;
        assert_eq!(
            outcome,
            SeedOutcome {
                requested: 5,
                created: 5,
                failed: 0
            }
        );
        assert!(outcome.check("widget").is_ok());
    }

    #[tokio::test]
    async fn test_record_succeeds_on_retry() {
        let calls = AtomicUsize::new(0);
        // Every odd attempt fails, so each record needs two tries.
        let outcome = seed_with_retry(3, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n % 2 == 0 { Err(()) } else { Ok(()) }
            }
        })
        .await;

        assert_eq!(outcome.created, 3);
        assert_eq!(outcome.failed, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_record_fails_after_three_attempts() {
        let calls = AtomicUsize::new(0);
        let outcome = seed_with_retry(4, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(()) }
        })
        .await;

        assert_eq!(outcome.created, 0);
        assert_eq!(outcome.failed, 4);
        // Exactly three attempts per record, no more.
        assert_eq!(calls.load(Ordering::SeqCst), 12);
        // Never more failures than requested.
        assert!(outcome.failed <= outcome.requested);
    }

    #[tokio::test]
    async fn test_total_failure_is_an_error() {
        let outcome = seed_with_retry(2, || async { Err::<(), _>(()) }).await;
        assert!(matches!(
            outcome.check("asset"),
            Err(SeedError::AllFailed { model: "asset" })
        ));
    }

    #[tokio::test]
    async fn test_partial_failure_is_tolerated() {
        let calls = AtomicUsize::new(0);
        // First record fails all three attempts, the second succeeds.
        let outcome = seed_with_retry(2, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move { if n < 3 { Err(()) } else { Ok(()) } }
        })
        .await;

        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.created, 1);
        assert!(outcome.check("software").is_ok());
    }

    #[tokio::test]
    async fn test_zero_requested_is_a_no_op() {
        let outcome = seed_with_retry(0, || async { Ok::<_, ()>(()) }).await;
        assert_eq!(outcome.requested, 0);
        assert!(outcome.check("room").is_ok());
    }
}
