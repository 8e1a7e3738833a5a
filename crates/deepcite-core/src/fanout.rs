//! Retrying concurrent fanout over independent search operations.
//!
//! Launches every task at once, retries each failed invocation with a fixed
//! pause, and bounds the whole batch with a single wall-clock deadline.
//! Results come back in submission order regardless of completion order.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::{sleep, timeout};
use tracing::warn;

/// Retry behaviour passed as data: total attempts per task, the fixed pause
/// between attempts, and the optional batch deadline. No jitter, no backoff
/// growth.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
    pub deadline: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(2),
            deadline: Some(Duration::from_secs(30)),
        }
    }
}

impl RetryPolicy {
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }
}

/// Failure of a fanout batch.
#[derive(Debug, Error)]
pub enum FanoutError {
    #[error("task {index} failed after {attempts} attempt(s): {source}")]
    RetryExhausted {
        index: usize,
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },
    #[error("batch missed its {deadline:?} deadline")]
    DeadlineExceeded { deadline: Duration },
    #[error("fanout task panicked: {0}")]
    TaskPanicked(String),
}

/// Run `operation` over every task concurrently under `policy`.
///
/// All-or-nothing: one task exhausting its retries fails the batch, and a
/// deadline hit abandons every still-pending task without partial results.
pub async fn run_many<I, T, F, Fut>(
    tasks: Vec<I>,
    operation: F,
    policy: RetryPolicy,
) -> Result<Vec<T>, FanoutError>
where
    I: Clone + Send + 'static,
    T: Send + 'static,
    F: Fn(I) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<T>> + Send,
{
    let attempts = policy.attempts.max(1);
    let total = tasks.len();

    let mut set = JoinSet::new();
    for (index, task) in tasks.into_iter().enumerate() {
        let operation = operation.clone();
        let delay = policy.delay;
        set.spawn(async move {
            let mut attempt = 0u32;
            loop {
                attempt += 1;
                match operation(task.clone()).await {
                    Ok(value) => return (index, Ok(value)),
                    Err(err) if attempt < attempts => {
                        warn!(index, attempt, error = %err, "fanout task failed, retrying");
                        sleep(delay).await;
                    }
                    Err(err) => {
                        return (
                            index,
                            Err(FanoutError::RetryExhausted {
                                index,
                                attempts,
                                source: err,
                            }),
                        )
                    }
                }
            }
        });
    }

    // Reassemble by submission index; dropping the set on a deadline hit
    // aborts whatever is still in flight.
    let collect = async move {
        let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(total).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, Ok(value))) => slots[index] = Some(value),
                Ok((_, Err(err))) => return Err(err),
                Err(join_err) => return Err(FanoutError::TaskPanicked(join_err.to_string())),
            }
        }
        Ok(slots
            .into_iter()
            .map(|slot| slot.expect("every spawned task reports exactly once"))
            .collect())
    };

    match policy.deadline {
        Some(deadline) => timeout(deadline, collect)
            .await
            .map_err(|_| FanoutError::DeadlineExceeded { deadline })?,
        None => collect.await,
    }
}
