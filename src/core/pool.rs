//! Bounded fan-out/fan-in worker pool.
//!
//! Both the classification and the indexing stage hand a list of
//! items to [`WorkerPool::run`]. At most `size` tasks are in flight;
//! results come back tagged with their input index so callers can
//! merge in input order regardless of completion order.
//!
//! Each item runs in its own spawned task. A panic or a timeout is
//! turned into a per-item error, so one bad file never takes down
//! the run.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinSet;

use crate::core::error::{CopaceticError, Result};

/// What the pool does once a task has failed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop scheduling new items; in-flight tasks still finish
    #[default]
    Halt,
    /// Run every item regardless of failures
    Continue,
}

impl std::str::FromStr for FailurePolicy {
    type Err = CopaceticError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "halt" => Ok(FailurePolicy::Halt),
            "continue" => Ok(FailurePolicy::Continue),
            other => Err(CopaceticError::ConfigError(format!(
                "Unknown failure policy '{other}'. Use 'halt' or 'continue'."
            ))),
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::Halt => f.write_str("halt"),
            FailurePolicy::Continue => f.write_str("continue"),
        }
    }
}

/// Results of one pool run
#[derive(Debug)]
pub struct PoolRun<T> {
    /// Finished tasks as `(input index, result)`, sorted by index
    pub completed: Vec<(usize, Result<T>)>,

    /// Input indices that were never scheduled, ascending
    pub skipped: Vec<usize>,
}

impl<T> PoolRun<T> {
    pub fn has_failures(&self) -> bool {
        self.completed.iter().any(|(_, r)| r.is_err())
    }
}

/// Bounded pool of concurrent tasks
#[derive(Debug, Clone)]
pub struct WorkerPool {
    size: usize,
    task_timeout: Option<Duration>,
    policy: FailurePolicy,
}

impl WorkerPool {
    /// Create a pool running at most `size` tasks at once
    ///
    /// A size of zero is treated as one.
    pub fn new(size: usize) -> Self {
        Self {
            size: size.max(1),
            task_timeout: None,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.task_timeout = timeout;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Run `task` once per item and collect every outcome
    pub async fn run<I, T, F, Fut>(&self, items: Vec<I>, task: F) -> PoolRun<T>
    where
        I: Send + 'static,
        T: Send + 'static,
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let total = items.len();
        let mut pending = items.into_iter().enumerate();
        let mut in_flight: JoinSet<(usize, Result<T>)> = JoinSet::new();
        let mut completed = Vec::with_capacity(total);
        let mut halted = false;

        loop {
            while !halted && in_flight.len() < self.size {
                let Some((idx, item)) = pending.next() else {
                    break;
                };
                let work = task(item);
                let timeout = self.task_timeout;
                in_flight.spawn(async move { (idx, Self::supervise(work, timeout).await) });
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };

            match joined {
                Ok((idx, result)) => {
                    if result.is_err() && self.policy == FailurePolicy::Halt && !halted {
                        tracing::debug!("Task {} failed, halting further scheduling", idx);
                        halted = true;
                    }
                    completed.push((idx, result));
                }
                Err(e) => {
                    // supervise() never panics, so this only fires on runtime shutdown
                    tracing::error!("Pool supervisor task lost: {}", e);
                    halted = true;
                }
            }
        }

        let skipped: Vec<usize> = pending.map(|(idx, _)| idx).collect();
        if !skipped.is_empty() {
            tracing::info!(
                "Skipped {} of {} items after a failure",
                skipped.len(),
                total
            );
        }

        completed.sort_by_key(|(idx, _)| *idx);
        PoolRun { completed, skipped }
    }

    /// Run one unit of work in its own task, mapping panics and
    /// timeouts to errors
    async fn supervise<T, Fut>(work: Fut, timeout: Option<Duration>) -> Result<T>
    where
        T: Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let handle = tokio::spawn(work);
        let abort = handle.abort_handle();

        let joined = match timeout {
            Some(limit) => match tokio::time::timeout(limit, handle).await {
                Ok(joined) => joined,
                Err(_) => {
                    abort.abort();
                    return Err(CopaceticError::TaskTimedOut(limit));
                }
            },
            None => handle.await,
        };

        joined.map_err(|e| CopaceticError::TaskAborted(e.to_string()))?
    }
}
