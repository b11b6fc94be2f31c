//! Concurrent check dispatch for httpcheck.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::check::CheckSet;
use crate::executor::Executor;
use crate::sink::Sink;

/// Fans the check set out across tasks and funnels every result into the
/// sink.
pub struct Dispatcher {
    executor: Arc<Executor>,
    sink: Arc<dyn Sink>,
    concurrency: Option<usize>,
}

impl Dispatcher {
    pub fn new(executor: Arc<Executor>, sink: Arc<dyn Sink>) -> Self {
        Self { executor, sink, concurrency: None }
    }

    /// Cap the number of checks running at once.
    ///
    /// The default matches the historical behavior: one task per check,
    /// unbounded.
    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency = Some(limit);
        self
    }

    /// Run every check once and wait for all of them to finish.
    ///
    /// One task per check; the protocol/domain combinations of a check are
    /// probed sequentially inside its task. Each result is submitted to
    /// the sink as it is produced; submission order across checks is
    /// unspecified. Sink failures are logged and never abort other
    /// submissions or other checks. Returns only after every task has
    /// joined.
    pub async fn run(&self, checks: &CheckSet, ip_override: Option<&str>) {
        let semaphore = self.concurrency.map(|limit| Arc::new(Semaphore::new(limit)));
        let mut tasks = JoinSet::new();

        for (name, definition) in checks {
            let definition = match ip_override {
                Some(ip) if !ip.is_empty() => definition.with_ip(ip),
                _ => definition.clone(),
            };
            let name = name.clone();
            let executor = Arc::clone(&self.executor);
            let sink = Arc::clone(&self.sink);
            let semaphore = semaphore.clone();

            tasks.spawn(async move {
                let _permit = match semaphore.as_ref() {
                    Some(semaphore) => semaphore.acquire().await.ok(),
                    None => None,
                };

                debug!("running check {name}");
                for protocol in definition.effective_protocols() {
                    for domain in &definition.domains {
                        let results =
                            executor.execute(&name, &definition, &protocol, domain).await;
                        for result in results {
                            if let Err(error) = sink.submit(&result).await {
                                error!(
                                    "failed to submit result for {}: {error:#}",
                                    result.key
                                );
                            }
                        }
                    }
                }
            });
        }

        // Full barrier: every result is submitted before run returns.
        while let Some(joined) = tasks.join_next().await {
            if let Err(error) = joined {
                error!("check task failed: {error}");
            }
        }
    }
}
