use std::sync::Mutex;
use std::time::Duration;

use log::{debug, error};

use super::{Scheduler, Task};

/// Fires deferred tasks on the tokio timer. Outside a runtime the task is
/// dropped with an error log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn defer(&self, delay: Duration, task: Task) {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!("Dropping deferred task, no async runtime: {}", e);
                return;
            }
        };
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

/// Queues deferred tasks until [`ManualScheduler::run_pending`] is called.
///
/// Delays are recorded but never waited on.
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<Vec<(Duration, Task)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.lock().iter().map(|(delay, _)| *delay).collect()
    }

    /// Runs everything queued so far in FIFO order and returns how many ran.
    /// Tasks deferred while draining wait for the next call.
    pub fn run_pending(&self) -> usize {
        let drained: Vec<(Duration, Task)> = std::mem::take(&mut *self.lock());
        let count = drained.len();
        for (_, task) in drained {
            task();
        }
        if count > 0 {
            debug!("Ran {} deferred task(s)", count);
        }
        count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Duration, Task)>> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Scheduler for ManualScheduler {
    fn defer(&self, delay: Duration, task: Task) {
        self.lock().push((delay, task));
    }
}
