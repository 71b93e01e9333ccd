mod scheduler;

pub use scheduler::{ManualScheduler, TokioScheduler};

use std::time::Duration;

pub type Task = Box<dyn FnOnce() + Send>;

/// Runs work later, never in the caller's synchronous step.
pub trait Scheduler: Send + Sync {
    fn defer(&self, delay: Duration, task: Task);
}
