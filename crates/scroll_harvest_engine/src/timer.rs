use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Quiet period a scroll burst must stay silent for before extraction fires.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Runs a task once after a delay unless the returned handle is cancelled first.
pub trait Scheduler: Send + Sync {
    fn schedule_after(&self, delay: Duration, task: BoxFuture<'static, ()>) -> TimerHandle;
}

/// Handle to one scheduled task. Cancelling after the task started has no effect.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    token: CancellationToken,
    fired: Arc<AtomicBool>,
}

impl TimerHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    pub fn is_pending(&self) -> bool {
        !self.has_fired() && !self.is_cancelled()
    }
}

/// Scheduler backed by the ambient tokio runtime clock, so a paused test
/// clock drives it deterministically.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule_after(&self, delay: Duration, task: BoxFuture<'static, ()>) -> TimerHandle {
        let token = CancellationToken::new();
        let fired = Arc::new(AtomicBool::new(false));
        let deadline = Instant::now() + delay;

        let cancelled = token.clone();
        let fired_flag = fired.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => {
                    fired_flag.store(true, Ordering::Release);
                    task.await;
                }
            }
        });

        TimerHandle { token, fired }
    }
}

/// Trailing-edge debounce: every `reset` cancels the pending task and
/// schedules the new one a full quiet period from now.
pub struct DebounceTimer {
    scheduler: Arc<dyn Scheduler>,
    quiet_period: Duration,
    pending: Mutex<Option<TimerHandle>>,
}

impl DebounceTimer {
    pub fn new(scheduler: Arc<dyn Scheduler>, quiet_period: Duration) -> Self {
        Self {
            scheduler,
            quiet_period,
            pending: Mutex::new(None),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    pub fn reset<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.cancel();
        }
        *pending = Some(
            self.scheduler
                .schedule_after(self.quiet_period, Box::pin(task)),
        );
    }

    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(TimerHandle::is_pending)
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
