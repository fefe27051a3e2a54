//! Repeating poll timer
//!
//! [`Ticker`] starts a repeating task and hands back a [`PollTimer`]. The
//! handle owns the underlying interval: dropping or cancelling it stops
//! further ticks. Each tick spawns its own task, so a slow request never
//! delays or swallows the next tick.

use std::rc::Rc;
use std::time::Duration;

use futures_util::future::LocalBoxFuture;

/// Work run on every tick
pub type PollTask = Rc<dyn Fn() -> LocalBoxFuture<'static, ()>>;

/// Starts repeating tasks
pub trait Ticker {
    /// Run `task` every `period`, first tick one period from now
    fn every(&self, period: Duration, task: PollTask) -> PollTimer;
}

/// Owned handle to a running repeating task
pub struct PollTimer {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl PollTimer {
    /// Wrap the action that stops the underlying timer
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop the timer now
    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for PollTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollTimer")
            .field("running", &self.cancel.is_some())
            .finish()
    }
}

/// Tokio-backed ticker. Must be used inside a `tokio::task::LocalSet`.
#[cfg(feature = "native")]
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTicker;

#[cfg(feature = "native")]
impl Ticker for TokioTicker {
    fn every(&self, period: Duration, task: PollTask) -> PollTimer {
        let handle = tokio::task::spawn_local(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                interval.tick().await;
                tokio::task::spawn_local(task());
            }
        });
        PollTimer::new(move || handle.abort())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_drop_cancels_once() {
        let cancelled = Rc::new(Cell::new(0));
        let counter = Rc::clone(&cancelled);
        let timer = PollTimer::new(move || counter.set(counter.get() + 1));
        drop(timer);
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn test_explicit_cancel_does_not_double_fire() {
        let cancelled = Rc::new(Cell::new(0));
        let counter = Rc::clone(&cancelled);
        let timer = PollTimer::new(move || counter.set(counter.get() + 1));
        timer.cancel();
        assert_eq!(cancelled.get(), 1);
    }

    #[cfg(feature = "native")]
    #[tokio::test(start_paused = true)]
    async fn test_tokio_ticker_ticks_until_cancelled() {
        use futures_util::FutureExt;

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let ticks = Rc::new(Cell::new(0));
                let counter = Rc::clone(&ticks);
                let task: PollTask = Rc::new(move || {
                    let counter = Rc::clone(&counter);
                    async move { counter.set(counter.get() + 1) }.boxed_local()
                });

                let timer = TokioTicker.every(Duration::from_millis(3000), task);
                tokio::time::sleep(Duration::from_millis(9500)).await;
                assert_eq!(ticks.get(), 3);

                timer.cancel();
                tokio::time::sleep(Duration::from_millis(9000)).await;
                assert_eq!(ticks.get(), 3);
            })
            .await;
    }
}
