use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle, time::sleep};

/// Emits the latest pushed value once `quiet` has passed without a newer one.
///
/// Every push restarts the quiet period. The callback runs on the debouncer
/// task and should hand long work off with `tokio::spawn`. Dropping the
/// debouncer stops it; a value still waiting to settle is discarded.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn spawn<F>(quiet: Duration, on_settle: F) -> Self
    where
        F: Fn(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        let task = tokio::spawn(async move {
            while let Some(mut latest) = rx.recv().await {
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => latest = value,
                            None => return,
                        },
                        _ = sleep(quiet) => break,
                    }
                }
                on_settle(latest);
            }
        });

        Self { tx, task }
    }

    pub fn push(&self, value: T) {
        // only fails once the task is gone, which means we are shutting down
        let _ = self.tx.send(value);
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
