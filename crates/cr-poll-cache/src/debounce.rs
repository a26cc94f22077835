//! # Input Debouncer
//!
//! Last-write-wins debouncing for rapidly changing input (search boxes).
//! Each submission resets a fixed delay window; only the value standing
//! when the window lapses without further input is applied.

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// Debounces submissions onto a watch channel.
///
/// Dropping the debouncer cancels the timer task; a value still inside its
/// window at teardown is discarded, never applied.
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    output: watch::Receiver<Option<T>>,
    task: Arc<JoinHandle<()>>,
}

impl<T> Clone for Debouncer<T> {
    fn clone(&self) -> Self {
        Self {
            input: self.input.clone(),
            output: self.output.clone(),
            task: Arc::clone(&self.task),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Debouncer<T> {
    /// Create a debouncer with a fixed delay window.
    pub fn new(window: Duration) -> Self {
        let (input, mut submissions) = mpsc::unbounded_channel::<T>();
        let (applied, output) = watch::channel(None);

        let task = tokio::spawn(async move {
            while let Some(mut pending) = submissions.recv().await {
                loop {
                    tokio::select! {
                        next = submissions.recv() => match next {
                            // Another keystroke: the window starts over.
                            Some(value) => pending = value,
                            None => return,
                        },
                        _ = tokio::time::sleep(window) => {
                            let _ = applied.send(Some(pending));
                            break;
                        }
                    }
                }
            }
        });

        Self {
            input,
            output,
            task: Arc::new(task),
        }
    }

    /// Submit a new value, resetting the delay window.
    pub fn submit(&self, value: T) {
        let _ = self.input.send(value);
    }

    /// The most recently applied value, if any window has lapsed yet.
    pub fn current(&self) -> Option<T> {
        self.output.borrow().clone()
    }

    /// Watch applied values as they land.
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.output.clone()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if Arc::strong_count(&self.task) == 1 {
            self.task.abort();
        }
    }
}
