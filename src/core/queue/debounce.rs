//! Search term debouncing
//!
//! The effective search term follows the raw term only after the raw term
//! has been stable for the quiescence window. Every new raw term restarts
//! the window.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default quiescence window
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Debounces raw search input into an effective search term
///
/// Must be created inside a tokio runtime. The background timer task stops
/// when the debouncer is dropped.
///
/// # Examples
///
/// ```no_run
/// use triage::core::queue::SearchDebouncer;
/// use std::time::Duration;
///
/// # async fn example() {
/// let debouncer = SearchDebouncer::new(Duration::from_millis(300));
/// let mut effective = debouncer.subscribe();
///
/// debouncer.set_term("ali");
/// effective.changed().await.unwrap();
/// assert_eq!(*effective.borrow(), "ali");
/// # }
/// ```
#[derive(Debug)]
pub struct SearchDebouncer {
    raw_tx: watch::Sender<String>,
    effective_rx: watch::Receiver<String>,
    task: JoinHandle<()>,
}

impl SearchDebouncer {
    pub fn new(window: Duration) -> Self {
        Self::starting_with(window, "")
    }

    /// Debouncer whose raw and effective terms both start at `initial`
    pub fn starting_with(window: Duration, initial: impl Into<String>) -> Self {
        let initial = initial.into();
        let (raw_tx, raw_rx) = watch::channel(initial.clone());
        let (effective_tx, effective_rx) = watch::channel(initial);
        let task = tokio::spawn(run(window, raw_rx, effective_tx));

        Self {
            raw_tx,
            effective_rx,
            task,
        }
    }

    /// Records a keystroke
    pub fn set_term(&self, term: impl Into<String>) {
        self.raw_tx.send_replace(term.into());
    }

    /// Term the queue view should currently filter by
    pub fn effective(&self) -> String {
        self.effective_rx.borrow().clone()
    }

    /// Receiver notified whenever the effective term changes
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.effective_rx.clone()
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    window: Duration,
    mut raw_rx: watch::Receiver<String>,
    effective_tx: watch::Sender<String>,
) {
    // Outer loop waits for the first keystroke of a burst
    while raw_rx.changed().await.is_ok() {
        loop {
            tokio::select! {
                _ = tokio::time::sleep(window) => {
                    let term = raw_rx.borrow_and_update().clone();
                    effective_tx.send_if_modified(|current| {
                        if *current == term {
                            false
                        } else {
                            *current = term;
                            true
                        }
                    });
                    break;
                }
                changed = raw_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }
    }
}
