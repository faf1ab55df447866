//! Change notification for hot reload.
//!
//! A [`ReloadNotifier`] pushes [`ReloadSignal`]s onto a bounded queue that a
//! dedicated reload task consumes. [`PollingWatcher`] is one producer: it
//! polls the source fingerprint and signals whenever it changes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::source::DefinitionSource;

/// Opaque "reload requested" event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSignal;

/// Sending half of the reload queue.
#[derive(Debug, Clone)]
pub struct ReloadNotifier {
    tx: mpsc::Sender<ReloadSignal>,
}

impl ReloadNotifier {
    /// Create a notifier and the receiver the reload task reads from.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ReloadSignal>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Request a reload.
    ///
    /// A full queue already holds a pending reload, so the signal is dropped.
    /// Returns `false` once the receiving task is gone.
    pub fn notify(&self) -> bool {
        match self.tx.try_send(ReloadSignal) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!("Reload already pending");
                true
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }
}

/// Polls a definition source and signals when its fingerprint changes.
pub struct PollingWatcher;

impl PollingWatcher {
    /// Spawn the polling loop on the current runtime.
    ///
    /// The loop ends when the notifier's receiver is dropped.
    pub fn spawn(
        source: Arc<dyn DefinitionSource>,
        interval: Duration,
        notifier: ReloadNotifier,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "Started file watching for {} (every {:?})",
                source.describe(),
                interval
            );

            let mut last = Self::fingerprint(&source).await;
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                let current = Self::fingerprint(&source).await;
                if current == last {
                    continue;
                }
                last = current;

                info!("Detected change in {}, reloading prompts...", source.describe());
                if !notifier.notify() {
                    debug!("Reload queue closed, stopping watcher");
                    break;
                }
            }
        })
    }

    async fn fingerprint(source: &Arc<dyn DefinitionSource>) -> Option<u64> {
        let source = Arc::clone(source);
        match tokio::task::spawn_blocking(move || source.fingerprint()).await {
            Ok(fingerprint) => fingerprint,
            Err(e) => {
                warn!("File watcher error: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::prompts::{PromptError, RawDefinition};
    use std::sync::atomic::{AtomicU64, Ordering};

    struct CountingSource {
        value: AtomicU64,
    }

    impl DefinitionSource for CountingSource {
        fn definitions(&self) -> Result<Vec<RawDefinition>, PromptError> {
            Ok(vec![])
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }

        fn fingerprint(&self) -> Option<u64> {
            Some(self.value.load(Ordering::SeqCst))
        }
    }

    #[test]
    fn test_notify_coalesces_when_full() {
        let (notifier, mut rx) = ReloadNotifier::channel(1);
        assert!(notifier.notify());
        assert!(notifier.notify());
        assert_eq!(rx.try_recv().ok(), Some(ReloadSignal));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_notify_reports_closed_queue() {
        let (notifier, rx) = ReloadNotifier::channel(1);
        drop(rx);
        assert!(!notifier.notify());
    }

    #[tokio::test]
    async fn test_watcher_signals_on_change() {
        let source = Arc::new(CountingSource {
            value: AtomicU64::new(0),
        });
        let (notifier, mut rx) = ReloadNotifier::channel(4);
        let handle = PollingWatcher::spawn(source.clone(), Duration::from_millis(10), notifier);

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(rx.try_recv().is_err());

        source.value.store(1, Ordering::SeqCst);
        let signal = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("watcher should signal");
        assert_eq!(signal, Some(ReloadSignal));

        handle.abort();
    }
}
