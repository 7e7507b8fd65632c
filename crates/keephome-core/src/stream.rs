// ── Reactive settings stream ──
//
// Subscription handle vended by the SettingsStore.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::Settings;

/// A subscription to settings changes.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via `changed()` or by converting to a `Stream`.
pub struct SettingsStream {
    current: Arc<Settings>,
    receiver: watch::Receiver<Arc<Settings>>,
}

impl SettingsStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<Settings>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Get the snapshot captured at creation time (or at the last
    /// observed change).
    pub fn current(&self) -> &Arc<Settings> {
        &self.current
    }

    /// Get the latest snapshot (may have changed since creation).
    pub fn latest(&self) -> Arc<Settings> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` if the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<Settings>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> SettingsWatchStream {
        SettingsWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields a fresh `Arc<Settings>` snapshot each time the store is
/// mutated; the first poll yields the current value immediately.
pub struct SettingsWatchStream {
    inner: WatchStream<Arc<Settings>>,
}

impl Stream for SettingsWatchStream {
    type Item = Arc<Settings>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
