//! The observable album collection the presentation layer binds to.
//!
//! An [`AlbumCollection`] never leaves the dispatcher thread; everything else
//! reaches it through [`crate::core::dispatcher::DispatcherHandle`].

use crate::core::Album;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tokio::sync::mpsc;

/// One observable change of the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionChange {
    Added { index: usize, album: Album },
    Reset,
}

/// Result of one append. The album is in the collection even when some
/// observers failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appended {
    pub index: usize,
    pub failed_observers: usize,
}

type Observer = Box<dyn FnMut(&CollectionChange) + Send>;

/// Ordered, append-only list of albums with per-change notification.
#[derive(Default)]
pub struct AlbumCollection {
    items: Vec<Album>,
    observers: Vec<Observer>,
    streams: Vec<mpsc::UnboundedSender<CollectionChange>>,
}

impl AlbumCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends at the end and notifies every observer and stream once.
    pub fn push(&mut self, album: Album) -> Appended {
        let index = self.items.len();
        self.items.push(album.clone());
        let failed_observers = self.notify(CollectionChange::Added { index, album });
        Appended {
            index,
            failed_observers,
        }
    }

    /// Returns how many observers panicked on the `Reset`.
    pub fn clear(&mut self) -> usize {
        self.items.clear();
        self.notify(CollectionChange::Reset)
    }

    pub fn items(&self) -> &[Album] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Registers a callback; it runs on the thread that owns the collection.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&CollectionChange) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn watch(&mut self) -> ChangeStream {
        let (tx, rx) = mpsc::unbounded_channel();
        self.streams.push(tx);
        ChangeStream::new(rx)
    }

    /// Every observer and stream sees the change, even after one of the
    /// observers panicked. Returns the number of observers that panicked.
    fn notify(&mut self, change: CollectionChange) -> usize {
        let mut failed = 0;
        for observer in self.observers.iter_mut() {
            if catch_unwind(AssertUnwindSafe(|| observer(&change))).is_err() {
                tracing::error!("Collection observer panicked on {:?}", change);
                failed += 1;
            }
        }
        // 接收端已關閉的串流直接移除
        self.streams.retain(|tx| tx.send(change.clone()).is_ok());
        failed
    }
}

impl std::fmt::Debug for AlbumCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlbumCollection")
            .field("items", &self.items)
            .field("observers", &self.observers.len())
            .field("streams", &self.streams.len())
            .finish()
    }
}

/// An async stream of collection changes.
///
/// Returned by `watch()`. Use `next()` to receive the next change.
pub struct ChangeStream {
    receiver: mpsc::UnboundedReceiver<CollectionChange>,
}

impl ChangeStream {
    pub(crate) fn new(receiver: mpsc::UnboundedReceiver<CollectionChange>) -> Self {
        Self { receiver }
    }

    /// Receive the next change.
    ///
    /// Returns `None` once the collection is gone.
    pub async fn next(&mut self) -> Option<CollectionChange> {
        self.receiver.recv().await
    }

    /// Try to receive the next change without waiting.
    pub fn try_next(&mut self) -> Option<CollectionChange> {
        self.receiver.try_recv().ok()
    }

    pub fn close(&mut self) {
        self.receiver.close();
    }
}
