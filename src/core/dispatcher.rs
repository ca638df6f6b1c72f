//! The designated execution context of the album collection.
//!
//! A dedicated `ui-dispatcher` thread owns the [`AlbumCollection`] and runs
//! posted jobs one at a time, in the order they were posted.

use crate::core::collection::{AlbumCollection, Appended, ChangeStream, CollectionChange};
use crate::core::Album;
use crate::utils::error::{CatalogError, Result};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::{JoinHandle, ThreadId};
use tokio::sync::{mpsc, oneshot};

type Job = Box<dyn FnOnce(&mut AlbumCollection) + Send>;

enum Message {
    Run(Job),
    Shutdown,
}

pub struct UiDispatcher {
    handle: DispatcherHandle,
    thread: Option<JoinHandle<()>>,
}

impl UiDispatcher {
    pub fn start() -> Result<Self> {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Message>();

        let thread = std::thread::Builder::new()
            .name("ui-dispatcher".to_string())
            .spawn(move || {
                let mut collection = AlbumCollection::new();
                tracing::debug!("UI dispatcher started");

                while let Some(message) = receiver.blocking_recv() {
                    match message {
                        Message::Run(job) => {
                            // 單一工作 panic 不拖垮整個 dispatcher，呼叫端會收到 PublicationError
                            if catch_unwind(AssertUnwindSafe(|| job(&mut collection))).is_err() {
                                tracing::error!("A dispatcher job panicked");
                            }
                        }
                        Message::Shutdown => break,
                    }
                }

                tracing::debug!("UI dispatcher stopped with {} albums", collection.len());
            })?;

        let thread_id = thread.thread().id();

        Ok(Self {
            handle: DispatcherHandle { sender, thread_id },
            thread: Some(thread),
        })
    }

    pub fn handle(&self) -> DispatcherHandle {
        self.handle.clone()
    }

    pub fn thread_id(&self) -> ThreadId {
        self.handle.thread_id
    }

    /// Stops the thread after the jobs already queued have run.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.handle.sender.send(Message::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("UI dispatcher thread terminated abnormally");
            }
        }
    }
}

impl Drop for UiDispatcher {
    fn drop(&mut self) {
        if self.thread.is_some() {
            let _ = self.handle.sender.send(Message::Shutdown);
        }
    }
}

/// Cloneable entry point for posting work to the dispatcher thread.
#[derive(Clone)]
pub struct DispatcherHandle {
    sender: mpsc::UnboundedSender<Message>,
    thread_id: ThreadId,
}

impl DispatcherHandle {
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Runs `f` on the dispatcher thread and waits for its result.
    pub async fn invoke<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut AlbumCollection) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let job: Job = Box::new(move |collection| {
            let _ = tx.send(f(collection));
        });

        self.sender
            .send(Message::Run(job))
            .map_err(|_| CatalogError::publication("UI dispatcher is not running"))?;

        rx.await
            .map_err(|_| CatalogError::publication("UI dispatcher dropped the job before completing it"))
    }

    pub async fn append(&self, album: Album) -> Result<Appended> {
        self.invoke(move |collection| collection.push(album)).await
    }

    /// Clears the collection; observers that panic on the reset are reported
    /// as a publication failure.
    pub async fn clear(&self) -> Result<()> {
        let failed = self.invoke(|collection| collection.clear()).await?;
        if failed > 0 {
            return Err(CatalogError::publication(format!(
                "{} observer(s) failed while handling the reset",
                failed
            )));
        }
        Ok(())
    }

    pub async fn subscribe<F>(&self, observer: F) -> Result<()>
    where
        F: FnMut(&CollectionChange) + Send + 'static,
    {
        self.invoke(move |collection| collection.subscribe(observer))
            .await
    }

    pub async fn watch(&self) -> Result<ChangeStream> {
        self.invoke(|collection| collection.watch()).await
    }

    pub async fn snapshot(&self) -> Result<Vec<Album>> {
        self.invoke(|collection| collection.items().to_vec()).await
    }

    pub async fn len(&self) -> Result<usize> {
        self.invoke(|collection| collection.len()).await
    }
}

impl std::fmt::Debug for DispatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatcherHandle")
            .field("thread_id", &self.thread_id)
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use std::sync::{Arc, Mutex};

    fn album(title: &str) -> Album {
        Album {
            title: title.to_string(),
            creator: "X".to_string(),
            year: 2000,
            category: "Rock".to_string(),
            cover_ref: "https://picsum.photos/200?9".to_string(),
        }
    }

    #[tokio::test]
    async fn test_jobs_run_on_dispatcher_thread() {
        let dispatcher = UiDispatcher::start().unwrap();
        let handle = dispatcher.handle();

        let ran_on = handle.invoke(|_| std::thread::current().id()).await.unwrap();
        let name = handle
            .invoke(|_| std::thread::current().name().map(str::to_string))
            .await
            .unwrap();

        assert_eq!(ran_on, dispatcher.thread_id());
        assert_ne!(ran_on, std::thread::current().id());
        assert_eq!(name.as_deref(), Some("ui-dispatcher"));

        dispatcher.shutdown();
    }

    #[tokio::test]
    async fn test_append_and_snapshot() {
        let dispatcher = UiDispatcher::start().unwrap();
        let handle = dispatcher.handle();

        assert_eq!(handle.append(album("A")).await.unwrap().index, 0);
        assert_eq!(handle.append(album("B")).await.unwrap().index, 1);

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot, vec![album("A"), album("B")]);
        assert_eq!(handle.len().await.unwrap(), 2);

        dispatcher.shutdown();
    }

    #[tokio::test]
    async fn test_observer_runs_on_dispatcher_thread() {
        let dispatcher = UiDispatcher::start().unwrap();
        let handle = dispatcher.handle();
        let threads = Arc::new(Mutex::new(Vec::new()));

        let seen = threads.clone();
        handle
            .subscribe(move |_| seen.lock().unwrap().push(std::thread::current().id()))
            .await
            .unwrap();

        handle.append(album("A")).await.unwrap();
        handle.clear().await.unwrap();

        let threads = threads.lock().unwrap();
        assert_eq!(threads.len(), 2);
        assert!(threads.iter().all(|id| *id == dispatcher.thread_id()));
        drop(threads);

        dispatcher.shutdown();
    }

    #[tokio::test]
    async fn test_invoke_after_shutdown_is_publication_error() {
        let dispatcher = UiDispatcher::start().unwrap();
        let handle = dispatcher.handle();
        dispatcher.shutdown();

        let err = handle.append(album("A")).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Publication);
        assert!(handle.is_closed());
    }

    #[tokio::test]
    async fn test_panicking_job_reports_error_and_dispatcher_survives() {
        let dispatcher = UiDispatcher::start().unwrap();
        let handle = dispatcher.handle();

        let err = handle
            .invoke(|_| -> usize { panic!("observer blew up") })
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Publication);

        assert_eq!(handle.append(album("A")).await.unwrap().index, 0);

        dispatcher.shutdown();
    }
}
