use crate::core::augment::CoverAugmenter;
use crate::core::client::HttpCatalogClient;
use crate::core::dispatcher::DispatcherHandle;
use crate::core::{CatalogSource, ConfigProvider, FailureHandler, LoadState};
use crate::utils::error::{CatalogError, Result};
use chrono::{DateTime, Utc};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Outcome of one loader run.
#[derive(Debug)]
pub struct LoadReport {
    pub state: LoadState,
    pub fetched: usize,
    pub published: usize,
    pub error: Option<CatalogError>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl LoadReport {
    pub fn is_success(&self) -> bool {
        self.state == LoadState::Done
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Writes the failure message to the log and to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFailureHandler;

impl FailureHandler for ConsoleFailureHandler {
    fn on_failure(&self, message: &str) {
        tracing::warn!("Failure reported to user: {}", message);
        eprintln!("❌ {}", message);
    }
}

#[derive(Default)]
struct Progress {
    fetched: usize,
    published: usize,
}

/// Drives fetch, augment and publish for one page lifetime.
///
/// A loader runs once: [`AlbumLoader::run`] consumes it. To load again build
/// a new loader against the same dispatcher.
pub struct AlbumLoader<S: CatalogSource, H: FailureHandler> {
    source: S,
    augmenter: CoverAugmenter,
    dispatcher: DispatcherHandle,
    failure_handler: H,
    reset_before_publish: bool,
    state: LoadState,
}

impl<H: FailureHandler> AlbumLoader<HttpCatalogClient, H> {
    pub fn from_config<C: ConfigProvider>(
        config: &C,
        dispatcher: DispatcherHandle,
        failure_handler: H,
    ) -> Self {
        AlbumLoader::new(
            HttpCatalogClient::new(config.api_endpoint()),
            dispatcher,
            failure_handler,
        )
        .with_augmenter(CoverAugmenter::new(config.cover_service()))
        .reset_before_publish(config.reset_before_publish())
    }
}

impl<S: CatalogSource, H: FailureHandler> AlbumLoader<S, H> {
    pub fn new(source: S, dispatcher: DispatcherHandle, failure_handler: H) -> Self {
        Self {
            source,
            augmenter: CoverAugmenter::default(),
            dispatcher,
            failure_handler,
            reset_before_publish: false,
            state: LoadState::Idle,
        }
    }

    pub fn with_augmenter(mut self, augmenter: CoverAugmenter) -> Self {
        self.augmenter = augmenter;
        self
    }

    /// Clear the collection after a successful fetch, before the first append.
    pub fn reset_before_publish(mut self, reset: bool) -> Self {
        self.reset_before_publish = reset;
        self
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub async fn run(mut self) -> LoadReport {
        let started_at = Utc::now();
        let mut progress = Progress::default();

        let error = match self.load(&mut progress).await {
            Ok(()) => {
                self.transition(LoadState::Done);
                tracing::info!("✅ Published {} albums", progress.published);
                None
            }
            Err(e) => {
                self.transition(LoadState::Failed);
                tracing::error!(
                    "❌ Album load failed after {} of {} albums: {} (Category: {:?})",
                    progress.published,
                    progress.fetched,
                    e,
                    e.category()
                );
                self.report_failure(&e.user_friendly_message());
                Some(e)
            }
        };

        LoadReport {
            state: self.state,
            fetched: progress.fetched,
            published: progress.published,
            error,
            started_at,
            finished_at: Utc::now(),
        }
    }

    async fn load(&mut self, progress: &mut Progress) -> Result<()> {
        self.transition(LoadState::Fetching);
        let raw_albums = self.source.fetch_all().await?;
        progress.fetched = raw_albums.len();
        tracing::info!("Fetched {} albums", progress.fetched);

        let albums = self.augmenter.augment_all(raw_albums);

        self.transition(LoadState::Publishing);
        if self.reset_before_publish {
            self.dispatcher.clear().await?;
        }

        // 一筆一筆送到 dispatcher，等上一筆完成才送下一筆
        for album in albums {
            let appended = self.dispatcher.append(album).await?;
            tracing::debug!("Album appended at index {}", appended.index);
            progress.published += 1;

            // 專輯已經在集合裡，observer 出錯時停止後續發佈
            if appended.failed_observers > 0 {
                return Err(CatalogError::publication(format!(
                    "{} observer(s) failed while handling album #{}",
                    appended.failed_observers, appended.index
                )));
            }
        }

        Ok(())
    }

    /// A panicking handler is logged; the run still returns its report.
    fn report_failure(&self, message: &str) {
        let handler = &self.failure_handler;
        if catch_unwind(AssertUnwindSafe(|| handler.on_failure(message))).is_err() {
            tracing::error!("❌ Failure handler panicked while reporting: {}", message);
        }
    }

    fn transition(&mut self, next: LoadState) {
        tracing::debug!("Loader state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
