use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use harvest_logging::{harvest_debug, harvest_error, harvest_info, harvest_warn};
use scroll_harvest_core::{CaptureOutcome, Item, ScanSummary, ScrapeState};

use crate::report::format_results;
use crate::{parse_targets, PageSource, ProgressSink, ScrapeEvent, TargetSelectors};

/// Pause before reading the codename of a not-yet-seen target.
pub const DEFAULT_ITEM_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct ScraperSettings {
    pub item_delay: Duration,
    pub selectors: TargetSelectors,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            item_delay: DEFAULT_ITEM_DELAY,
            selectors: TargetSelectors::default(),
        }
    }
}

/// Re-scans a page for target items and keeps a deduplicated,
/// insertion-ordered log of every item seen so far.
///
/// Extractions are serialized: a second `extract()` waits for the running one
/// and then scans the page as it looks at that point.
pub struct IncrementalScraper {
    source: Arc<dyn PageSource>,
    settings: ScraperSettings,
    sink: Arc<dyn ProgressSink>,
    state: Mutex<ScrapeState>,
    extract_lock: tokio::sync::Mutex<()>,
}

impl IncrementalScraper {
    pub fn new(
        source: Arc<dyn PageSource>,
        settings: ScraperSettings,
        sink: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            source,
            settings,
            sink,
            state: Mutex::new(ScrapeState::new()),
            extract_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Scan the current page once. Never fails: an unreadable page counts as
    /// a scan that found nothing.
    pub async fn extract(&self) -> ScanSummary {
        let _running = self.extract_lock.lock().await;
        self.sink.emit(ScrapeEvent::ScanStarted);

        let mut summary = ScanSummary::default();
        let targets = match self.source.load().await {
            Ok(html) => parse_targets(&html, &self.settings.selectors),
            Err(err) => {
                harvest_warn!("Skipping scan of {}: {}", self.source.describe(), err);
                self.sink.emit(ScrapeEvent::ScanCompleted(summary));
                return summary;
            }
        };

        for target in targets {
            if let Some(href) = target.href.as_deref() {
                if self.lock_state().is_seen(href) {
                    summary.tally(&CaptureOutcome::AlreadySeen);
                    continue;
                }
            }

            tokio::time::sleep(self.settings.item_delay).await;

            let outcome = self
                .lock_state()
                .record(target.href.as_deref(), target.codename.as_deref());
            if let CaptureOutcome::Captured { item, total } = &outcome {
                harvest_info!("New item found: {} -> {}", item.href, item.codename);
                harvest_info!("Total unique items so far: {}", total);
                self.sink.emit(ScrapeEvent::ItemCaptured {
                    item: item.clone(),
                    total: *total,
                });
            }
            summary.tally(&outcome);
        }

        harvest_debug!(
            "Scan done: visited={} captured={} seen={} deferred={} no_href={}",
            summary.visited,
            summary.captured,
            summary.already_seen,
            summary.deferred,
            summary.missing_href
        );
        self.sink.emit(ScrapeEvent::ScanCompleted(summary));
        summary
    }

    /// Copy of the accumulated items, logged as a pretty JSON dump plus count.
    pub fn results(&self) -> Vec<Item> {
        let items = self.snapshot();
        match format_results(&items) {
            Ok(dump) => harvest_info!("Current results: {}", dump),
            Err(err) => harvest_error!("Failed to render results: {}", err),
        }
        harvest_info!("Total unique items: {}", items.len());
        items
    }

    /// Copy of the accumulated items without logging.
    pub fn snapshot(&self) -> Vec<Item> {
        self.lock_state().snapshot()
    }

    pub fn len(&self) -> usize {
        self.lock_state().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_state().is_empty()
    }

    /// Forget every captured item and seen href.
    pub fn reset(&self) {
        self.lock_state().reset();
        harvest_info!("Results cleared");
    }

    fn lock_state(&self) -> MutexGuard<'_, ScrapeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
