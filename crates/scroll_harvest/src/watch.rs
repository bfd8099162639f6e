use std::sync::Arc;

use harvest_logging::harvest_warn;
use scroll_harvest_engine::PageSource;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Changed,
    Unchanged,
    Failed,
}

/// Turns page growth into scroll signals by fingerprinting each load.
pub struct PageWatcher {
    source: Arc<dyn PageSource>,
    last: Option<[u8; 32]>,
}

impl PageWatcher {
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self { source, last: None }
    }

    /// Records the current content as the baseline without reporting a change.
    pub async fn prime(&mut self) {
        let _ = self.poll().await;
    }

    pub async fn poll(&mut self) -> PollOutcome {
        let html = match self.source.load().await {
            Ok(html) => html,
            Err(err) => {
                harvest_warn!("Poll of {} failed: {}", self.source.describe(), err);
                return PollOutcome::Failed;
            }
        };
        let digest: [u8; 32] = Sha256::digest(html.as_bytes()).into();
        if self.last.replace(digest) == Some(digest) {
            PollOutcome::Unchanged
        } else {
            PollOutcome::Changed
        }
    }
}
