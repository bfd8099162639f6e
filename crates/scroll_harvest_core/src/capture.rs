use std::collections::HashSet;

use crate::item::{Item, CODENAME_NOT_FOUND};

/// Result of offering one target element to [`ScrapeState::record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// New item appended; `total` is the accumulator size afterwards.
    Captured { item: Item, total: usize },
    /// The href was captured earlier; nothing changed.
    AlreadySeen,
    /// The codename is not resolvable yet; the href stays eligible for a later scan.
    Deferred,
    /// The element carries no usable href.
    MissingHref,
}

/// Per-scan tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    pub visited: usize,
    pub captured: usize,
    pub already_seen: usize,
    pub deferred: usize,
    pub missing_href: usize,
}

impl ScanSummary {
    pub fn tally(&mut self, outcome: &CaptureOutcome) {
        self.visited += 1;
        match outcome {
            CaptureOutcome::Captured { .. } => self.captured += 1,
            CaptureOutcome::AlreadySeen => self.already_seen += 1,
            CaptureOutcome::Deferred => self.deferred += 1,
            CaptureOutcome::MissingHref => self.missing_href += 1,
        }
    }
}

/// Seen hrefs plus the append-only, insertion-ordered accumulator.
///
/// Every href in the seen set maps to exactly one accumulated [`Item`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapeState {
    seen: HashSet<String>,
    items: Vec<Item>,
}

impl ScrapeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_seen(&self, href: &str) -> bool {
        self.seen.contains(href)
    }

    /// Offer a target element. Only a non-empty, unseen href with a resolved
    /// codename is captured; a missing codename leaves the href unseen.
    pub fn record(&mut self, href: Option<&str>, codename: Option<&str>) -> CaptureOutcome {
        let href = match href {
            Some(href) if !href.is_empty() => href,
            _ => return CaptureOutcome::MissingHref,
        };
        if self.is_seen(href) {
            return CaptureOutcome::AlreadySeen;
        }
        let codename = codename.unwrap_or(CODENAME_NOT_FOUND);
        if codename == CODENAME_NOT_FOUND {
            return CaptureOutcome::Deferred;
        }

        let item = Item::new(href, codename);
        self.seen.insert(item.href.clone());
        self.items.push(item.clone());
        CaptureOutcome::Captured {
            item,
            total: self.items.len(),
        }
    }

    pub fn snapshot(&self) -> Vec<Item> {
        self.items.clone()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn reset(&mut self) {
        self.seen.clear();
        self.items.clear();
    }
}
