use std::sync::mpsc;

use crate::ScrapeEvent;

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ScrapeEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: ScrapeEvent) {}
}

pub struct ChannelSink {
    tx: mpsc::Sender<ScrapeEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<ScrapeEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelSink {
    fn emit(&self, event: ScrapeEvent) {
        let _ = self.tx.send(event);
    }
}
