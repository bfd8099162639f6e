use crate::view_model::SessionView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Watching,
    Stopping,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    phase: SessionPhase,
    extracting: bool,
    rerun_pending: bool,
    extractions_run: u64,
    scroll_events: u64,
    last_captured: usize,
    last_total: usize,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_extracting(&self) -> bool {
        self.extracting
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase,
            extracting: self.extracting,
            rerun_pending: self.rerun_pending,
            extractions_run: self.extractions_run,
            scroll_events: self.scroll_events,
            last_captured: self.last_captured,
            last_total: self.last_total,
        }
    }

    pub(crate) fn start(&mut self) {
        self.phase = SessionPhase::Watching;
    }

    pub(crate) fn begin_stop(&mut self) {
        self.phase = SessionPhase::Stopping;
    }

    pub(crate) fn finish_stop(&mut self) {
        self.phase = SessionPhase::Stopped;
    }

    pub(crate) fn note_scroll(&mut self) {
        self.scroll_events += 1;
    }

    /// Returns `false` when an extraction is already in flight; the request is
    /// then folded into the single rerun slot.
    pub(crate) fn try_begin_extraction(&mut self) -> bool {
        if self.extracting {
            self.rerun_pending = true;
            return false;
        }
        self.extracting = true;
        self.extractions_run += 1;
        true
    }

    /// Marks the in-flight extraction done and reports whether a rerun was queued.
    pub(crate) fn finish_extraction(&mut self, captured: usize, total: usize) -> bool {
        self.extracting = false;
        self.last_captured = captured;
        self.last_total = total;
        std::mem::take(&mut self.rerun_pending)
    }

    pub(crate) fn drop_rerun(&mut self) {
        self.rerun_pending = false;
    }
}
