use crate::SessionPhase;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub extracting: bool,
    pub rerun_pending: bool,
    pub extractions_run: u64,
    pub scroll_events: u64,
    /// Items newly captured by the most recent finished extraction.
    pub last_captured: usize,
    /// Accumulator size reported by the most recent finished extraction.
    pub last_total: usize,
}
