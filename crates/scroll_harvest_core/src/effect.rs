#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Run one extraction pass over the current page.
    RunExtraction,
    /// Cancel any pending quiet-period timer and start a new one.
    RestartDebounce,
    /// Drop the pending quiet-period timer, if any.
    CancelDebounce,
    /// Dump the accumulated results.
    ReportResults,
    /// Nothing is in flight any more; the driver may exit.
    Shutdown,
}
