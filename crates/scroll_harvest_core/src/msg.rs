#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The session was started; triggers the unconditional initial scan.
    Started,
    /// The page scrolled (or grew).
    Scrolled,
    /// No scroll signal arrived for a full quiet period.
    QuietPeriodElapsed,
    /// The in-flight extraction finished.
    ExtractionFinished { captured: usize, total: usize },
    /// Caller asked for the current results.
    ResultsRequested,
    /// Caller asked the session to stop.
    StopRequested,
    /// Fallback for placeholder wiring.
    NoOp,
}
