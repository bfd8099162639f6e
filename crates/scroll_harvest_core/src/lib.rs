//! Scroll harvest core: captured-item bookkeeping and the pure session trigger state machine.
mod capture;
mod effect;
mod item;
mod msg;
mod state;
mod update;
mod view_model;

pub use capture::{CaptureOutcome, ScanSummary, ScrapeState};
pub use effect::Effect;
pub use item::{Item, CODENAME_NOT_FOUND};
pub use msg::Msg;
pub use state::{SessionPhase, SessionState};
pub use update::update;
pub use view_model::SessionView;
