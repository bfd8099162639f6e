//! Scroll harvest engine: page sources, incremental extraction, timers and the session driver.
mod decode;
mod fetch;
mod harvester;
mod persist;
mod report;
mod session;
mod sink;
mod source;
mod targets;
mod timer;
mod types;

pub use decode::{decode_page, DecodeError, DecodedPage};
pub use fetch::{FetchSettings, HttpPageSource};
pub use harvester::{IncrementalScraper, ScraperSettings, DEFAULT_ITEM_DELAY};
pub use persist::{ensure_output_dir, export_results, AtomicFileWriter, PersistError};
pub use report::format_results;
pub use session::{Session, SessionHandle, SessionSettings};
pub use sink::{ChannelSink, NullSink, ProgressSink};
pub use source::{FilePageSource, PageSource, SourceError, StaticPageSource};
pub use targets::{
    parse_targets, SelectorError, TargetElement, TargetSelectors, DEFAULT_CODENAME_SELECTOR,
    DEFAULT_ITEM_SELECTOR,
};
pub use timer::{DebounceTimer, Scheduler, TimerHandle, TokioScheduler, DEFAULT_QUIET_PERIOD};
pub use types::{FailureKind, FetchError, ScrapeEvent};
