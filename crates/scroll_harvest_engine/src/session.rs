use std::sync::Arc;
use std::time::Duration;

use harvest_logging::{harvest_debug, harvest_info};
use scroll_harvest_core::{update, Effect, Item, Msg, SessionState, SessionView};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::timer::{DebounceTimer, Scheduler, TokioScheduler, DEFAULT_QUIET_PERIOD};
use crate::IncrementalScraper;

#[derive(Clone)]
pub struct SessionSettings {
    pub quiet_period: Duration,
    pub scheduler: Arc<dyn Scheduler>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            quiet_period: DEFAULT_QUIET_PERIOD,
            scheduler: Arc::new(TokioScheduler),
        }
    }
}

/// Drives one scraper: an initial scan on start, then one scan per settled
/// burst of scroll signals.
pub struct Session {
    scraper: Arc<IncrementalScraper>,
    debounce: DebounceTimer,
    msg_tx: mpsc::WeakUnboundedSender<Msg>,
    view_tx: watch::Sender<SessionView>,
}

impl Session {
    /// Start a session on the current tokio runtime. The initial extraction is
    /// queued immediately.
    pub fn spawn(scraper: Arc<IncrementalScraper>, settings: SessionSettings) -> SessionHandle {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(SessionView::default());

        let session = Session {
            scraper: scraper.clone(),
            debounce: DebounceTimer::new(settings.scheduler, settings.quiet_period),
            msg_tx: msg_tx.downgrade(),
            view_tx,
        };
        let _ = msg_tx.send(Msg::Started);
        let task = tokio::spawn(session.run(msg_rx));

        SessionHandle {
            msg_tx,
            view_rx,
            scraper,
            task,
        }
    }

    async fn run(self, mut msg_rx: mpsc::UnboundedReceiver<Msg>) {
        let mut state = SessionState::new();
        while let Some(msg) = msg_rx.recv().await {
            harvest_debug!("Session message: {:?}", msg);
            let (next, effects) = update(state, msg);
            state = next;
            self.view_tx.send_replace(state.view());

            for effect in effects {
                if !self.apply(effect) {
                    harvest_info!("Session stopped with {} items", self.scraper.len());
                    return;
                }
            }
        }
        self.debounce.cancel();
    }

    /// Returns `false` once the session should exit.
    fn apply(&self, effect: Effect) -> bool {
        match effect {
            Effect::RunExtraction => {
                let Some(tx) = self.msg_tx.upgrade() else {
                    return false;
                };
                let scraper = self.scraper.clone();
                tokio::spawn(async move {
                    let summary = scraper.extract().await;
                    let _ = tx.send(Msg::ExtractionFinished {
                        captured: summary.captured,
                        total: scraper.len(),
                    });
                });
            }
            Effect::RestartDebounce => {
                let Some(tx) = self.msg_tx.upgrade() else {
                    return false;
                };
                self.debounce.reset(async move {
                    let _ = tx.send(Msg::QuietPeriodElapsed);
                });
            }
            Effect::CancelDebounce => self.debounce.cancel(),
            Effect::ReportResults => {
                self.scraper.results();
            }
            Effect::Shutdown => return false,
        }
        true
    }
}

pub struct SessionHandle {
    msg_tx: mpsc::UnboundedSender<Msg>,
    view_rx: watch::Receiver<SessionView>,
    scraper: Arc<IncrementalScraper>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Signal that the page scrolled or grew.
    pub fn scrolled(&self) {
        let _ = self.msg_tx.send(Msg::Scrolled);
    }

    /// Ask the session to log the current results dump.
    pub fn request_results(&self) {
        let _ = self.msg_tx.send(Msg::ResultsRequested);
    }

    pub fn scraper(&self) -> &Arc<IncrementalScraper> {
        &self.scraper
    }

    pub fn view(&self) -> SessionView {
        self.view_rx.borrow().clone()
    }

    /// Wait until the session view satisfies `predicate`. Returns the last
    /// view seen if the session exits first.
    pub async fn wait_until(&self, predicate: impl FnMut(&SessionView) -> bool) -> SessionView {
        let mut view_rx = self.view_rx.clone();
        let view = match view_rx.wait_for(predicate).await {
            Ok(view) => view.clone(),
            Err(_) => self.view_rx.borrow().clone(),
        };
        view
    }

    /// Stop the session, letting any in-flight extraction finish, and return
    /// the final items.
    pub async fn stop(self) -> Vec<Item> {
        let _ = self.msg_tx.send(Msg::StopRequested);
        drop(self.msg_tx);
        let _ = self.task.await;
        self.scraper.snapshot()
    }
}
