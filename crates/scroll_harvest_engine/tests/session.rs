use std::sync::{Arc, Once};
use std::time::Duration;

use pretty_assertions::assert_eq;
use scroll_harvest_core::{Item, SessionPhase};
use scroll_harvest_engine::{
    IncrementalScraper, NullSink, ScraperSettings, Session, SessionSettings, StaticPageSource,
};
use tokio::time::sleep;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(harvest_logging::initialize_for_tests);
}

const PAGE_BEFORE: &str = r#"<html><body>
<a class="targets-list-item" href="/a"><div><h4 class="target-tooltip-codename-header">Alpha</h4></div></a>
<a class="targets-list-item" href="/b"></a>
</body></html>"#;

const PAGE_AFTER: &str = r#"<html><body>
<a class="targets-list-item" href="/a"><div><h4 class="target-tooltip-codename-header">Alpha</h4></div></a>
<a class="targets-list-item" href="/b"><h4 class="target-tooltip-codename-header">Beta</h4></a>
</body></html>"#;

fn scraper(source: Arc<StaticPageSource>) -> Arc<IncrementalScraper> {
    Arc::new(IncrementalScraper::new(
        source,
        ScraperSettings::default(),
        Arc::new(NullSink),
    ))
}

#[tokio::test(start_paused = true)]
async fn injected_codename_is_picked_up_after_scroll_settles() {
    init_logging();
    let source = Arc::new(StaticPageSource::new(PAGE_BEFORE));
    let scraper = scraper(source.clone());
    let handle = Session::spawn(scraper.clone(), SessionSettings::default());

    handle
        .wait_until(|v| v.extractions_run == 1 && !v.extracting)
        .await;
    assert_eq!(scraper.snapshot(), vec![Item::new("/a", "Alpha")]);

    source.replace(PAGE_AFTER);
    handle.scrolled();
    let view = handle
        .wait_until(|v| v.extractions_run == 2 && !v.extracting)
        .await;
    assert_eq!(view.last_captured, 1);
    assert_eq!(view.last_total, 2);

    let items = handle.stop().await;
    assert_eq!(
        items,
        vec![Item::new("/a", "Alpha"), Item::new("/b", "Beta")]
    );
}

#[tokio::test(start_paused = true)]
async fn scroll_burst_triggers_a_single_extraction() {
    init_logging();
    let source = Arc::new(StaticPageSource::new(PAGE_AFTER));
    let handle = Session::spawn(scraper(source), SessionSettings::default());
    handle
        .wait_until(|v| v.extractions_run == 1 && !v.extracting)
        .await;

    for _ in 0..4 {
        handle.scrolled();
        sleep(Duration::from_millis(50)).await;
    }
    sleep(Duration::from_secs(2)).await;

    let view = handle.view();
    assert_eq!(view.scroll_events, 4);
    assert_eq!(view.extractions_run, 2);
    assert!(!view.extracting);
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn stop_waits_for_the_running_extraction() {
    init_logging();
    let source = Arc::new(StaticPageSource::new(PAGE_AFTER));
    let handle = Session::spawn(scraper(source), SessionSettings::default());

    // Initial scan is still sleeping on its first item.
    sleep(Duration::from_millis(10)).await;
    assert!(handle.view().extracting);

    let items = handle.stop().await;
    assert_eq!(
        items,
        vec![Item::new("/a", "Alpha"), Item::new("/b", "Beta")]
    );
}

#[tokio::test(start_paused = true)]
async fn results_request_keeps_session_watching() {
    init_logging();
    let source = Arc::new(StaticPageSource::new(PAGE_BEFORE));
    let handle = Session::spawn(scraper(source), SessionSettings::default());
    handle
        .wait_until(|v| v.extractions_run == 1 && !v.extracting)
        .await;

    handle.request_results();
    sleep(Duration::from_millis(1)).await;
    assert_eq!(handle.view().phase, SessionPhase::Watching);
    assert_eq!(handle.scraper().len(), 1);
    handle.stop().await;
}
