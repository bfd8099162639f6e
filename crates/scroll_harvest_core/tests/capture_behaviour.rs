use std::sync::Once;

use pretty_assertions::assert_eq;
use scroll_harvest_core::{CaptureOutcome, Item, ScrapeState};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(harvest_logging::initialize_for_tests);
}

/// Offer a whole scan worth of `(href, codename)` pairs, in document order.
fn scan(state: &mut ScrapeState, targets: &[(&str, Option<&str>)]) -> Vec<CaptureOutcome> {
    targets
        .iter()
        .map(|(href, codename)| state.record(Some(href), *codename))
        .collect()
}

#[test]
fn repeated_scans_never_duplicate_hrefs() {
    init_logging();
    let mut state = ScrapeState::new();
    let page = [("/a", Some("Alpha")), ("/b", Some("Beta")), ("/a", Some("Alpha"))];

    scan(&mut state, &page);
    scan(&mut state, &page);
    scan(&mut state, &page);

    assert_eq!(
        state.snapshot(),
        vec![Item::new("/a", "Alpha"), Item::new("/b", "Beta")]
    );
}

#[test]
fn first_capture_wins_even_if_codename_changes_later() {
    init_logging();
    let mut state = ScrapeState::new();
    scan(&mut state, &[("/a", Some("Alpha"))]);
    let outcomes = scan(&mut state, &[("/a", Some("Renamed"))]);

    assert_eq!(outcomes, vec![CaptureOutcome::AlreadySeen]);
    assert_eq!(state.snapshot(), vec![Item::new("/a", "Alpha")]);
}

#[test]
fn order_is_first_capture_order_regardless_of_later_dom_order() {
    init_logging();
    let mut state = ScrapeState::new();
    scan(&mut state, &[("/b", Some("Beta")), ("/a", Some("Alpha"))]);
    scan(
        &mut state,
        &[("/c", Some("Gamma")), ("/a", Some("Alpha")), ("/b", Some("Beta"))],
    );

    let hrefs: Vec<_> = state.items().iter().map(|i| i.href.as_str()).collect();
    assert_eq!(hrefs, vec!["/b", "/a", "/c"]);
}

#[test]
fn missing_codename_is_retried_on_the_next_scan() {
    init_logging();
    let mut state = ScrapeState::new();

    let first = scan(&mut state, &[("/a", Some("Alpha")), ("/b", None)]);
    assert_eq!(first[1], CaptureOutcome::Deferred);
    assert!(!state.is_seen("/b"));
    assert_eq!(state.len(), 1);

    let second = scan(&mut state, &[("/a", Some("Alpha")), ("/b", Some("Beta"))]);
    assert_eq!(
        second,
        vec![
            CaptureOutcome::AlreadySeen,
            CaptureOutcome::Captured {
                item: Item::new("/b", "Beta"),
                total: 2
            }
        ]
    );

    scan(&mut state, &[("/b", Some("Beta"))]);
    assert_eq!(state.len(), 2);
}

#[test]
fn empty_or_absent_href_is_never_captured() {
    init_logging();
    let mut state = ScrapeState::new();
    assert_eq!(state.record(None, Some("Ghost")), CaptureOutcome::MissingHref);
    assert_eq!(state.record(Some(""), Some("Ghost")), CaptureOutcome::MissingHref);
    assert!(state.is_empty());
}

#[test]
fn snapshot_is_isolated_from_later_captures() {
    init_logging();
    let mut state = ScrapeState::new();
    scan(&mut state, &[("/a", Some("Alpha"))]);
    let before = state.snapshot();

    scan(&mut state, &[("/b", Some("Beta"))]);
    let after = state.snapshot();

    assert_eq!(before, vec![Item::new("/a", "Alpha")]);
    assert_eq!(after.len(), 2);
}

#[test]
fn reset_forgets_everything() {
    init_logging();
    let mut state = ScrapeState::new();
    scan(&mut state, &[("/a", Some("Alpha"))]);
    state.reset();

    assert!(state.is_empty());
    assert!(!state.is_seen("/a"));
    let outcomes = scan(&mut state, &[("/a", Some("Alpha"))]);
    assert!(matches!(outcomes[0], CaptureOutcome::Captured { total: 1, .. }));
}
