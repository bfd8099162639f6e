use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use harvest_logging::{harvest_debug, harvest_info};
use scroll_harvest_core::Item;
use scroll_harvest_engine::{
    export_results, format_results, FilePageSource, HttpPageSource, IncrementalScraper, NullSink,
    PageSource, ScraperSettings, Session, SessionHandle, SessionSettings, TargetSelectors,
};
use url::Url;

use crate::cli::Args;
use crate::config::HarvestConfig;
use crate::watch::{PageWatcher, PollOutcome};

pub async fn run(args: Args) -> anyhow::Result<()> {
    let config = HarvestConfig::from_args(&args)?;
    harvest_debug!("Effective config: {:?}", config);

    let source = open_source(&args.source, &config)?;
    let selectors = TargetSelectors::parse(&config.item_selector, &config.codename_selector)?;
    let scraper = Arc::new(IncrementalScraper::new(
        source.clone(),
        ScraperSettings {
            item_delay: config.item_delay(),
            selectors,
        },
        Arc::new(NullSink),
    ));

    harvest_info!(
        "Starting extraction of {} - watching for more items...",
        source.describe()
    );
    let (mut watcher, handle) = start_watching(source, scraper, &config).await;
    watch_until_idle(&mut watcher, &config, |outcome| {
        if outcome == PollOutcome::Changed {
            handle.scrolled();
        }
    })
    .await;

    let items = handle.stop().await;
    println!("{}", finish(&items, &config)?);
    Ok(())
}

fn open_source(raw: &str, config: &HarvestConfig) -> anyhow::Result<Arc<dyn PageSource>> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            let source = HttpPageSource::new(url.as_str(), config.fetch_settings())
                .with_context(|| format!("cannot watch {raw}"))?;
            Ok(Arc::new(source))
        }
        _ => Ok(Arc::new(FilePageSource::new(raw))),
    }
}

/// The change baseline is taken before the session starts, so any growth
/// after it is signalled at least once.
async fn start_watching(
    source: Arc<dyn PageSource>,
    scraper: Arc<IncrementalScraper>,
    config: &HarvestConfig,
) -> (PageWatcher, SessionHandle) {
    let mut watcher = PageWatcher::new(source);
    watcher.prime().await;
    let handle = Session::spawn(
        scraper,
        SessionSettings {
            quiet_period: config.quiet_period(),
            ..SessionSettings::default()
        },
    );
    (watcher, handle)
}

/// Poll until `idle_polls` consecutive polls bring nothing new, or Ctrl-C.
async fn watch_until_idle(
    watcher: &mut PageWatcher,
    config: &HarvestConfig,
    mut on_poll: impl FnMut(PollOutcome),
) {
    let mut ticker = tokio::time::interval(config.poll_interval());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    ticker.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut idle = 0u32;
    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                harvest_info!("Interrupted, finishing up");
                return;
            }
            _ = ticker.tick() => {
                let outcome = watcher.poll().await;
                on_poll(outcome);
                if outcome == PollOutcome::Changed {
                    idle = 0;
                    continue;
                }
                idle += 1;
                if config.idle_polls > 0 && idle >= config.idle_polls {
                    harvest_info!("No changes for {} polls, stopping", idle);
                    return;
                }
            }
        }
    }
}

/// Export the final items if an output directory is configured and return
/// the JSON dump for stdout.
fn finish(items: &[Item], config: &HarvestConfig) -> anyhow::Result<String> {
    harvest_info!("Total unique items: {}", items.len());
    if let Some(dir) = &config.output_dir {
        let exported_utc = Utc::now().to_rfc3339();
        let path = export_results(dir, &config.export_filename, items, &exported_utc)
            .with_context(|| format!("failed to export results into {}", dir.display()))?;
        harvest_info!("Exported {} items to {}", items.len(), path.display());
    }
    Ok(format_results(items)?)
}
