//! Pop Watch - CCC population report watcher
//!
//! Runs one scan of the watchlist and exits. Meant to be started by a scheduler
//! (cron, CI workflow) rather than kept running.

use clap::Parser;
use pop_watch::config::{
    default_watchlist, load_watchlist, ApiSettings, DEFAULT_BASE_URL, DEFAULT_MAX_PAGES,
    DEFAULT_STATE_FILE,
};
use pop_watch::{
    run_scan, CccClient, Config, DiscordNotifier, LogNotifier, Notifier, SnapshotStore,
};
use std::path::PathBuf;

/// Watch CCC population reports and post new pops to Discord
#[derive(Parser, Debug)]
#[command(name = "pop_watch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Discord webhook URL; notifications are skipped when unset
    #[arg(long, env = "DISCORD_WEBHOOK_URL", hide_env_values = true)]
    webhook_url: Option<String>,

    /// Path to the JSON state file
    #[arg(short, long, default_value = DEFAULT_STATE_FILE)]
    state_file: PathBuf,

    /// JSON watchlist file (defaults to the built-in list)
    #[arg(short, long)]
    watchlist: Option<PathBuf>,

    /// Search pages scanned per card
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: u32,

    /// Population report search endpoint
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Scan and log the notification without posting it or saving state
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let watchlist = match &args.watchlist {
        Some(path) => match load_watchlist(path) {
            Ok(items) => items,
            Err(e) => {
                log::error!("Failed to load watchlist {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => default_watchlist(),
    };

    let config = Config {
        state_path: args.state_file,
        api: ApiSettings {
            base_url: args.base_url,
            max_pages: args.max_pages,
            ..ApiSettings::default()
        },
        watchlist,
        dry_run: args.dry_run,
        ..Config::default()
    }
    .with_webhook(args.webhook_url);

    log::info!("--- Starting pop scan ---");
    log::info!(
        "Watching {} cards, state file: {}",
        config.watchlist.len(),
        config.state_path.display()
    );

    let source = CccClient::new(config.api.clone());
    let store = SnapshotStore::new(&config.state_path);
    let notifier: Box<dyn Notifier> = if config.dry_run {
        Box::new(LogNotifier)
    } else {
        Box::new(DiscordNotifier::new(config.webhook_url.clone()))
    };

    match run_scan(&config, &source, notifier.as_ref(), &store) {
        Ok(outcome) => {
            log::info!(
                "Scan finished: {:?} notification ({:?}), {} changed, snapshot {}",
                outcome.notification.severity,
                outcome.delivery,
                outcome.summary.changed.len(),
                if outcome.saved {
                    "saved"
                } else if outcome.dirty {
                    "not saved"
                } else {
                    "unchanged"
                }
            );
        }
        Err(e) => {
            log::error!(
                "Cannot read state file {}: {}",
                config.state_path.display(),
                e
            );
            std::process::exit(1);
        }
    }
}
