mod matching;
mod pipeline;
mod report;
mod settings;

use crate::pipeline::{Outcome, Pipeline};
use crate::settings::{CliFlags, POST_TITLE, Settings};
use boxing_odds_api::client::{OddsApi, RedditApi};
use boxing_odds_api::{OddsFeed, OddsSource, Submission};
use log::{debug, error, info};

/// How many of the account's own posts are searched for an earlier report.
const POSTED_LOOKBACK: u32 = 100;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(flags) = handle_cli_args() else {
        return Ok(());
    };

    better_panic::install();

    env_logger::Builder::new()
        .filter_level(flags.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
    let settings = Settings::load(flags)?;

    let pipeline = Pipeline::new(settings.rules.clone())?;
    let odds = OddsApi::new(settings.api_key.clone());
    let mut reddit = RedditApi::new(settings.credentials.clone());
    reddit.authenticate().await?;

    let submissions = reddit
        .fetch_new(&settings.source_subreddit, settings.thread_limit)
        .await?;
    let threads: Vec<&Submission> = submissions
        .iter()
        .filter(|s| s.is_fight_thread(&settings.thread_marker))
        .collect();
    info!(
        "{} fight threads in the newest {} posts of r/{}",
        threads.len(),
        submissions.len(),
        settings.source_subreddit
    );

    for thread in threads {
        handle_thread(thread, &settings, &pipeline, &odds, &reddit).await;
    }

    Ok(())
}

/// Parse flags; `None` means the invocation was fully handled (help/version).
fn handle_cli_args() -> Option<CliFlags> {
    let mut flags = CliFlags::default();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", usage_text());
                return None;
            }
            "-V" | "--version" => {
                println!("boxing-odds {}", env!("CARGO_PKG_VERSION"));
                return None;
            }
            "-p" | "--post" => flags.post = true,
            "-v" | "--verbose" => flags.verbose = true,
            _ => {
                eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
                std::process::exit(2);
            }
        }
    }

    Some(flags)
}

fn usage_text() -> &'static str {
    "boxing-odds - moneyline odds for r/Boxing fight threads

Usage:
  boxing-odds [--post] [--verbose]
  boxing-odds --help
  boxing-odds --version

Options:
  -p, --post      Submit reports instead of printing them
  -v, --verbose   Debug logging

Environment (a .env file is read if present):
  CLIENT_ID, CLIENT_SECRET, USER_AGENT, USERNAME, PASSWORD   Reddit script app
  API_KEY                        dimedata odds API key
  BOXING_ODDS_SOURCE_SUBREDDIT   Subreddit scanned for threads (default Boxing)
  BOXING_ODDS_TARGET_SUBREDDIT   Subreddit posted to (default BoxingOdds)
  BOXING_ODDS_THREAD_MARKER      Title marker (default [FIGHT THREAD])
  BOXING_ODDS_THREAD_LIMIT       Newest posts scanned (default 100)
  BOXING_ODDS_POST               1/true to submit reports
  BOXING_ODDS_MAX_DISTANCE       Fuzzy match threshold, exclusive (default 5)
  BOXING_ODDS_SEPARATOR          Fight name separator (default \" vs \")
  BOXING_ODDS_LINE_TOKEN         Token marking matchup lines (default vs)
  RUST_LOG                       Log filter override"
}

async fn handle_thread(
    thread: &Submission,
    settings: &Settings,
    pipeline: &Pipeline,
    odds: &OddsApi,
    reddit: &RedditApi,
) {
    match thread.created {
        Some(created) => info!("{} by {} at {created} ({})", thread.title, thread.author, thread.permalink),
        None => info!("{} by {} ({})", thread.title, thread.author, thread.permalink),
    }

    if settings.post_enabled {
        match reddit
            .has_posted_for(&settings.target_subreddit, thread, POSTED_LOOKBACK)
            .await
        {
            Ok(true) => {
                info!(
                    "{} already posted odds for {} to r/{}, skipping",
                    reddit.username(),
                    thread.id,
                    settings.target_subreddit
                );
                return;
            }
            Ok(false) => {}
            Err(e) => {
                error!("could not read posts of {}, skipping {}: {e}", reddit.username(), thread.id);
                return;
            }
        }
    }

    let feeds = fetch_feeds(odds).await;
    let body = match pipeline.run(&feeds, &thread.selftext) {
        Outcome::Report { selected, body } => {
            info!("{} fights to report for {}", selected.len(), thread.id);
            body
        }
        Outcome::NoThreadFights { candidates } => {
            debug!("{} known fights, none named in {}", candidates.len(), thread.id);
            return;
        }
        Outcome::NoFeedFights => return,
    };

    if !settings.post_enabled {
        println!("{body}");
        return;
    }

    let body = report::with_thread_link(&body, &thread.short_link());
    match reddit
        .submit_self_post(&settings.target_subreddit, POST_TITLE, &body)
        .await
    {
        Ok(Some(url)) => info!("posted {url}"),
        Ok(None) => info!("posted to r/{}", settings.target_subreddit),
        Err(e) => error!("posting to r/{} failed: {e}", settings.target_subreddit),
    }
}

/// Fetch every configured source; a source that fails is logged and left out.
async fn fetch_feeds(odds: &OddsApi) -> Vec<OddsFeed> {
    let mut feeds = Vec::new();
    for source in OddsSource::defaults() {
        match odds.fetch_feed(&source).await {
            Ok(feed) => feeds.push(feed),
            Err(e) => error!("{source}: {e}"),
        }
    }
    feeds
}
