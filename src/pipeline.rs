//! One pass from raw feeds and a thread body to a report.

use crate::matching::{Correlator, unique_fights};
use crate::report::render_report;
use boxing_odds_api::normalize::normalize_feed;
use boxing_odds_api::{FightRecord, MatchRules, OddsFeed, SourceFamily};
use log::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The feeds yielded no fights at all.
    NoFeedFights,
    /// None of the known fights are mentioned in the thread.
    NoThreadFights { candidates: Vec<String> },
    Report { selected: Vec<String>, body: String },
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    rules: MatchRules,
    correlator: Correlator,
}

impl Pipeline {
    pub fn new(rules: MatchRules) -> Result<Self, regex::Error> {
        let correlator = Correlator::new(&rules)?;
        Ok(Self { rules, correlator })
    }

    /// Normalize every feed into one deduplicated record list. Double-event
    /// feeds go first, then single-event feeds, each in the order given.
    pub fn accumulate(&self, feeds: &[OddsFeed]) -> Vec<FightRecord> {
        let ordered = feeds
            .iter()
            .filter(|f| f.family == SourceFamily::DoubleEvent)
            .chain(feeds.iter().filter(|f| f.family == SourceFamily::SingleEvent));

        let mut records: Vec<FightRecord> = Vec::new();
        for feed in ordered {
            let normalized = normalize_feed(&records, feed, &self.rules);
            if let Some(e) = &normalized.aborted {
                warn!("{}: {e}; keeping {} records read before it", feed.source, normalized.accepted.len());
            }
            info!("{}: {} new fights", feed.source, normalized.accepted.len());
            records.extend(normalized.accepted);
        }
        records
    }

    pub fn run(&self, feeds: &[OddsFeed], thread_text: &str) -> Outcome {
        let records = self.accumulate(feeds);
        let candidates = unique_fights(&records, &self.rules.separator);
        if candidates.is_empty() {
            info!("no fights in the odds feeds");
            return Outcome::NoFeedFights;
        }
        info!("fights with odds: {candidates:?}");

        let selected = self.correlator.select(thread_text, &candidates);
        if selected.is_empty() {
            info!("no fights with odds mentioned in the thread");
            return Outcome::NoThreadFights { candidates };
        }
        info!("fights to report: {selected:?}");

        match render_report(&selected, &records) {
            Some(body) => Outcome::Report { selected, body },
            None => Outcome::NoThreadFights { candidates },
        }
    }
}
