// ---------------------------------------------------------------------------
// Mapping: raw feed entries → deduplicated FightRecords
// ---------------------------------------------------------------------------

use crate::dimedata::{DoubleEventEntry, SingleEventEntry};
use crate::vs::{distance_either_order, same_fight};
use crate::{FightRecord, MatchRules, OddsFeed, SourceFamily};
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// A raw entry that does not have the shape its source family promises.
/// Processing of that source stops at `position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError {
    pub family: SourceFamily,
    pub position: usize,
    pub reason: String,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entry at position {} is malformed: {}",
            self.family, self.position, self.reason
        )
    }
}

impl std::error::Error for ShapeError {}

/// Records a single source contributes on top of what was already accumulated.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub accepted: Vec<FightRecord>,
    /// Set when the source was cut short; `accepted` still holds everything
    /// read before the bad entry.
    pub aborted: Option<ShapeError>,
}

/// Normalize one feed against the records accumulated from earlier feeds.
pub fn normalize_feed(accumulated: &[FightRecord], feed: &OddsFeed, rules: &MatchRules) -> Normalized {
    match feed.family {
        SourceFamily::DoubleEvent => normalize_double_events(accumulated, &feed.entries, rules),
        SourceFamily::SingleEvent => normalize_single_events(accumulated, &feed.entries, rules),
    }
}

/// Pair consecutive single-sided entries into fights. A trailing unpaired
/// entry is ignored. A pair is rejected when its description, or its
/// reversal, exactly equals one already held.
pub fn normalize_double_events(
    accumulated: &[FightRecord],
    entries: &[Value],
    rules: &MatchRules,
) -> Normalized {
    let mut accepted: Vec<FightRecord> = Vec::new();

    for (pair, sides) in entries.chunks_exact(2).enumerate() {
        let position = pair * 2;
        let parsed = parse_entry::<DoubleEventEntry>(&sides[0], SourceFamily::DoubleEvent, position)
            .and_then(|first| {
                parse_entry::<DoubleEventEntry>(&sides[1], SourceFamily::DoubleEvent, position + 1)
                    .map(|second| (first, second))
            });
        let (first, second) = match parsed {
            Ok(sides) => sides,
            Err(e) => return Normalized { accepted, aborted: Some(e) },
        };
        debug!("{}", first.description);

        let record = FightRecord::new(
            first.bet_name,
            first.bet_price,
            second.bet_name,
            second.bet_price,
            &rules.separator,
        );
        let duplicate = accumulated
            .iter()
            .chain(&accepted)
            .any(|held| same_fight(&held.description, &record.description, &rules.separator));
        if !duplicate {
            accepted.push(record);
        }
    }

    Normalized { accepted, aborted: None }
}

/// Read composite entries one at a time. An entry is rejected when an
/// already-held description is within `max_distance` (exclusive) of it in
/// either order.
pub fn normalize_single_events(
    accumulated: &[FightRecord],
    entries: &[Value],
    rules: &MatchRules,
) -> Normalized {
    let mut accepted: Vec<FightRecord> = Vec::new();

    for (position, raw) in entries.iter().enumerate() {
        let entry = match parse_entry::<SingleEventEntry>(raw, SourceFamily::SingleEvent, position) {
            Ok(entry) => entry,
            Err(e) => return Normalized { accepted, aborted: Some(e) },
        };
        debug!("{}", entry.description);

        let record = FightRecord::new(
            entry.away_team,
            entry.game_moneyline_away_price,
            entry.home_team,
            entry.game_moneyline_home_price,
            &rules.separator,
        );
        let duplicate = accumulated.iter().chain(&accepted).any(|held| {
            distance_either_order(&record.description, &held.description, &rules.separator)
                < rules.max_distance
        });
        if !duplicate {
            accepted.push(record);
        }
    }

    Normalized { accepted, aborted: None }
}

fn parse_entry<T: DeserializeOwned>(
    raw: &Value,
    family: SourceFamily,
    position: usize,
) -> Result<T, ShapeError> {
    T::deserialize(raw).map_err(|e| ShapeError { family, position, reason: e.to_string() })
}
