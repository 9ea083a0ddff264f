pub mod client;
pub mod dimedata;
pub mod normalize;
pub mod reddit;
pub mod vs;

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;

pub const DEFAULT_SEPARATOR: &str = " vs ";
pub const DEFAULT_LINE_TOKEN: &str = "vs";
pub const DEFAULT_MAX_DISTANCE: usize = 5;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the provider wire formats
// ---------------------------------------------------------------------------

/// One matchup with both sides priced.
///
/// `description` is always `"<participant_a><separator><participant_b>"`; it is
/// the identity used for deduplication, correlation and report selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FightRecord {
    pub description: String,
    pub participant_a: String,
    pub price_a: String,
    pub participant_b: String,
    pub price_b: String,
}

impl FightRecord {
    pub fn new(
        participant_a: impl Into<String>,
        price_a: impl Into<String>,
        participant_b: impl Into<String>,
        price_b: impl Into<String>,
        separator: &str,
    ) -> Self {
        let participant_a = participant_a.into();
        let participant_b = participant_b.into();
        Self {
            description: format!("{participant_a}{separator}{participant_b}"),
            participant_a,
            price_a: price_a.into(),
            participant_b,
            price_b: price_b.into(),
        }
    }
}

/// Constants of fight identity. `max_distance` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRules {
    pub separator: String,
    pub line_token: String,
    pub max_distance: usize,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_owned(),
            line_token: DEFAULT_LINE_TOKEN.to_owned(),
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

/// How an upstream feed lays out a matchup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceFamily {
    /// Each side is its own record; consecutive records form one fight.
    #[default]
    DoubleEvent,
    /// One composite record carries both sides.
    SingleEvent,
}

impl fmt::Display for SourceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFamily::DoubleEvent => write!(f, "double-event"),
            SourceFamily::SingleEvent => write!(f, "single-event"),
        }
    }
}

/// A configured upstream odds feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OddsSource {
    pub name: String,
    pub family: SourceFamily,
    /// Path below the provider base URL.
    pub path: String,
}

impl OddsSource {
    pub fn new(name: &str, family: SourceFamily, path: &str) -> Self {
        Self { name: name.to_owned(), family, path: path.to_owned() }
    }

    /// William Hill and DraftKings (paired records), then Bovada (composite).
    pub fn defaults() -> Vec<OddsSource> {
        vec![
            OddsSource::new(
                "William Hill",
                SourceFamily::DoubleEvent,
                "/api/json/odds/v3/60/william-hill-props/boxing/boxing/moneyline",
            ),
            OddsSource::new(
                "DraftKings",
                SourceFamily::DoubleEvent,
                "/api/json/odds/v3/60/draftkings-props/boxing/boxing/moneyline",
            ),
            OddsSource::new(
                "Bovada",
                SourceFamily::SingleEvent,
                "/api/json/odds/bovada/v2/60/boxing/boxing/all",
            ),
        ]
    }
}

impl fmt::Display for OddsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.family)
    }
}

/// Raw entries fetched from one source, in feed order. Entries are only read
/// as typed records by the normalizer.
#[derive(Debug, Clone, Default)]
pub struct OddsFeed {
    pub source: String,
    pub family: SourceFamily,
    pub entries: Vec<Value>,
}

/// A subreddit post as far as the bot cares about it.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub id: String,
    pub title: String,
    pub author: String,
    pub selftext: String,
    pub permalink: String,
    pub subreddit: String,
    pub created: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn is_fight_thread(&self, marker: &str) -> bool {
        self.title.contains(marker)
    }

    /// `https://redd.it/<id>`, the link a report carries back to its thread.
    pub fn short_link(&self) -> String {
        format!("https://redd.it/{}", self.id)
    }

    /// Whether this post's body carries `thread`'s short link.
    pub fn links_to(&self, thread: &Submission) -> bool {
        if thread.id.is_empty() {
            return false;
        }
        let link = thread.short_link();
        self.selftext.match_indices(&link).any(|(at, _)| {
            !self.selftext[at + link.len()..]
                .starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_')
        })
    }
}

/// Reddit script-app credentials.
#[derive(Debug, Clone, Default)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
    pub username: String,
    pub password: String,
}
