/// Wire types for the dimedata odds API.
/// Endpoint: http://api.dimedata.net/api/json/odds/... ?api-key={key}
use log::warn;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize, Default)]
pub struct OddsResponse {
    pub games: Option<Games>,
}

/// The `games` payload. Most endpoints key entries by ordinal strings
/// (`"0"`, `"1"`, ...); some send a plain array.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum Games {
    Listed(Vec<Value>),
    Indexed(Map<String, Value>),
}

impl Default for Games {
    fn default() -> Self {
        Games::Listed(Vec::new())
    }
}

impl Games {
    /// Entries in ordinal order. Ordinal keys are walked from `"0"` upward and
    /// the walk stops at the first missing position; anything keyed past a gap
    /// is dropped.
    pub fn into_entries(self) -> Vec<Value> {
        match self {
            Games::Listed(entries) => entries,
            Games::Indexed(mut map) => {
                let total = map.len();
                let mut entries = Vec::with_capacity(total);
                while let Some(entry) = map.remove(&entries.len().to_string()) {
                    entries.push(entry);
                }
                if !map.is_empty() {
                    warn!(
                        "games object has no position {}; dropped {} of {total} entries",
                        entries.len(),
                        map.len()
                    );
                }
                entries
            }
        }
    }
}

/// One side of a matchup from a paired feed (William Hill, DraftKings).
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DoubleEventEntry {
    pub description: String,
    pub bet_name: String,
    pub bet_price: String,
}

/// A whole matchup from a composite feed (Bovada).
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SingleEventEntry {
    pub description: String,
    pub away_team: String,
    pub home_team: String,
    pub game_moneyline_away_price: String,
    pub game_moneyline_home_price: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn indexed_games_are_ordered_by_position_not_key_order() {
        let raw: OddsResponse = serde_json::from_value(json!({
            "games": { "10": {"n": 10}, "2": {"n": 2}, "0": {"n": 0}, "1": {"n": 1} }
        }))
        .unwrap();
        let entries = raw.games.unwrap_or_default().into_entries();
        let ns: Vec<i64> = entries.iter().map(|e| e["n"].as_i64().unwrap()).collect();
        // "10" sits past the gap at 3 and is dropped.
        assert_eq!(ns, vec![0, 1, 2]);
    }

    #[test]
    fn listed_games_keep_array_order() {
        let raw: OddsResponse =
            serde_json::from_value(json!({ "games": [{"n": 1}, {"n": 0}] })).unwrap();
        let entries = raw.games.unwrap_or_default().into_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["n"], 1);
    }

    #[test]
    fn missing_games_is_empty() {
        let raw: OddsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(raw.games.unwrap_or_default().into_entries().is_empty());
    }

    #[test]
    fn single_event_entry_reads_camel_case_fields() {
        let entry: SingleEventEntry = serde_json::from_value(json!({
            "description": "A vs B",
            "awayTeam": "A",
            "homeTeam": "B",
            "gameMoneylineAwayPrice": "+100",
            "gameMoneylineHomePrice": "-150",
            "gameDate": "ignored"
        }))
        .unwrap();
        assert_eq!(entry.away_team, "A");
        assert_eq!(entry.game_moneyline_home_price, "-150");
    }
}
