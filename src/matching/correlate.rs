use boxing_odds_api::MatchRules;
use boxing_odds_api::vs::{distance_either_order, reverse};
use log::debug;
use regex::Regex;

/// Decides which known fights a free-text thread body is about.
#[derive(Debug, Clone)]
pub struct Correlator {
    line_pattern: Regex,
    separator: String,
    max_distance: usize,
}

impl Correlator {
    pub fn new(rules: &MatchRules) -> Result<Self, regex::Error> {
        // `.` stops at '\n', so a matchup wrapped over two lines is never seen.
        let line_pattern = Regex::new(&format!(".+{}.+", regex::escape(&rules.line_token)))?;
        Ok(Self {
            line_pattern,
            separator: rules.separator.clone(),
            max_distance: rules.max_distance,
        })
    }

    /// Lines of `text` containing the line token with at least one character
    /// on each side of it.
    pub fn matchup_lines<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.line_pattern.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// Candidates mentioned in `text`, in candidate order.
    ///
    /// Each candidate takes the first line within `max_distance` (exclusive)
    /// in either order; later lines are not compared. A candidate already
    /// selected in either order is skipped.
    pub fn select(&self, text: &str, candidates: &[String]) -> Vec<String> {
        let lines = self.matchup_lines(text);
        let mut selected: Vec<String> = Vec::new();

        for label in candidates {
            let reversed = reverse(label, &self.separator);
            if selected.iter().any(|s| s == label || *s == reversed) {
                continue;
            }
            let hit = lines.iter().find(|line| {
                distance_either_order(label, line, &self.separator) < self.max_distance
            });
            if let Some(line) = hit {
                debug!("{label} matched thread line {line:?}");
                selected.push(label.clone());
            }
        }

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn correlator() -> Correlator {
        Correlator::new(&MatchRules::default()).unwrap()
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn lines_need_text_around_the_token() {
        let text = "Main card\nUsyk vs Fury\nvs\nvsX\nXvs\nrevs up\r\n\nA vs B - main event";
        assert_eq!(
            correlator().matchup_lines(text),
            vec!["Usyk vs Fury", "revs up\r", "A vs B - main event"]
        );
    }

    #[test]
    fn lines_never_span_a_line_break() {
        let text = "Canelo Alvarez\nvs Gennady Golovkin";
        assert!(correlator().matchup_lines(text).is_empty());
        assert!(correlator().select(text, &labels(&["Canelo Alvarez vs Gennady Golovkin"])).is_empty());
    }

    #[test]
    fn close_line_selects_candidate() {
        let text = "Tonight:\nA vs. B\n";
        let picked = correlator().select(text, &labels(&["A vs B", "C vs D"]));
        assert_eq!(picked, vec!["A vs B"]);
    }

    #[test]
    fn line_with_long_trailer_is_too_far() {
        // The whole line is compared, so decoration counts toward the distance.
        let picked = correlator().select("A vs B - main event", &labels(&["A vs B"]));
        assert!(picked.is_empty());
    }

    #[test]
    fn reversed_line_selects_candidate() {
        let text = "Gennady Golovkin vs Canelo Alvarez";
        let picked = correlator().select(text, &labels(&["Canelo Alvarez vs Gennady Golovkin"]));
        assert_eq!(picked.len(), 1);
    }

    #[test]
    fn distance_must_be_below_threshold() {
        assert_eq!(correlator().select("A vs B 123", &labels(&["A vs B"])).len(), 1);
        assert!(correlator().select("A vs B 1234", &labels(&["A vs B"])).is_empty());
    }

    #[test]
    fn selection_follows_candidate_order_not_text_order() {
        let text = "E vs F\nC vs D\nA vs B";
        let picked = correlator().select(text, &labels(&["A vs B", "C vs D", "E vs F"]));
        assert_eq!(picked, vec!["A vs B", "C vs D", "E vs F"]);
    }

    #[test]
    fn reversed_candidate_is_not_selected_twice() {
        let picked = correlator().select("A vs B", &labels(&["A vs B", "B vs A"]));
        assert_eq!(picked, vec!["A vs B"]);
    }

    #[test]
    fn empty_candidates_select_nothing() {
        assert!(correlator().select("A vs B", &[]).is_empty());
    }

    #[test]
    fn custom_line_token_is_escaped() {
        let rules = MatchRules { separator: " v. ".into(), line_token: "v.".into(), max_distance: 5 };
        let c = Correlator::new(&rules).unwrap();
        assert_eq!(c.matchup_lines("A v. B\nA vx B"), vec!["A v. B"]);
    }
}
