use boxing_odds_api::FightRecord;
use boxing_odds_api::vs::same_fight;

/// Distinct fight descriptions in first-seen order.
pub fn unique_fights(records: &[FightRecord], separator: &str) -> Vec<String> {
    unique_labels(records.iter().map(|r| r.description.as_str()), separator)
}

/// Keep the first of every group of labels that are equal as-is or after
/// reversal. No fuzziness here; near-duplicates were settled at normalization.
pub fn unique_labels<'a>(labels: impl IntoIterator<Item = &'a str>, separator: &str) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for label in labels {
        if !unique.iter().any(|seen| same_fight(seen, label, separator)) {
            unique.push(label.to_owned());
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEP: &str = " vs ";

    #[test]
    fn reversed_labels_collapse_to_first_seen() {
        let labels = unique_labels(["A vs B", "C vs D", "B vs A", "A vs B", "E vs F"], SEP);
        assert_eq!(labels, vec!["A vs B", "C vs D", "E vs F"]);
    }

    #[test]
    fn near_duplicates_are_kept() {
        let labels = unique_labels(["Usyk vs Fury", "Usyk vs Furry"], SEP);
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn extraction_is_idempotent() {
        let once = unique_labels(["A vs B", "B vs A", "C vs D", "D vs C", "C vs E"], SEP);
        let twice = unique_labels(once.iter().map(String::as_str), SEP);
        assert_eq!(once, twice);
    }

    #[test]
    fn unique_fights_reads_record_descriptions() {
        let records = vec![
            FightRecord::new("A", "+100", "B", "-150", SEP),
            FightRecord::new("C", "+300", "D", "-400", SEP),
        ];
        assert_eq!(unique_fights(&records, SEP), vec!["A vs B", "C vs D"]);
    }

    #[test]
    fn no_records_no_fights() {
        assert!(unique_fights(&[], SEP).is_empty());
    }
}
