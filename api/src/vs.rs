//! Order-invariant fight identity helpers.
//!
//! A fight is named `"A<sep>B"`; the same fight can arrive as `"B<sep>A"` from
//! another source or in a thread body, so every identity check looks at both
//! orders.

use strsim::levenshtein;

/// Swap the sides of a description: `"A vs B"` becomes `"B vs A"`.
///
/// Splits at the first separator, so a participant name that itself contains
/// the separator is split in the wrong place. A description without the
/// separator has no sides to swap and is returned as-is.
pub fn reverse(description: &str, separator: &str) -> String {
    match description.split_once(separator) {
        Some((left, right)) => format!("{right}{separator}{left}"),
        None => description.to_owned(),
    }
}

/// Exact identity in either order.
pub fn same_fight(a: &str, b: &str, separator: &str) -> bool {
    a == b || a == reverse(b, separator)
}

/// Edit distance from `target` to the closer of `description` and its reversal.
pub fn distance_either_order(description: &str, target: &str, separator: &str) -> usize {
    let forward = levenshtein(description, target);
    if forward == 0 {
        return 0;
    }
    forward.min(levenshtein(&reverse(description, separator), target))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEP: &str = " vs ";

    #[test]
    fn reverse_swaps_sides() {
        assert_eq!(reverse("Canelo Alvarez vs Gennady Golovkin", SEP), "Gennady Golovkin vs Canelo Alvarez");
    }

    #[test]
    fn reverse_twice_is_identity() {
        for d in ["A vs B", "Tyson Fury vs Deontay Wilder", "x vs ", " vs y"] {
            assert_eq!(reverse(&reverse(d, SEP), SEP), d, "double reversal of {d:?}");
        }
    }

    #[test]
    fn reverse_splits_at_first_separator() {
        assert_eq!(reverse("A vs B vs C", SEP), "B vs C vs A");
    }

    #[test]
    fn reverse_without_separator_is_unchanged() {
        assert_eq!(reverse("Main Event", SEP), "Main Event");
    }

    #[test]
    fn same_fight_accepts_either_order() {
        assert!(same_fight("A vs B", "A vs B", SEP));
        assert!(same_fight("B vs A", "A vs B", SEP));
        assert!(!same_fight("A vs C", "A vs B", SEP));
    }

    #[test]
    fn distance_takes_the_closer_order() {
        assert_eq!(distance_either_order("Joshua vs Usyk", "Usyk vs Joshua", SEP), 0);
        assert_eq!(distance_either_order("Joshua vs Usyk", "Joshua vs Usik", SEP), 1);
    }
}
