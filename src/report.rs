use boxing_odds_api::FightRecord;

/// Markdown hard line break: two trailing spaces before the newline.
const BREAK: &str = "  \n";

pub const HEADER: &str = "**Moneyline Odds:**  \n  \n";

pub const FOOTER: &str = "  \n  \n*****  \n^^^For ^^^indication ^^^purposes ^^^only. ^^^This ^^^comment ^^^was ^^^auto-generated. ^^^To ^^^give ^^^feedback, ^^^please ^^^leave ^^^a ^^^reply.";

/// Render the odds of every selected fight, in record order.
///
/// Returns `None` when no record is selected.
pub fn render_report(selected: &[String], records: &[FightRecord]) -> Option<String> {
    let mut blocks = String::new();
    for record in records.iter().filter(|r| selected.contains(&r.description)) {
        blocks.push_str(&format!("{}: **{}**{BREAK}", record.participant_a, record.price_a));
        blocks.push_str(&format!("{}: **{}**{BREAK}", record.participant_b, record.price_b));
        blocks.push_str(BREAK);
    }

    if blocks.is_empty() {
        return None;
    }
    Some(format!("{HEADER}{blocks}{FOOTER}"))
}

/// Append the source thread's link to a rendered report before posting it.
pub fn with_thread_link(report: &str, link: &str) -> String {
    format!("{report}{BREAK}{BREAK}[Fight thread]({link})")
}
