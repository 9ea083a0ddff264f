use anyhow::{Context, bail};
use boxing_odds_api::{
    DEFAULT_LINE_TOKEN, DEFAULT_MAX_DISTANCE, DEFAULT_SEPARATOR, MatchRules, RedditCredentials,
};
use log::{LevelFilter, debug, warn};
use std::path::PathBuf;

pub const POST_TITLE: &str = "Boxing Moneyline Odds";

/// Flags parsed from the command line; each one overrides its env counterpart.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliFlags {
    pub post: bool,
    pub verbose: bool,
}

impl CliFlags {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose { LevelFilter::Debug } else { LevelFilter::Info }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: RedditCredentials,
    pub api_key: String,
    pub source_subreddit: String,
    pub target_subreddit: String,
    pub thread_marker: String,
    pub thread_limit: u32,
    /// Submit reports to `target_subreddit`; otherwise they are only printed.
    pub post_enabled: bool,
    pub rules: MatchRules,
}

impl Settings {
    /// Read `.env` (if present) and the process environment.
    pub fn load(flags: CliFlags) -> anyhow::Result<Self> {
        if let Some(problem) = dotenv_problem(dotenvy::dotenv()) {
            warn!("{problem}");
        }
        Self::from_lookup(flags, |key| std::env::var(key).ok())
    }

    pub fn from_lookup(
        flags: CliFlags,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let required = |key: &str| -> anyhow::Result<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("missing required environment variable {key}"))
        };
        let optional = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let credentials = RedditCredentials {
            client_id: required("CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET")?,
            user_agent: required("USER_AGENT")?,
            username: required("USERNAME")?,
            password: required("PASSWORD")?,
        };

        let thread_limit = optional("BOXING_ODDS_THREAD_LIMIT", "100")
            .parse::<u32>()
            .context("BOXING_ODDS_THREAD_LIMIT must be a positive integer")?;
        let max_distance = optional("BOXING_ODDS_MAX_DISTANCE", &DEFAULT_MAX_DISTANCE.to_string())
            .parse::<usize>()
            .context("BOXING_ODDS_MAX_DISTANCE must be a non-negative integer")?;
        let separator = optional("BOXING_ODDS_SEPARATOR", DEFAULT_SEPARATOR);
        let line_token = optional("BOXING_ODDS_LINE_TOKEN", DEFAULT_LINE_TOKEN);
        if !separator.contains(line_token.as_str()) {
            bail!("BOXING_ODDS_LINE_TOKEN {line_token:?} must occur in the separator {separator:?}");
        }

        let post_enabled = flags.post || parse_flag(lookup("BOXING_ODDS_POST").as_deref());

        Ok(Self {
            credentials,
            api_key: required("API_KEY")?,
            source_subreddit: optional("BOXING_ODDS_SOURCE_SUBREDDIT", "Boxing"),
            target_subreddit: optional("BOXING_ODDS_TARGET_SUBREDDIT", "BoxingOdds"),
            thread_marker: optional("BOXING_ODDS_THREAD_MARKER", "[FIGHT THREAD]"),
            thread_limit,
            post_enabled,
            rules: MatchRules { separator, line_token, max_distance },
        })
    }
}

/// A `.env` that exists but cannot be read or parsed is worth a warning; a
/// missing one is not.
fn dotenv_problem(loaded: Result<PathBuf, dotenvy::Error>) -> Option<String> {
    match loaded {
        Ok(path) => {
            debug!("loaded {}", path.display());
            None
        }
        Err(e) if e.not_found() => None,
        Err(e) => Some(format!(".env ignored: {e}")),
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(extra: &[(&str, &str)]) -> HashMap<String, String> {
        let mut vars: HashMap<String, String> = [
            ("CLIENT_ID", "id"),
            ("CLIENT_SECRET", "secret"),
            ("USER_AGENT", "boxing-odds"),
            ("USERNAME", "boxingoddsbot"),
            ("PASSWORD", "pw"),
            ("API_KEY", "key"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        for (k, v) in extra {
            vars.insert(k.to_string(), v.to_string());
        }
        vars
    }

    fn load(flags: CliFlags, vars: &HashMap<String, String>) -> anyhow::Result<Settings> {
        Settings::from_lookup(flags, |k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_match_the_boxing_subreddits() {
        let s = load(CliFlags::default(), &env(&[])).unwrap();
        assert_eq!(s.source_subreddit, "Boxing");
        assert_eq!(s.target_subreddit, "BoxingOdds");
        assert_eq!(s.thread_marker, "[FIGHT THREAD]");
        assert_eq!(s.thread_limit, 100);
        assert!(!s.post_enabled, "posting is off unless asked for");
        assert_eq!(s.rules, MatchRules::default());
        assert_eq!(CliFlags::default().log_level(), LevelFilter::Info);
    }

    #[test]
    fn missing_credential_is_an_error() {
        let mut vars = env(&[]);
        vars.remove("PASSWORD");
        let err = load(CliFlags::default(), &vars).unwrap_err();
        assert!(err.to_string().contains("PASSWORD"));
    }

    #[test]
    fn posting_can_be_enabled_from_env_or_flag() {
        assert!(load(CliFlags::default(), &env(&[("BOXING_ODDS_POST", "true")])).unwrap().post_enabled);
        assert!(!load(CliFlags::default(), &env(&[("BOXING_ODDS_POST", "0")])).unwrap().post_enabled);
        let flags = CliFlags { post: true, verbose: true };
        let s = load(flags, &env(&[])).unwrap();
        assert!(s.post_enabled);
        assert_eq!(flags.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn match_rules_are_configurable() {
        let s = load(
            CliFlags::default(),
            &env(&[("BOXING_ODDS_MAX_DISTANCE", "3"), ("BOXING_ODDS_SEPARATOR", " v. "), ("BOXING_ODDS_LINE_TOKEN", "v.")]),
        )
        .unwrap();
        assert_eq!(s.rules.max_distance, 3);
        assert_eq!(s.rules.separator, " v. ");
        assert_eq!(s.rules.line_token, "v.");
    }

    #[test]
    fn line_token_must_occur_in_separator() {
        let err = load(CliFlags::default(), &env(&[("BOXING_ODDS_LINE_TOKEN", "versus")])).unwrap_err();
        assert!(err.to_string().contains("versus"));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(load(CliFlags::default(), &env(&[("BOXING_ODDS_THREAD_LIMIT", "lots")])).is_err());
        assert!(load(CliFlags::default(), &env(&[("BOXING_ODDS_MAX_DISTANCE", "-1")])).is_err());
    }

    #[test]
    fn missing_dotenv_is_quiet_but_broken_dotenv_is_reported() {
        let missing = dotenvy::Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "no .env"));
        assert_eq!(dotenv_problem(Err(missing)), None);
        assert_eq!(dotenv_problem(Ok(PathBuf::from(".env"))), None);

        let broken = dotenvy::Error::LineParse("API_KEY='unterminated".into(), 8);
        let problem = dotenv_problem(Err(broken)).expect("parse errors are reported");
        assert!(problem.contains("API_KEY='unterminated"));
    }
}
