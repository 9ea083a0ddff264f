use crate::dimedata::OddsResponse;
use crate::reddit::{Listing, SubmitResponse, Thing, TokenResponse};
use crate::{OddsFeed, OddsSource, RedditCredentials, Submission};
use chrono::DateTime;
use log::debug;
use reqwest::{Client, RequestBuilder};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const DIMEDATA: &str = "http://api.dimedata.net";
const REDDIT_AUTH: &str = "https://www.reddit.com";
const REDDIT_OAUTH: &str = "https://oauth.reddit.com";

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Auth(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Auth(msg) => write!(f, "Authentication failed: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Send a request and decode its JSON body. A 4xx status decodes to
/// `T::default()`; 5xx and transport failures are errors.
async fn send_json<T: Default + serde::de::DeserializeOwned>(
    request: RequestBuilder,
    url: &str,
) -> ApiResult<T> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e, url.to_owned()))?;

    match response.error_for_status() {
        Ok(res) => res
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned())),
        Err(e) => {
            if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                Ok(T::default())
            } else {
                Err(ApiError::Api(e, url.to_owned()))
            }
        }
    }
}

/// Send a request and decode its JSON body; every non-success status is an
/// `ApiError::Api` carrying the status.
async fn send_json_strict<T: serde::de::DeserializeOwned>(
    request: RequestBuilder,
    url: &str,
) -> ApiResult<T> {
    request
        .send()
        .await
        .map_err(|e| ApiError::Network(e, url.to_owned()))?
        .error_for_status()
        .map_err(|e| ApiError::Api(e, url.to_owned()))?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parsing(e, url.to_owned()))
}

// ---------------------------------------------------------------------------
// Odds feeds
// ---------------------------------------------------------------------------

/// Odds client backed by the dimedata JSON API.
#[derive(Debug, Clone)]
pub struct OddsApi {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl OddsApi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DIMEDATA, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("boxing-odds/0.1 (moneyline bot)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Fetch one source's entries in feed order.
    pub async fn fetch_feed(&self, source: &OddsSource) -> ApiResult<OddsFeed> {
        let url = format!("{}{}", self.base_url, source.path);
        let request = self
            .client
            .get(&url)
            .query(&[("api-key", self.api_key.as_str())])
            .timeout(self.timeout);
        let raw: OddsResponse = send_json(request, &url).await?;
        let entries = raw.games.unwrap_or_default().into_entries();
        debug!("{source}: {} raw entries", entries.len());

        Ok(OddsFeed {
            source: source.name.clone(),
            family: source.family,
            entries,
        })
    }
}

// ---------------------------------------------------------------------------
// Reddit
// ---------------------------------------------------------------------------

/// Minimal Reddit client for a script app: password-grant token, subreddit
/// listings, the account's own posts and self posts.
#[derive(Debug, Clone)]
pub struct RedditApi {
    client: Client,
    auth_url: String,
    api_url: String,
    credentials: RedditCredentials,
    token: Option<String>,
    timeout: Duration,
}

impl RedditApi {
    pub fn new(credentials: RedditCredentials) -> Self {
        Self::with_endpoints(REDDIT_AUTH, REDDIT_OAUTH, credentials)
    }

    pub fn with_endpoints(
        auth_url: impl Into<String>,
        api_url: impl Into<String>,
        credentials: RedditCredentials,
    ) -> Self {
        Self {
            client: Client::builder()
                .user_agent(credentials.user_agent.clone())
                .build()
                .unwrap_or_default(),
            auth_url: auth_url.into(),
            api_url: api_url.into(),
            credentials,
            token: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    pub async fn authenticate(&mut self) -> ApiResult<()> {
        let url = format!("{}/api/v1/access_token", self.auth_url);
        let request = self
            .client
            .post(&url)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
            ])
            .timeout(self.timeout);
        let raw: TokenResponse = send_json_strict(request, &url).await?;

        match (raw.access_token, raw.error) {
            (Some(token), _) => {
                debug!("reddit token acquired for {}", self.credentials.username);
                self.token = Some(token);
                Ok(())
            }
            (None, Some(error)) => Err(ApiError::Auth(error)),
            (None, None) => Err(ApiError::Auth(format!("no access token returned by {url}"))),
        }
    }

    /// Newest `limit` posts of a subreddit, newest first.
    pub async fn fetch_new(&self, subreddit: &str, limit: u32) -> ApiResult<Vec<Submission>> {
        let url = format!("{}/r/{subreddit}/new", self.api_url);
        let request = self.authorized(self.client.get(&url))?.query(&[("limit", limit)]);
        let raw: Listing = send_json(request, &url).await?;
        Ok(raw
            .data
            .children
            .iter()
            .filter(|thing| thing.kind == "t3")
            .map(map_submission)
            .collect())
    }

    /// The account's newest `limit` posts, newest first.
    pub async fn fetch_submitted(&self, limit: u32) -> ApiResult<Vec<Submission>> {
        let url = format!("{}/user/{}/submitted", self.api_url, self.credentials.username);
        let request = self.authorized(self.client.get(&url))?.query(&[("limit", limit)]);
        let raw: Listing = send_json(request, &url).await?;
        Ok(raw
            .data
            .children
            .iter()
            .filter(|thing| thing.kind == "t3")
            .map(map_submission)
            .collect())
    }

    /// Whether one of the account's newest `limit` posts in `subreddit`
    /// already links to `thread`.
    pub async fn has_posted_for(
        &self,
        subreddit: &str,
        thread: &Submission,
        limit: u32,
    ) -> ApiResult<bool> {
        let posts = self.fetch_submitted(limit).await?;
        Ok(posts
            .iter()
            .any(|post| post.subreddit.eq_ignore_ascii_case(subreddit) && post.links_to(thread)))
    }

    /// Submit a self post; returns the new post's URL when Reddit reports one.
    pub async fn submit_self_post(
        &self,
        subreddit: &str,
        title: &str,
        body: &str,
    ) -> ApiResult<Option<String>> {
        let url = format!("{}/api/submit", self.api_url);
        let request = self.authorized(self.client.post(&url))?.form(&[
            ("api_type", "json"),
            ("kind", "self"),
            ("sr", subreddit),
            ("title", title),
            ("text", body),
        ]);
        let raw: SubmitResponse = send_json(request, &url).await?;

        if !raw.json.errors.is_empty() {
            let errors: Vec<String> = raw.json.errors.iter().map(|e| e.to_string()).collect();
            return Err(ApiError::Other(format!(
                "submit to r/{subreddit} rejected: {}",
                errors.join(", ")
            )));
        }
        Ok(raw.json.data.and_then(|d| d.url))
    }

    fn authorized(&self, request: RequestBuilder) -> ApiResult<RequestBuilder> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ApiError::Auth("not authenticated".into()))?;
        Ok(request.bearer_auth(token).timeout(self.timeout))
    }
}

// ---------------------------------------------------------------------------
// Mapping: Reddit wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_submission(thing: &Thing) -> Submission {
    let data = &thing.data;
    Submission {
        id: data.id.clone().unwrap_or_default(),
        title: data.title.clone().unwrap_or_default(),
        author: data.author.clone().unwrap_or_default(),
        selftext: data.selftext.clone().unwrap_or_default(),
        permalink: data.permalink.clone().unwrap_or_default(),
        subreddit: data.subreddit.clone().unwrap_or_default(),
        created: data
            .created_utc
            .and_then(|secs| DateTime::from_timestamp(secs as i64, 0)),
    }
}
