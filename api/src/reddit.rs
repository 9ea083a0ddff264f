/// Reddit API raw wire types — serde shapes for the handful of endpoints the
/// bot touches. Mapped to `Submission` in client.rs.
use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// OAuth  (www.reddit.com/api/v1/access_token)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Listings  (/r/{sub}/new, /user/{name}/submitted)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Listing {
    #[serde(default)]
    pub data: ListingData,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Thing {
    pub kind: String, // "t3" link, "more"
    #[serde(default)]
    pub data: ThingData,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ThingData {
    pub id: Option<String>,
    pub title: Option<String>,
    pub selftext: Option<String>,
    pub author: Option<String>,
    pub permalink: Option<String>,
    pub subreddit: Option<String>,
    pub created_utc: Option<f64>,
}

// ---------------------------------------------------------------------------
// Submit  (/api/submit, api_type=json)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default)]
pub struct SubmitResponse {
    #[serde(default)]
    pub json: SubmitJson,
}

#[derive(Debug, Deserialize, Default)]
pub struct SubmitJson {
    /// Each error is `[code, message, field]`.
    #[serde(default)]
    pub errors: Vec<Value>,
    pub data: Option<SubmitData>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SubmitData {
    pub id: Option<String>,
    pub url: Option<String>,
}
