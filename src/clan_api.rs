use std::fmt;
use std::time::Duration;

use anyhow::Context;
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use serde_json::Value;

const REQUEST_TIMEOUT_SECS: u64 = 15;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// The pipeline issues a single request per run, but the timeout still
/// guards against a hung clan endpoint.
fn http_client() -> anyhow::Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

/// Clan endpoint response. Every field the pipeline reads gets an explicit
/// default so partial responses decode instead of failing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClanResponse {
    pub members: u32,
    #[serde(rename = "clanScore")]
    pub clan_score: u64,
    #[serde(rename = "clanWarTrophies")]
    pub clan_war_trophies: u64,
    #[serde(rename = "donationsPerWeek")]
    pub donations_per_week: u64,
    #[serde(rename = "requiredTrophies")]
    pub required_trophies: u64,
    #[serde(rename = "memberList")]
    pub member_list: Vec<ApiMember>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiMember {
    pub tag: String,
    pub name: Option<String>,
    pub role: String,
    #[serde(rename = "expLevel")]
    pub exp_level: u32,
    pub trophies: u32,
    pub arena: Value,
    #[serde(rename = "clanRank")]
    pub clan_rank: u32,
    pub donations: u32,
    #[serde(rename = "donationsReceived")]
    pub donations_received: u32,
    #[serde(rename = "lastSeen")]
    pub last_seen: String,
}

impl ApiMember {
    /// Tag with the leading `#` stripped, as stored in the extras file.
    pub fn normalized_tag(&self) -> String {
        self.tag.trim_start_matches('#').to_string()
    }

    /// The arena field is sometimes null or a bare scalar; anything that is
    /// not an object with a `name` string collapses to "".
    pub fn arena_name(&self) -> String {
        self.arena
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string()
    }
}

/// Fatal API outcomes, rendered as the stderr diagnostic for each class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// HTTP 403 with reason `accessDenied.invalidIp`.
    InvalidIp { message: String },
    /// Any other HTTP error response.
    Http {
        status: u16,
        reason: String,
        message: String,
    },
    /// Request, body read, or decode failure.
    Transport(String),
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::InvalidIp { message } => write!(
                f,
                "ERROR: IP not whitelisted for this API key.\n\
                 API message: {message}\n\
                 \n\
                 Go to https://developer.clashroyale.com to update your\n\
                 API key's allowed IP list."
            ),
            ApiFailure::Http {
                status,
                reason,
                message,
            } => write!(f, "ERROR: HTTP {status} — {reason}\nMessage: {message}"),
            ApiFailure::Transport(message) => write!(f, "ERROR: {message}"),
        }
    }
}

/// One authenticated GET against the per-clan endpoint. No retries.
pub fn fetch_clan(api_key: &str, api_base: &str, clan_tag: &str) -> Result<ClanResponse, ApiFailure> {
    let client = http_client().map_err(|err| ApiFailure::Transport(format!("{err:#}")))?;

    let url = format!("{api_base}/clans/%23{clan_tag}");
    let resp = client
        .get(&url)
        .header(AUTHORIZATION, format!("Bearer {api_key}"))
        .header(ACCEPT, "application/json")
        .send()
        .map_err(|err| ApiFailure::Transport(format!("clan request failed: {err}")))?;

    let status = resp.status();
    let body = resp
        .text()
        .map_err(|err| ApiFailure::Transport(format!("failed reading clan body: {err}")))?;

    if !status.is_success() {
        return Err(classify_http_failure(status.as_u16(), &body));
    }
    parse_clan_json(&body)
}

pub fn parse_clan_json(raw: &str) -> Result<ClanResponse, ApiFailure> {
    serde_json::from_str(raw)
        .map_err(|err| ApiFailure::Transport(format!("invalid clan json: {err}")))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiErrorBody {
    reason: String,
    message: String,
}

/// Map an HTTP error response onto the failure taxonomy. The body is parsed
/// as JSON when possible; otherwise the raw text stands in for the message.
pub fn classify_http_failure(status: u16, body: &str) -> ApiFailure {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = if parsed.message.is_empty() {
        body.to_string()
    } else {
        parsed.message
    };

    if status == 403 && parsed.reason == "accessDenied.invalidIp" {
        return ApiFailure::InvalidIp { message };
    }

    let reason = if parsed.reason.is_empty() {
        "unknown".to_string()
    } else {
        parsed.reason
    };
    ApiFailure::Http {
        status,
        reason,
        message,
    }
}
