use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::CrmSettings;
use crate::sources::SourceError;

/// HTTP request timeout. The CRM can be slow on large SOQL results but a
/// hung request should fail well before the caller gives up.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Assumed token lifetime when the token response omits one.
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

/// Maximum length for error response bodies carried in error messages.
const MAX_ERROR_BODY_LENGTH: usize = 500;

const PRODUCTION_TOKEN_URL: &str = "https://login.salesforce.com/services/oauth2/token";
const SANDBOX_TOKEN_URL: &str = "https://test.salesforce.com/services/oauth2/token";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse {
    #[serde(rename = "totalSize")]
    pub total_size: u64,
    pub done: bool,
    #[serde(default)]
    pub records: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: String,
    success: bool,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// REST client for the CRM, holding an OAuth client-credentials token that
/// is refreshed on expiry. Clones share the connection pool and token cache.
#[derive(Clone)]
pub(crate) struct CrmClient {
    http: reqwest::Client,
    settings: CrmSettings,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl CrmClient {
    pub(crate) fn new(settings: CrmSettings) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            settings,
            token: Arc::new(Mutex::new(None)),
        })
    }

    fn base_url(&self) -> String {
        format!(
            "{}/services/data/{}",
            self.settings.instance_url.trim_end_matches('/'),
            self.settings.api_version
        )
    }

    async fn bearer_token(&self) -> Result<String, SourceError> {
        let mut guard = self.token.lock().await;
        if let Some(cached) = guard.as_ref() {
            if cached.is_valid() {
                return Ok(cached.access_token.clone());
            }
        }

        let token_url = if self.settings.sandbox {
            SANDBOX_TOKEN_URL
        } else {
            PRODUCTION_TOKEN_URL
        };

        debug!(%token_url, "authenticating with CRM");
        let response = self
            .http
            .post(token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.settings.client_id.as_str()),
                ("client_secret", self.settings.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Auth(format!(
                "token request failed ({}): {}",
                status.as_u16(),
                truncate_body(&body)
            )));
        }

        let token: TokenResponse = response.json().await?;
        let lifetime = token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        let access_token = token.access_token.clone();
        *guard = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        });

        Ok(access_token)
    }

    /// Execute a SOQL query.
    pub(crate) async fn query(&self, soql: &str) -> Result<QueryResponse, SourceError> {
        let token = self.bearer_token().await?;
        let url = format!("{}/query", self.base_url());

        let response = self
            .http
            .get(url)
            .query(&[("q", soql)])
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Query {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: QueryResponse = response.json().await?;
        debug!(total = parsed.total_size, done = parsed.done, "soql query returned");
        Ok(parsed)
    }

    /// Create a record, returning its id.
    pub(crate) async fn create_record(
        &self,
        object: &str,
        body: &serde_json::Value,
    ) -> Result<String, SourceError> {
        let token = self.bearer_token().await?;
        let url = format!("{}/sobjects/{}", self.base_url(), object);

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Query {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let created: CreateResponse = response.json().await?;
        if !created.success {
            return Err(SourceError::Decode(format!(
                "create on {object} reported failure"
            )));
        }
        Ok(created.id)
    }

    /// Partial update of a record. The CRM returns 204 on success.
    pub(crate) async fn update_record(
        &self,
        object: &str,
        id: &str,
        body: &serde_json::Value,
    ) -> Result<(), SourceError> {
        let token = self.bearer_token().await?;
        let url = format!("{}/sobjects/{}/{}", self.base_url(), object, id);

        let response = self
            .http
            .patch(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Query {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(())
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        body.to_string()
    } else {
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }
}
