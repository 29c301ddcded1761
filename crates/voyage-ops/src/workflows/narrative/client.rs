use super::{NarrativeError, NarrativeGenerator};
use crate::config::NarrativeConfig;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Narrative calls can run long on large batches; fail well before any
/// upstream proxy would.
const REQUEST_TIMEOUT_SECS: u64 = 90;

/// Maximum length for error response bodies carried in error messages.
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [MessagePayload<'a>; 1],
}

#[derive(Debug, Serialize)]
struct MessagePayload<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Client for the Anthropic Messages API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct AnthropicNarrativeClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
}

impl AnthropicNarrativeClient {
    pub fn from_config(config: &NarrativeConfig) -> Result<Self, NarrativeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_tokens: config.max_tokens,
        })
    }

    async fn request(&self, system: &str, user: &str) -> Result<String, NarrativeError> {
        let payload = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages: [MessagePayload {
                role: "user",
                content: user,
            }],
        };

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NarrativeError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: MessagesResponse = response.json().await?;
        parsed
            .content
            .into_iter()
            .find_map(|block| {
                if block.kind == "text" {
                    block.text
                } else {
                    None
                }
            })
            .filter(|text| !text.trim().is_empty())
            .ok_or(NarrativeError::EmptyCompletion)
    }
}

impl NarrativeGenerator for AnthropicNarrativeClient {
    fn complete(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = Result<String, NarrativeError>> + Send {
        self.request(system, user)
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
