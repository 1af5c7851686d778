use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::{
    error::{AnalysisError, Result},
    provider::ProviderConfig,
    types::EncodedPayload,
};

pub static SWING_ANALYSIS_PROMPT: &str = r#"You are a professional golf coach analyzing a golf swing video. Please provide:

1. Swing Analysis: Detailed breakdown of the swing mechanics (setup, backswing, downswing, follow-through, tempo, weight transfer)
2. Key Issues: 2-3 specific problems you observe
3. Recommended Drills: 3 practical drills to address these issues, with clear step-by-step instructions for each

Format your response as JSON with this structure:
{
  "analysis": "detailed analysis text",
  "issues": ["issue 1", "issue 2", "issue 3"],
  "drills": [
    {
      "name": "drill name",
      "purpose": "what it fixes",
      "steps": ["step 1", "step 2", "step 3"],
      "frequency": "how often to practice"
    }
  ]
}

Only return the JSON, no other text."#;

/// Sends one analysis request and hands back the provider's raw reply text.
#[async_trait]
pub trait ReportRequester: Send + Sync {
    async fn request_report(&self, payload: &EncodedPayload) -> Result<String>;
}

pub struct HttpRequester {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl HttpRequester {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ReportRequester for HttpRequester {
    async fn request_report(&self, payload: &EncodedPayload) -> Result<String> {
        let mut request = self
            .client
            .post(&self.config.api_url)
            .header("Content-Type", "application/json")
            .json(&build_request_body(&self.config, payload));

        if let Some(api_key) = &self.config.api_key {
            request = request
                .header("x-api-key", api_key)
                .header("anthropic-version", &self.config.api_version);
        }

        debug!(
            model = %self.config.model,
            url = %self.config.api_url,
            "sending analysis request"
        );
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        decode_reply(status, &body)
    }
}

/// Request body: the video part first, then the coaching instruction.
pub fn build_request_body(config: &ProviderConfig, payload: &EncodedPayload) -> Value {
    serde_json::json!({
        "model": config.model,
        "max_tokens": config.max_tokens,
        "messages": [
            {
                "role": "user",
                "content": [
                    {
                        "type": "video",
                        "source": {
                            "type": "base64",
                            "media_type": payload.media_type(),
                            "data": payload.data(),
                        },
                    },
                    {
                        "type": "text",
                        "text": SWING_ANALYSIS_PROMPT,
                    },
                ],
            },
        ],
    })
}

/// Decode a raw reply body, keeping the status when the body is not JSON.
pub fn decode_reply(status: StatusCode, body: &str) -> Result<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => reply_text(status, &value),
        Err(e) if status.is_success() => Err(AnalysisError::RequestFailed {
            reason: format!("reply is not JSON: {e}"),
        }),
        Err(_) => {
            let excerpt: String = body.trim().chars().take(200).collect();
            Err(AnalysisError::RequestFailed {
                reason: format!("provider returned {status}: {excerpt}"),
            })
        }
    }
}

/// Pull the reply text out of `content[0].text`.
pub fn reply_text(status: StatusCode, body: &Value) -> Result<String> {
    if !status.is_success() || !body["error"].is_null() {
        let message = body["error"]["message"]
            .as_str()
            .unwrap_or("no error message");
        return Err(AnalysisError::RequestFailed {
            reason: format!("provider returned {status}: {message}"),
        });
    }

    let first = body["content"]
        .as_array()
        .and_then(|parts| parts.first())
        .ok_or_else(|| AnalysisError::RequestFailed {
            reason: "reply has no content".to_string(),
        })?;

    let text = first["text"]
        .as_str()
        .ok_or_else(|| AnalysisError::RequestFailed {
            reason: "first content part carries no text".to_string(),
        })?;

    if text.trim().is_empty() {
        return Err(AnalysisError::RequestFailed {
            reason: "reply text is empty".to_string(),
        });
    }

    Ok(text.to_string())
}
