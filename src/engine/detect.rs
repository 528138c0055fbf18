// ── Chatflow Engine: Detect-Intent Exchange Client ─────────────────────────
//
// Sends one text utterance plus session identity to the Dialogflow
// detect-intent endpoint and returns the fulfillment text.
//
// Error classification:
//   • empty/whitespace utterance     → Input (no network call)
//   • credential acquisition failure → propagated from CredentialProvider
//   • HTTP 401/403                   → Auth
//   • other non-2xx / network error  → Transport
//   • missing/empty fulfillment text → Protocol
//
// Auth and Protocol failures are never retried. When `retry_transport` is
// enabled, a network error or a retryable status (429/5xx) gets exactly one
// retry with jittered backoff, honoring Retry-After; non-retryable statuses
// surface immediately even with the flag on.

use crate::atoms::error::{ChatError, ChatResult};
use crate::atoms::types::SessionIdentity;
use crate::engine::auth::CredentialProvider;
use crate::engine::config::ChatConfig;
use crate::engine::http::{
    build_client, is_retryable_status, parse_retry_after, retry_delay, truncate_chars,
};
use log::{error, info, warn};
use serde_json::{json, Value};

/// One failed attempt, carrying what the retry loop needs to decide.
struct SendFailure {
    error: ChatError,
    retryable: bool,
    retry_after: Option<u64>,
}

impl SendFailure {
    fn terminal(error: ChatError) -> Self {
        SendFailure { error, retryable: false, retry_after: None }
    }
}

pub struct DetectIntentClient {
    client: reqwest::Client,
    api_base: String,
    credentials: CredentialProvider,
    retry_transport: bool,
}

impl DetectIntentClient {
    pub fn new(config: &ChatConfig) -> ChatResult<Self> {
        Ok(DetectIntentClient {
            client: build_client(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            credentials: CredentialProvider::new(&config.key, &config.token_url)?,
            retry_transport: config.retry_transport,
        })
    }

    /// Send one utterance and return the reply string unmodified
    /// (no trimming, no re-encoding).
    pub async fn send(&self, utterance: &str, identity: &SessionIdentity) -> ChatResult<String> {
        if utterance.trim().is_empty() {
            return Err(ChatError::Input("utterance is empty or whitespace-only".into()));
        }

        let attempts: u32 = if self.retry_transport { 2 } else { 1 };
        let mut last: Option<ChatError> = None;
        let mut retry_after: Option<u64> = None;
        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = retry_delay(attempt - 1, retry_after.take()).await;
                warn!("[detect] transport retry {attempt} after {}ms", delay.as_millis());
            }
            match self.send_once(utterance, identity).await {
                Ok(reply) => return Ok(reply),
                Err(failure) if failure.retryable => {
                    retry_after = failure.retry_after;
                    last = Some(failure.error);
                }
                Err(failure) => return Err(failure.error),
            }
        }
        Err(last.unwrap_or_else(|| ChatError::Transport("detect-intent request failed".into())))
    }

    async fn send_once(
        &self,
        utterance: &str,
        identity: &SessionIdentity,
    ) -> Result<String, SendFailure> {
        let credential = self.credentials.acquire().await.map_err(SendFailure::terminal)?;

        // Both identifiers come from configuration; encode them so an odd
        // session id can never break the path.
        let url = format!(
            "{}/v2/projects/{}/agent/sessions/{}:detectIntent",
            self.api_base,
            urlencoding::encode(&identity.project_id),
            urlencoding::encode(&identity.session_id),
        );
        let body = json!({
            "queryInput": {
                "text": {
                    "text": utterance,
                    "languageCode": identity.language_code,
                }
            }
        });

        info!(
            "[detect] sending utterance ({} chars) session={}",
            utterance.len(),
            identity.session_id
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&credential.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SendFailure {
                error: ChatError::Transport(format!("detect-intent request failed: {e}")),
                retryable: true,
                retry_after: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after);
            let body_text = response.text().await.unwrap_or_default();
            let detail = format!(
                "detect-intent returned {}: {}",
                status.as_u16(),
                truncate_chars(&body_text, 200)
            );
            error!("[detect] {detail}");
            return if matches!(status.as_u16(), 401 | 403) {
                Err(SendFailure::terminal(ChatError::Auth(detail)))
            } else {
                Err(SendFailure {
                    error: ChatError::Transport(detail),
                    retryable: is_retryable_status(status.as_u16()),
                    retry_after,
                })
            };
        }

        let v: Value = response.json().await.map_err(|e| {
            SendFailure::terminal(ChatError::Protocol(format!(
                "detect-intent response is not JSON: {e}"
            )))
        })?;

        match v["queryResult"]["fulfillmentText"].as_str() {
            Some(reply) if !reply.is_empty() => Ok(reply.to_string()),
            Some(_) => Err(SendFailure::terminal(ChatError::Protocol(
                "detect-intent fulfillment text is empty".into(),
            ))),
            None => Err(SendFailure::terminal(ChatError::Protocol(
                "detect-intent response missing queryResult.fulfillmentText".into(),
            ))),
        }
    }
}
