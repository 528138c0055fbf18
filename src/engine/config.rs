// ── Chatflow Engine: Configuration ─────────────────────────────────────────
// Typed configuration populated once at startup and validated eagerly.
// A missing or malformed service-account key fails fast with a descriptive
// Config error instead of surfacing deep inside a request path.

use crate::atoms::constants::*;
use crate::atoms::error::{ChatError, ChatResult};
use crate::atoms::types::{ServiceAccountKey, SessionIdentity};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub key: ServiceAccountKey,
    /// OAuth token endpoint. Overridable for tests / proxies.
    pub token_url: String,
    /// Detect-intent API base. Overridable for tests / proxies.
    pub api_base: String,
    /// Conversation thread id, stable for the process lifetime.
    pub session_id: String,
    pub language_code: String,
    /// When true, a transport-class failure gets exactly one retry with
    /// jittered backoff. Off by default (the service contract has no retry).
    pub retry_transport: bool,
}

impl ChatConfig {
    /// Build from an inline service-account key JSON document.
    pub fn from_key_json(json: &str) -> ChatResult<Self> {
        let key: ServiceAccountKey = serde_json::from_str(json)
            .map_err(|e| ChatError::Config(format!("service-account key JSON is invalid: {e}")))?;
        validate_key(&key)?;
        Ok(ChatConfig {
            key,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            session_id: uuid::Uuid::new_v4().to_string(),
            language_code: DEFAULT_LANGUAGE.to_string(),
            retry_transport: false,
        })
    }

    /// Build from a service-account key file on disk.
    pub fn from_key_file(path: &Path) -> ChatResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ChatError::Config(format!("cannot read key file {}: {e}", path.display()))
        })?;
        Self::from_key_json(&json)
    }

    /// Build from the `GCP_SERVICE_ACCOUNT_JSON` environment variable.
    pub fn from_env() -> ChatResult<Self> {
        let json = std::env::var(KEY_ENV_VAR)
            .map_err(|_| ChatError::Config(format!("{KEY_ENV_VAR} is not set")))?;
        Self::from_key_json(&json)
    }

    /// The session identity handed to every exchange. `project_id` always
    /// comes from the key bundle, never from a literal in code.
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            project_id: self.key.project_id.clone(),
            session_id: self.session_id.clone(),
            language_code: self.language_code.clone(),
        }
    }
}

/// Structural checks that do not need crypto. The RSA key itself is parsed
/// (and rejected if malformed) when the credential provider is constructed.
fn validate_key(key: &ServiceAccountKey) -> ChatResult<()> {
    if key.client_email.trim().is_empty() {
        return Err(ChatError::Config("service-account key: client_email is empty".into()));
    }
    if key.project_id.trim().is_empty() {
        return Err(ChatError::Config("service-account key: project_id is empty".into()));
    }
    if !key.private_key.contains("PRIVATE KEY") {
        return Err(ChatError::Config(
            "service-account key: private_key is not a PEM private key".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::error::ChatError;

    const TEST_KEY_PEM: &str = include_str!("../../tests/data/test_key.pem");

    fn key_json(private_key: &str) -> String {
        serde_json::json!({
            "client_email": "bot@demo.iam.gserviceaccount.com",
            "private_key": private_key,
            "project_id": "demo-project",
        })
        .to_string()
    }

    #[test]
    fn valid_key_json_is_accepted() {
        let config = ChatConfig::from_key_json(&key_json(TEST_KEY_PEM)).unwrap();
        assert_eq!(config.key.project_id, "demo-project");
        assert_eq!(config.language_code, "en");
        assert!(!config.retry_transport);
        let identity = config.identity();
        assert_eq!(identity.project_id, "demo-project");
        assert!(!identity.session_id.is_empty());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ChatConfig::from_key_json("not json").unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
    }

    #[test]
    fn missing_fields_are_rejected() {
        let err = ChatConfig::from_key_json(r#"{"client_email":"a@b","private_key":"x"}"#)
            .unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
    }

    #[test]
    fn non_pem_private_key_is_rejected() {
        let err = ChatConfig::from_key_json(&key_json("clearly not a key")).unwrap_err();
        assert!(matches!(err, ChatError::Config(_)));
    }

    #[test]
    fn empty_client_email_is_rejected() {
        let json = serde_json::json!({
            "client_email": "  ",
            "private_key": TEST_KEY_PEM,
            "project_id": "demo-project",
        })
        .to_string();
        assert!(matches!(ChatConfig::from_key_json(&json), Err(ChatError::Config(_))));
    }
}
