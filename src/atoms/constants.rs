// ── Chatflow Atoms: Constants ──────────────────────────────────────────────
// All named constants for the crate live here.
// Rationale: collecting constants in one place eliminates magic strings,
// makes auditing easier, and keeps every layer's code self-documenting.

// ── Remote service endpoints ───────────────────────────────────────────────
// Both are overridable through `ChatConfig` so tests (and self-hosted
// proxies) can point the client at a local server.
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_API_BASE: &str = "https://dialogflow.googleapis.com";

// ── OAuth token exchange ───────────────────────────────────────────────────
// Used by `CredentialProvider` in engine/auth.rs.
pub const OAUTH_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for the signed assertion, and the fallback lifetime
/// when the token endpoint omits `expires_in`.
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

/// A cached credential within this many seconds of its expiry is treated as
/// stale and refreshed before being handed out.
pub const REFRESH_MARGIN_SECS: i64 = 100;

// ── HTTP client ────────────────────────────────────────────────────────────
pub const CONNECT_TIMEOUT_SECS: u64 = 10;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// ── Session defaults ───────────────────────────────────────────────────────
pub const DEFAULT_LANGUAGE: &str = "en";

/// Environment variable holding the service-account key JSON inline.
pub const KEY_ENV_VAR: &str = "GCP_SERVICE_ACCOUNT_JSON";

// ── User-visible strings ───────────────────────────────────────────────────
// The fallback reply is the only thing an end user ever sees of a failed
// exchange; raw error detail goes to the operator log exclusively.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble answering right now. Please try again in a moment.";
pub const GREETING: &str = "Hello! How can I help you today?";
