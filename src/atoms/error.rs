// ── Chatflow Atoms: Error Types ────────────────────────────────────────────
// Single canonical error enum for the crate, built with `thiserror`.
//
// Design rules:
//   • Variants are coarse-grained by failure domain (Config, Auth, Transport,
//     Protocol, Input) — callers branch on the kind, not on message text.
//   • No variant carries secret material (tokens, private keys) in its
//     message; detail strings are safe to write to the operator log.
//   • Remote-failure kinds map to one fixed user-visible fallback string;
//     the enum itself is never shown to an end user.

use thiserror::Error;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ChatError {
    /// Startup-time configuration is missing or invalid (absent key bundle,
    /// malformed JSON, a private key that does not parse). Raised eagerly at
    /// construction, never deep inside a request path.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential acquisition failed, or the remote endpoint rejected the
    /// presented credentials (HTTP 401/403).
    #[error("Auth error: {0}")]
    Auth(String),

    /// Network failure, timeout, or a non-auth HTTP failure status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response arrived but its shape does not match the contract
    /// (not JSON, or the expected reply field is absent).
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Caller precondition violation (empty or whitespace-only utterance).
    /// Raised before any network call is attempted.
    #[error("Invalid input: {0}")]
    Input(String),
}

impl ChatError {
    /// Short lowercase tag for operator-facing log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::Config(_) => "config",
            ChatError::Auth(_) => "auth",
            ChatError::Transport(_) => "transport",
            ChatError::Protocol(_) => "protocol",
            ChatError::Input(_) => "input",
        }
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All fallible chatflow operations return this type.
pub type ChatResult<T> = Result<T, ChatError>;
