// Chatflow — terminal chat client for Google Dialogflow detect-intent.
//
// Layering:
//   atoms/   pure constants, types, and the error taxonomy (no I/O)
//   engine/  configuration, credential provider, exchange client, session
//
// The typical embedding builds a `ChatConfig`, constructs a
// `ConversationSession` from it, and calls `say()` once per user utterance.

pub mod atoms;
pub mod engine;

pub use atoms::constants;
pub use atoms::error::{ChatError, ChatResult};
pub use atoms::types::{Credential, Sender, ServiceAccountKey, SessionIdentity, Turn};
pub use engine::auth::CredentialProvider;
pub use engine::config::ChatConfig;
pub use engine::conversation::ConversationLog;
pub use engine::detect::DetectIntentClient;
pub use engine::session::ConversationSession;
