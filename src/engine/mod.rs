// ── Chatflow Engine Layer ──────────────────────────────────────────────────
// Everything that touches the network or holds session state.
//
// Dependency rule (one-way): engine/* may import from atoms/*, never the
// other way around. main.rs drives the engine through ConversationSession.

pub mod auth;
pub mod config;
pub mod conversation;
pub mod detect;
pub mod http;
pub mod session;
