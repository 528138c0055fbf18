// ── Chatflow Engine: Conversation Session ──────────────────────────────────
//
// One session owns everything an interaction needs: the session identity,
// the exchange client (which owns the credential provider), and the
// conversation log. No ambient globals — callers hold the session and pass
// it to every operation.
//
// Failure policy: a failed exchange appends the fixed fallback reply and
// logs the classified kind + detail to the operator log. The end user never
// sees raw error text, and no failure is process-fatal.

use crate::atoms::constants::{FALLBACK_REPLY, GREETING};
use crate::atoms::error::{ChatError, ChatResult};
use crate::atoms::types::{Sender, SessionIdentity, Turn};
use crate::engine::config::ChatConfig;
use crate::engine::conversation::ConversationLog;
use crate::engine::detect::DetectIntentClient;
use log::{error, info};

pub struct ConversationSession {
    identity: SessionIdentity,
    client: DetectIntentClient,
    log: ConversationLog,
}

impl ConversationSession {
    /// Validates configuration (including the RSA key) eagerly and seeds
    /// the log with the greeting turn.
    pub fn new(config: &ChatConfig) -> ChatResult<Self> {
        let client = DetectIntentClient::new(config)?;
        let mut log = ConversationLog::new();
        log.append(Sender::Bot, GREETING);
        info!("[session] started session={}", config.session_id);
        Ok(ConversationSession {
            identity: config.identity(),
            client,
            log,
        })
    }

    /// One user interaction: append the user turn, exchange it with the
    /// remote service, append the reply (or the fallback on any classified
    /// failure) and return the appended bot turn.
    ///
    /// Empty/whitespace input is the caller's precondition violation; it is
    /// rejected up front and leaves the log untouched.
    pub async fn say(&mut self, utterance: &str) -> ChatResult<&Turn> {
        if utterance.trim().is_empty() {
            return Err(ChatError::Input("utterance is empty or whitespace-only".into()));
        }

        self.log.append(Sender::User, utterance);
        match self.client.send(utterance, &self.identity).await {
            Ok(reply) => Ok(self.log.append(Sender::Bot, reply)),
            Err(e) => {
                error!("[session] exchange failed ({}): {e}", e.kind());
                Ok(self.log.append(Sender::Bot, FALLBACK_REPLY))
            }
        }
    }

    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }
}
