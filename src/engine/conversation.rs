// ── Chatflow Engine: Conversation Log ──────────────────────────────────────
// Append-only ordered sequence of turns for one session. No eviction, no
// persistence; the log lives exactly as long as its session.

use crate::atoms::types::{Sender, Turn};

#[derive(Debug, Default)]
pub struct ConversationLog {
    turns: Vec<Turn>,
    next_sequence: u64,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one turn and return it. Sequence numbers are assigned here
    /// and increase monotonically in strict call order.
    pub fn append(&mut self, sender: Sender, text: impl Into<String>) -> &Turn {
        let turn = Turn {
            sender,
            text: text.into(),
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.turns.push(turn);
        self.turns.last().expect("just pushed")
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
