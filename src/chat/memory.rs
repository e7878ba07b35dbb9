use parking_lot::RwLock;
use std::collections::HashMap;

/// One question/answer exchange. Immutable once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub question: String,
    pub answer: String,
}

/// In-memory conversation history, keyed by session so concurrent users
/// never interleave into one shared dialogue. Process-lifetime only; nothing
/// survives a restart.
#[derive(Default)]
pub struct ConversationMemory {
    sessions: RwLock<HashMap<String, Vec<Turn>>>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn to the end of the session's history.
    pub fn append(&self, session: &str, turn: Turn) {
        self.sessions
            .write()
            .entry(session.to_string())
            .or_default()
            .push(turn);
    }

    /// Empty the session's history. Clearing an unknown or already-empty
    /// session is a no-op.
    pub fn clear(&self, session: &str) {
        self.sessions.write().remove(session);
    }

    /// The session's history in chronological order.
    pub fn snapshot(&self, session: &str) -> Vec<Turn> {
        self.sessions
            .read()
            .get(session)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(q: &str, a: &str) -> Turn {
        Turn {
            question: q.to_string(),
            answer: a.to_string(),
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let memory = ConversationMemory::new();
        memory.append("s", turn("q1", "a1"));
        memory.append("s", turn("q2", "a2"));
        memory.append("s", turn("q3", "a3"));

        let history = memory.snapshot("s");
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].question, "q1");
        assert_eq!(history[2].answer, "a3");
    }

    #[test]
    fn test_snapshot_unknown_session_is_empty() {
        let memory = ConversationMemory::new();
        assert!(memory.snapshot("nobody").is_empty());
    }

    #[test]
    fn test_clear_then_snapshot_is_empty() {
        let memory = ConversationMemory::new();
        memory.append("s", turn("q", "a"));
        memory.clear("s");
        assert!(memory.snapshot("s").is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let memory = ConversationMemory::new();
        memory.clear("s");
        memory.clear("s");
        assert!(memory.snapshot("s").is_empty());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let memory = ConversationMemory::new();
        memory.append("alice", turn("qa", "aa"));
        memory.append("bob", turn("qb", "ab"));

        assert_eq!(memory.snapshot("alice").len(), 1);
        assert_eq!(memory.snapshot("alice")[0].question, "qa");
        assert_eq!(memory.snapshot("bob")[0].question, "qb");

        memory.clear("alice");
        assert!(memory.snapshot("alice").is_empty());
        assert_eq!(memory.snapshot("bob").len(), 1);
    }
}
