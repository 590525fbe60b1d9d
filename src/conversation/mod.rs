//! Conversation history and query types.
//!
//! History is supplied by the caller on every request and never stored
//! server-side. The last turn of a history is the active question; everything
//! before it is rendered into a flat transcript block for the prompt.

use crate::error::{DestekError, Result};
use serde::{Deserialize, Serialize};

/// Speaker role for a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The customer.
    User,
    /// The assistant. The wire format also accepts `"model"`, which is what
    /// some provider SDKs call this role.
    #[serde(alias = "model")]
    Assistant,
}

impl Role {
    /// Turkish label used when flattening history into the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "Kullanıcı",
            Role::Assistant => "Asistan",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "assistant" | "model" => Ok(Role::Assistant),
            _ => Err(format!("Unknown conversation role: {}", s)),
        }
    }
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// An ordered caller-supplied conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    /// Create a history, validating that it ends with a user turn.
    pub fn new(turns: Vec<ConversationTurn>) -> Result<Self> {
        let last = turns.last().ok_or_else(|| {
            DestekError::InvalidInput("Conversation history is empty".to_string())
        })?;

        if last.role != Role::User {
            return Err(DestekError::InvalidInput(
                "The last turn of a conversation history must come from the user".to_string(),
            ));
        }

        Ok(Self { turns })
    }

    /// The active question: content of the final (user) turn.
    pub fn active_question(&self) -> &str {
        // new() guarantees at least one turn
        &self.turns[self.turns.len() - 1].content
    }

    /// Render every turn except the last as `"<Label>: <content>"` lines.
    ///
    /// A history of length 1 has no prior turns and yields an empty block.
    pub fn transcript(&self) -> String {
        self.turns[..self.turns.len() - 1]
            .iter()
            .map(|turn| format!("{}: {}", turn.role.label(), turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// A single incoming query: either a bare question or a history whose last
/// turn is the active question.
#[derive(Debug, Clone)]
pub enum Query {
    Question(String),
    History(ConversationHistory),
}

impl Query {
    /// The question text this query is asking.
    pub fn question(&self) -> &str {
        match self {
            Query::Question(q) => q,
            Query::History(h) => h.active_question(),
        }
    }

    /// Flattened transcript of prior turns, empty for bare questions.
    pub fn transcript(&self) -> String {
        match self {
            Query::Question(_) => String::new(),
            Query::History(h) => h.transcript(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_history() -> ConversationHistory {
        ConversationHistory::new(vec![
            ConversationTurn::user("Paket A nedir?"),
            ConversationTurn::assistant("Paket A, temel sanal santral paketimizdir."),
            ConversationTurn::user("fiyatı ne kadar?"),
        ])
        .unwrap()
    }

    #[test]
    fn test_transcript_excludes_active_question() {
        let history = sample_history();

        assert_eq!(
            history.transcript(),
            "Kullanıcı: Paket A nedir?\nAsistan: Paket A, temel sanal santral paketimizdir."
        );
        assert_eq!(history.active_question(), "fiyatı ne kadar?");
    }

    #[test]
    fn test_single_turn_history_has_empty_transcript() {
        let history = ConversationHistory::new(vec![ConversationTurn::user("merhaba")]).unwrap();

        assert_eq!(history.transcript(), "");
        assert_eq!(history.active_question(), "merhaba");
    }

    #[test]
    fn test_empty_history_is_rejected() {
        let err = ConversationHistory::new(vec![]).unwrap_err();
        assert!(matches!(err, DestekError::InvalidInput(_)));
    }

    #[test]
    fn test_history_ending_with_assistant_is_rejected() {
        let err = ConversationHistory::new(vec![
            ConversationTurn::user("Paket A nedir?"),
            ConversationTurn::assistant("Paket A ..."),
        ])
        .unwrap_err();

        assert!(matches!(err, DestekError::InvalidInput(_)));
    }

    #[test]
    fn test_model_is_an_alias_for_assistant() {
        assert_eq!(Role::from_str("model").unwrap(), Role::Assistant);
        assert_eq!(Role::from_str("assistant").unwrap(), Role::Assistant);
        assert_eq!(Role::from_str("user").unwrap(), Role::User);
        assert!(Role::from_str("system").is_err());

        let turn: ConversationTurn =
            serde_json::from_str(r#"{"role": "model", "content": "Paket A ..."}"#).unwrap();
        assert_eq!(turn.role, Role::Assistant);
    }

    #[test]
    fn test_query_accessors() {
        let query = Query::Question("Paket B ne kadar?".to_string());
        assert_eq!(query.question(), "Paket B ne kadar?");
        assert_eq!(query.transcript(), "");

        let query = Query::History(sample_history());
        assert_eq!(query.question(), "fiyatı ne kadar?");
        assert!(query.transcript().contains("Kullanıcı: Paket A nedir?"));
    }
}
