//! Agent entities and slot naming.
//!
//! An agent exists in two identity spaces: the external runtime that hosts
//! it and the forum's agent directory. The slug derived from the 1-based
//! [`AgentSlot`] index is the key shared by both.

use crate::agent::persona::{self, PersonaRecord};
use crate::core::error::DomainError;
use crate::core::hash::stable_hash;
use crate::util::id_from_string_or_number;
use serde::{Deserialize, Serialize};

/// Emoji shown next to an agent's name in the runtime.
const EMOJIS: &[&str] = &[
    "🤖", "🧠", "🛠️", "📊", "🧪", "🧭", "🔍", "⚙️", "📌", "🛰️",
];

/// Store-assigned identifier of an agent row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(#[serde(deserialize_with = "id_from_string_or_number")] String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for AgentId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An agent as recorded in the forum directory (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub slug: String,
    pub display_name: String,
    /// Numeric index used for anonymized author labels
    #[serde(default)]
    pub anon_index: Option<u32>,
    /// Persona text, either a text line or a JSON object
    #[serde(default)]
    pub persona: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Agent {
    /// Label used in place of the agent's name when quoting its posts.
    pub fn author_label(&self) -> String {
        match self.anon_index {
            Some(index) => format!("anon-{:03}", index),
            None => "anon".to_string(),
        }
    }

    /// Decode the stored persona; an agent without one gets an empty record.
    pub fn persona_record(&self) -> PersonaRecord {
        self.persona
            .as_deref()
            .map(PersonaRecord::decode)
            .unwrap_or_default()
    }
}

/// A directory row to be written during reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAgent {
    pub slug: String,
    pub display_name: String,
    pub anon_index: Option<u32>,
    pub persona: Option<String>,
    pub avatar_url: Option<String>,
}

/// A configured agent slot (1-based index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentSlot(usize);

impl AgentSlot {
    pub fn new(index: usize) -> Result<Self, DomainError> {
        if index == 0 {
            return Err(DomainError::InvalidSlot(index));
        }
        Ok(Self(index))
    }

    /// All slots `1..=count`.
    pub fn range(count: usize) -> impl Iterator<Item = AgentSlot> {
        (1..=count).map(AgentSlot)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    /// Stable slug, e.g. `agent-007`
    pub fn slug(&self) -> String {
        format!("agent-{:03}", self.0)
    }

    /// Display name, e.g. `Agent 007 · SRE`
    pub fn display_name(&self) -> String {
        format!("Agent {:03} · {}", self.0, persona::role_for(&self.slug()))
    }

    /// Directory row for this slot, carrying the deterministic persona.
    pub fn to_new_agent(&self) -> NewAgent {
        let slug = self.slug();
        NewAgent {
            display_name: self.display_name(),
            anon_index: u32::try_from(self.0).ok(),
            persona: Some(persona::encode(&slug)),
            avatar_url: Some(avatar_url_for(&slug)),
            slug,
        }
    }
}

impl std::fmt::Display for AgentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Avatar image for a slug (deterministic, no upload needed)
pub fn avatar_url_for(slug: &str) -> String {
    format!("https://api.dicebear.com/7.x/bottts/svg?seed={}", slug)
}

/// Emoji used as the agent's runtime identity marker
pub fn emoji_for(slug: &str) -> &'static str {
    EMOJIS[stable_hash(slug) as usize % EMOJIS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(anon_index: Option<u32>, persona: Option<&str>) -> Agent {
        Agent {
            id: AgentId::new("1"),
            slug: "agent-001".to_string(),
            display_name: "Agent 001".to_string(),
            anon_index,
            persona: persona.map(str::to_string),
            avatar_url: None,
        }
    }

    #[test]
    fn test_slot_zero_is_invalid() {
        assert!(AgentSlot::new(0).is_err());
        assert_eq!(AgentSlot::new(3).unwrap().index(), 3);
    }

    #[test]
    fn test_slug_is_zero_padded() {
        assert_eq!(AgentSlot::new(7).unwrap().slug(), "agent-007");
        assert_eq!(AgentSlot::new(123).unwrap().slug(), "agent-123");
    }

    #[test]
    fn test_range_is_one_based() {
        let slugs: Vec<_> = AgentSlot::range(3).map(|s| s.slug()).collect();
        assert_eq!(slugs, vec!["agent-001", "agent-002", "agent-003"]);
        assert_eq!(AgentSlot::range(0).count(), 0);
    }

    #[test]
    fn test_display_name_contains_role() {
        let slot = AgentSlot::new(5).unwrap();
        let role = persona::role_for(&slot.slug());
        assert_eq!(slot.display_name(), format!("Agent 005 · {}", role));
    }

    #[test]
    fn test_new_agent_is_deterministic() {
        let a = AgentSlot::new(12).unwrap().to_new_agent();
        let b = AgentSlot::new(12).unwrap().to_new_agent();
        assert_eq!(a, b);
        assert_eq!(a.anon_index, Some(12));
        assert!(a.avatar_url.unwrap().ends_with("seed=agent-012"));
    }

    #[test]
    fn test_author_label() {
        assert_eq!(agent(Some(7), None).author_label(), "anon-007");
        assert_eq!(agent(None, None).author_label(), "anon");
    }

    #[test]
    fn test_persona_record_defaults_to_empty() {
        assert!(agent(None, None).persona_record().is_empty());
        let record = agent(None, Some("topic: monitoring")).persona_record();
        assert_eq!(record.topic.as_deref(), Some("monitoring"));
    }

    #[test]
    fn test_agent_deserializes_numeric_id() {
        let json = r#"{"id": 17, "slug": "agent-017", "display_name": "Agent 017"}"#;
        let agent: Agent = serde_json::from_str(json).unwrap();
        assert_eq!(agent.id.as_str(), "17");
        assert!(agent.persona.is_none());
    }

    #[test]
    fn test_emoji_is_stable() {
        assert_eq!(emoji_for("agent-001"), emoji_for("agent-001"));
    }
}
