//! Prompt templates for forum generation

use crate::agent::{Agent, PersonaRecord, SignatureMode};
use crate::core::string::single_line;
use crate::forum::post::Post;
use serde::{Deserialize, Serialize};

/// Invites the agent to engage with what is already on the board.
pub const ASK_ABOUT_FORUM_LINE: &str =
    "You may ask others what this forum is for, or react to the threads below.";

/// Replaces [`ASK_ABOUT_FORUM_LINE`] when the board has no threads yet.
pub const COLD_START_LINE: &str =
    "The forum is empty. Open with a concrete topic from your own work.";

const HUMAN_THREAD_LINE: &str = "On this forum you write naturally, like a human user.";
const HUMAN_REPLY_LINE: &str = "On this forum you comment naturally, like a human user.";
const ANON_THREAD_LINE: &str = "Write briefly in the voice of an anonymous message board. \
Never mention whether you are human or AI. End with a question if it fits.";
const ANON_REPLY_LINE: &str = "React briefly in the voice of an anonymous message board. \
Never mention whether you are human or AI. Ask back if it fits.";

/// Writing-style toggles layered onto every generation prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleFlags {
    pub human_mode: bool,
    pub anon_style: bool,
}

/// Templates for generating agent prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt for a new thread.
    ///
    /// `cold_start` is true when the board has no threads at all.
    pub fn thread_prompt(
        agent: &Agent,
        persona: &PersonaRecord,
        style: StyleFlags,
        context: &str,
        cold_start: bool,
    ) -> String {
        let mut lines = Self::preamble(agent, persona);
        if style.human_mode {
            lines.push(HUMAN_THREAD_LINE.to_string());
        }
        if style.anon_style {
            lines.push(ANON_THREAD_LINE.to_string());
        }
        lines.push("Write a short forum post. Output exactly one JSON object and nothing else.".to_string());
        lines.push(r#"Format: {"title":"...","body":"..."}"#.to_string());
        lines.push("Rules: title 6-40 characters, body 1-3 sentences, no other text.".to_string());
        if cold_start {
            lines.push(COLD_START_LINE.to_string());
        } else {
            lines.push(ASK_ABOUT_FORUM_LINE.to_string());
        }
        Self::finish(lines, context)
    }

    /// Prompt for a reply to `parent`.
    pub fn reply_prompt(
        agent: &Agent,
        persona: &PersonaRecord,
        style: StyleFlags,
        parent: &Post,
        context: &str,
    ) -> String {
        let mut lines = Self::preamble(agent, persona);
        if style.human_mode {
            lines.push(HUMAN_REPLY_LINE.to_string());
        }
        if style.anon_style {
            lines.push(ANON_REPLY_LINE.to_string());
        }
        lines.push("Write a short comment on the post below.".to_string());
        lines.push(format!(
            "Post title: {}",
            parent.title.as_deref().unwrap_or("(none)")
        ));
        lines.push(format!("Post body: {}", single_line(&parent.body)));
        lines.push(r#"Output exactly one JSON object. Format: {"body":"..."}"#.to_string());
        lines.push("Rules: 1-2 sentences, no other text.".to_string());
        Self::finish(lines, context)
    }

    /// Prompt asking the agent to (re)describe its own persona.
    pub fn persona_prompt(agent: &Agent, current: &PersonaRecord) -> String {
        let mut lines = vec![format!(
            "You are {}, an AI agent on a community forum.",
            agent.display_name
        )];
        if !current.is_empty() {
            lines.push(format!("Your current persona: {}", current.to_text_line()));
        }
        lines.push(
            "Describe the persona you want to write with from now on. \
Keep it consistent with your role."
                .to_string(),
        );
        lines.push("Output exactly one JSON object and nothing else.".to_string());
        lines.push(
            r#"Format: {"role":"...","tone":"...","habit":"...","signature":"...","signature_mode":"prefix|suffix","topic":"..."}"#
                .to_string(),
        );
        lines.push(
            "Rules: every field is a short phrase; signature is a few characters you add to every post."
                .to_string(),
        );
        lines.join("\n")
    }

    /// One-line description of a persona, or `None` for an empty record.
    pub fn persona_description(persona: &PersonaRecord) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(role) = &persona.role {
            parts.push(format!("role {}", role));
        }
        if let Some(tone) = &persona.tone {
            parts.push(format!("tone {}", tone));
        }
        if let Some(topic) = &persona.topic {
            parts.push(format!("focus {}", topic));
        }
        if let Some(habit) = &persona.habit {
            parts.push(format!("habit: {}", habit));
        }
        if parts.is_empty() {
            None
        } else {
            Some(format!("Persona: {}.", parts.join(", ")))
        }
    }

    /// Where and what to sign, defaulting to the end of the post.
    pub fn signature_instruction(persona: &PersonaRecord) -> Option<String> {
        let signature = persona.signature.as_deref()?;
        Some(match persona.signature_mode.unwrap_or(SignatureMode::Suffix) {
            SignatureMode::Prefix => format!("Begin every post with your signature: {}", signature),
            SignatureMode::Suffix => format!("End every post with your signature: {}", signature),
        })
    }

    fn preamble(agent: &Agent, persona: &PersonaRecord) -> Vec<String> {
        let mut lines = vec![format!("You are an AI agent named {}.", agent.display_name)];
        lines.extend(Self::persona_description(persona));
        lines.extend(Self::signature_instruction(persona));
        lines
    }

    fn finish(mut lines: Vec<String>, context: &str) -> String {
        let context = context.trim();
        if !context.is_empty() {
            lines.push(String::new());
            lines.push(context.to_string());
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentId;
    use crate::agent::persona::record_for;
    use crate::forum::post::{NewPost, PostId};
    use crate::forum::round::RoundId;
    use chrono::Utc;

    fn agent() -> Agent {
        Agent {
            id: AgentId::new("1"),
            slug: "agent-001".to_string(),
            display_name: "Agent 001 · SRE".to_string(),
            anon_index: Some(1),
            persona: None,
            avatar_url: None,
        }
    }

    #[test]
    fn test_cold_start_omits_forum_question() {
        let persona = record_for("agent-001");
        let cold = PromptTemplate::thread_prompt(&agent(), &persona, StyleFlags::default(), "", true);
        assert!(!cold.contains(ASK_ABOUT_FORUM_LINE));
        assert!(cold.contains(COLD_START_LINE));

        let warm = PromptTemplate::thread_prompt(
            &agent(),
            &persona,
            StyleFlags::default(),
            "Recent threads:\n1) [anon-002] Title: x / Body: y",
            false,
        );
        assert!(warm.contains(ASK_ABOUT_FORUM_LINE));
        assert!(!warm.contains(COLD_START_LINE));
        assert!(warm.ends_with("Body: y"));
    }

    #[test]
    fn test_style_lines_are_optional() {
        let persona = PersonaRecord::default();
        let plain = PromptTemplate::thread_prompt(&agent(), &persona, StyleFlags::default(), "", false);
        assert!(!plain.contains("human user"));
        assert!(!plain.contains("anonymous"));

        let styled = PromptTemplate::thread_prompt(
            &agent(),
            &persona,
            StyleFlags {
                human_mode: true,
                anon_style: true,
            },
            "",
            false,
        );
        assert!(styled.contains("human user"));
        assert!(styled.contains("anonymous message board"));
    }

    #[test]
    fn test_signature_instruction_follows_mode() {
        let mut persona = PersonaRecord {
            signature: Some("#shipit".to_string()),
            signature_mode: Some(SignatureMode::Prefix),
            ..Default::default()
        };
        assert_eq!(
            PromptTemplate::signature_instruction(&persona).unwrap(),
            "Begin every post with your signature: #shipit"
        );
        persona.signature_mode = None;
        assert!(PromptTemplate::signature_instruction(&persona)
            .unwrap()
            .starts_with("End every post"));
        assert!(PromptTemplate::signature_instruction(&PersonaRecord::default()).is_none());
    }

    #[test]
    fn test_reply_prompt_quotes_parent() {
        let parent = NewPost::thread(AgentId::new("2"), "Alerts", "Too\nmany pages", RoundId::new("r"))
            .into_post(PostId::new("9"), Utc::now());
        let prompt = PromptTemplate::reply_prompt(
            &agent(),
            &PersonaRecord::default(),
            StyleFlags::default(),
            &parent,
            "",
        );
        assert!(prompt.contains("Post title: Alerts"));
        assert!(prompt.contains("Post body: Too many pages"));
        assert!(prompt.contains(r#"{"body":"..."}"#));
    }

    #[test]
    fn test_persona_prompt_lists_all_fields() {
        let prompt = PromptTemplate::persona_prompt(&agent(), &record_for("agent-001"));
        for field in ["role", "tone", "habit", "signature", "signature_mode", "topic"] {
            assert!(prompt.contains(&format!("\"{}\"", field)), "missing {}", field);
        }
        assert!(prompt.contains("Your current persona: role:"));
    }

    #[test]
    fn test_persona_description_empty() {
        assert!(PromptTemplate::persona_description(&PersonaRecord::default()).is_none());
    }
}
