//! Structured payload extraction from free-form agent output.
//!
//! Agents are told to answer with exactly one JSON object, but they are free
//! to wrap it in commentary or code fences. Extraction takes the substring
//! from the first `{` to the last `}` and decodes it strictly. Every failure
//! is a [`MalformedOutput`], which callers answer with a fallback draft.

use crate::agent::PersonaRecord;
use crate::core::error::MalformedOutput;
use crate::core::string::take_chars;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Maximum characters of raw output kept in a fallback body.
pub const FALLBACK_BODY_CHARS: usize = 300;

/// Body used when the agent returned nothing at all.
pub const EMPTY_OUTPUT_BODY: &str = "(no content)";

/// Extract the JSON object embedded in `text`.
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>, MalformedOutput> {
    let start = text.find('{').ok_or(MalformedOutput::NoObject)?;
    let end = text.rfind('}').ok_or(MalformedOutput::NoObject)?;
    if end <= start {
        return Err(MalformedOutput::NoObject);
    }

    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(MalformedOutput::NoObject),
        Err(e) => Err(MalformedOutput::InvalidJson(e.to_string())),
    }
}

fn required_text(map: &Map<String, Value>, field: &'static str) -> Result<String, MalformedOutput> {
    map.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(MalformedOutput::MissingField(field))
}

/// Trimmed raw output cut to [`FALLBACK_BODY_CHARS`].
pub fn fallback_body(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        EMPTY_OUTPUT_BODY.to_string()
    } else {
        take_chars(trimmed, FALLBACK_BODY_CHARS).trim_end().to_string()
    }
}

/// Content of a new thread: `{"title": "...", "body": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadDraft {
    pub title: String,
    pub body: String,
}

impl ThreadDraft {
    pub fn parse(text: &str) -> Result<Self, MalformedOutput> {
        let map = extract_json_object(text)?;
        Ok(Self {
            title: required_text(&map, "title")?,
            body: required_text(&map, "body")?,
        })
    }

    /// Draft synthesized from unusable output.
    pub fn fallback(raw: &str, display_name: &str) -> Self {
        Self {
            title: format!("{}'s update", display_name),
            body: fallback_body(raw),
        }
    }
}

/// Content of a reply: `{"body": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyDraft {
    pub body: String,
}

impl ReplyDraft {
    pub fn parse(text: &str) -> Result<Self, MalformedOutput> {
        let map = extract_json_object(text)?;
        Ok(Self {
            body: required_text(&map, "body")?,
        })
    }

    pub fn fallback(raw: &str) -> Self {
        Self {
            body: fallback_body(raw),
        }
    }
}

/// Decode a generated persona; all six fields are required.
pub fn parse_persona(text: &str) -> Result<PersonaRecord, MalformedOutput> {
    let map = extract_json_object(text)?;
    let object = Value::Object(map).to_string();
    let record = PersonaRecord::from_json(&object)
        .ok_or_else(|| MalformedOutput::InvalidJson("persona fields have the wrong shape".to_string()))?;
    match record.first_missing_field() {
        Some(field) => Err(MalformedOutput::MissingField(field)),
        None => Ok(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::SignatureMode;

    #[test]
    fn test_extract_object_amid_prose() {
        let text = "Sure! Here is my post:\n```json\n{\"title\": \"Hi\", \"body\": \"There\"}\n```\nHope that helps.";
        let map = extract_json_object(text).unwrap();
        assert_eq!(map["title"], "Hi");
        assert_eq!(map["body"], "There");
    }

    #[test]
    fn test_extract_nested_object() {
        let text = r#"prefix {"body": "a {nested} brace", "meta": {"k": 1}} suffix"#;
        let map = extract_json_object(text).unwrap();
        assert_eq!(map["body"], "a {nested} brace");
    }

    #[test]
    fn test_extract_without_braces() {
        assert_eq!(
            extract_json_object("just words"),
            Err(MalformedOutput::NoObject)
        );
        assert_eq!(
            extract_json_object("} backwards {"),
            Err(MalformedOutput::NoObject)
        );
    }

    #[test]
    fn test_extract_invalid_json() {
        assert!(matches!(
            extract_json_object("{title: unquoted}"),
            Err(MalformedOutput::InvalidJson(_))
        ));
    }

    #[test]
    fn test_two_objects_do_not_decode() {
        // first `{` to last `}` spans both objects
        let text = r#"{"body": "a"} and {"body": "b"}"#;
        assert!(matches!(
            ReplyDraft::parse(text),
            Err(MalformedOutput::InvalidJson(_))
        ));
    }

    #[test]
    fn test_thread_draft_requires_both_fields() {
        assert_eq!(
            ThreadDraft::parse(r#"{"title": "T", "body": "B"}"#).unwrap(),
            ThreadDraft {
                title: "T".to_string(),
                body: "B".to_string()
            }
        );
        assert_eq!(
            ThreadDraft::parse(r#"{"body": "B"}"#),
            Err(MalformedOutput::MissingField("title"))
        );
        assert_eq!(
            ThreadDraft::parse(r#"{"title": "T", "body": "   "}"#),
            Err(MalformedOutput::MissingField("body"))
        );
        assert_eq!(
            ThreadDraft::parse(r#"{"title": 5, "body": "B"}"#),
            Err(MalformedOutput::MissingField("title"))
        );
    }

    #[test]
    fn test_fallback_is_bounded_and_non_empty() {
        let raw = "x".repeat(1000);
        let draft = ThreadDraft::fallback(&raw, "Agent 001 · SRE");
        assert_eq!(draft.title, "Agent 001 · SRE's update");
        assert_eq!(draft.body.chars().count(), FALLBACK_BODY_CHARS);

        let empty = ReplyDraft::fallback("   \n ");
        assert_eq!(empty.body, EMPTY_OUTPUT_BODY);

        let short = ReplyDraft::fallback("  no json here  ");
        assert_eq!(short.body, "no json here");
    }

    #[test]
    fn test_fallback_counts_characters() {
        let raw = "가".repeat(400);
        assert_eq!(
            ReplyDraft::fallback(&raw).body.chars().count(),
            FALLBACK_BODY_CHARS
        );
    }

    #[test]
    fn test_parse_persona_complete() {
        let text = r#"Persona:
{"role": "SRE", "tone": "dry", "habit": "counts things", "signature": "-- sre",
 "signature_mode": "suffix", "topic": "alerts"}"#;
        let record = parse_persona(text).unwrap();
        assert_eq!(record.role.as_deref(), Some("SRE"));
        assert_eq!(record.signature_mode, Some(SignatureMode::Suffix));
    }

    #[test]
    fn test_parse_persona_missing_field() {
        let text = r#"{"role": "SRE", "tone": "dry", "habit": "h", "signature": "s", "topic": "t"}"#;
        assert_eq!(
            parse_persona(text),
            Err(MalformedOutput::MissingField("signature_mode"))
        );
    }

    #[test]
    fn test_parse_persona_bad_mode() {
        let text = r#"{"role": "SRE", "tone": "dry", "habit": "h", "signature": "s",
                       "signature_mode": "middle", "topic": "t"}"#;
        assert!(matches!(
            parse_persona(text),
            Err(MalformedOutput::InvalidJson(_))
        ));
    }
}
