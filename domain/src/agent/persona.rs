//! Persona encoding and decoding.
//!
//! A persona is a small closed record describing how an agent writes. It is
//! stored in one of two physical forms:
//!
//! | Form | Example |
//! |------|---------|
//! | JSON object | `{"role":"SRE","tone":"analytical","signature_mode":"suffix",...}` |
//! | Text line | `role: SRE; tone: analytical; topic: monitoring; habit: ...; signature(suffix): ...` |
//!
//! [`PersonaRecord::decode`] accepts both: strict JSON first, then the
//! labeled-field patterns of the text line. Absent fields stay `None`.

use crate::core::error::DomainError;
use crate::core::hash::stable_hash;
use crate::core::string::single_line;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

const ROLES: &[&str] = &[
    "SRE",
    "security analyst",
    "product manager",
    "data analyst",
    "researcher",
    "frontend engineer",
    "backend engineer",
    "ML engineer",
    "QA engineer",
    "operations manager",
    "designer",
    "developer experience lead",
    "technical writer",
    "performance engineer",
    "systems architect",
];

const TONES: &[&str] = &[
    "short and crisp",
    "analytical",
    "conversational",
    "meticulous",
    "experiment-driven",
    "checklist-minded",
    "summary-first",
    "meeting-minutes style",
];

const TOPICS: &[&str] = &[
    "monitoring",
    "cost optimization",
    "prompt design",
    "data quality",
    "automation",
    "incident response",
    "performance tuning",
    "usability",
    "security hardening",
    "experiment design",
];

const HABITS: &[&str] = &[
    "always proposes a next action",
    "always cites a number",
    "names the risks first",
    "leads with the conclusion",
    "offers two alternatives",
    "emphasizes metrics",
];

const SIGNATURES: &[&str] = &[
    "[ops]",
    "~ back to the dashboards",
    ">> my two cents",
    "#shipit",
    "(numbers or it didn't happen)",
    "// end of transmission",
];

static ROLE_RE: LazyLock<Regex> = LazyLock::new(|| labeled("role"));
static TONE_RE: LazyLock<Regex> = LazyLock::new(|| labeled("tone"));
static TOPIC_RE: LazyLock<Regex> = LazyLock::new(|| labeled("topic"));
static HABIT_RE: LazyLock<Regex> = LazyLock::new(|| labeled("habit"));
static SIGNATURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bsignature\s*(?:\(\s*(prefix|suffix)\s*\))?\s*:\s*([^;\n]+)")
        .expect("signature pattern is valid")
});

fn labeled(label: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\s*:\s*([^;\n]+)", label)).expect("label pattern is valid")
}

/// Where an agent places its signature in a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureMode {
    Prefix,
    Suffix,
}

impl SignatureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureMode::Prefix => "prefix",
            SignatureMode::Suffix => "suffix",
        }
    }
}

impl FromStr for SignatureMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix" => Ok(SignatureMode::Prefix),
            "suffix" => Ok(SignatureMode::Suffix),
            other => Err(DomainError::InvalidSignatureMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for SignatureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decoded persona (Value Object). Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_mode: Option<SignatureMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl PersonaRecord {
    /// Decode either representation. Never fails; unknown text yields an
    /// empty record.
    pub fn decode(text: &str) -> Self {
        Self::from_json(text).unwrap_or_else(|| Self::from_labeled_text(text))
    }

    /// Strict structured decode: the whole input must be a JSON object.
    pub fn from_json(text: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(text.trim()).ok()?;
        if !value.is_object() {
            return None;
        }
        serde_json::from_value::<Self>(value)
            .ok()
            .map(Self::normalized)
    }

    /// Pattern-match labeled fields out of free text.
    pub fn from_labeled_text(text: &str) -> Self {
        let capture = |re: &Regex| {
            re.captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let (signature, signature_mode) = match SIGNATURE_RE.captures(text) {
            Some(caps) => (
                caps.get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .filter(|s| !s.is_empty()),
                caps.get(1).and_then(|m| m.as_str().parse().ok()),
            ),
            None => (None, None),
        };

        Self {
            role: capture(&ROLE_RE),
            tone: capture(&TONE_RE),
            habit: capture(&HABIT_RE),
            signature,
            signature_mode,
            topic: capture(&TOPIC_RE),
        }
    }

    /// Render as the semi-structured text line.
    ///
    /// Values are flattened to one line and `;` is replaced, so the line
    /// always decodes back into the same fields.
    pub fn to_text_line(&self) -> String {
        let clean = |s: &str| single_line(s).replace(';', ",");
        let mut parts = Vec::new();

        if let Some(role) = &self.role {
            parts.push(format!("role: {}", clean(role)));
        }
        if let Some(tone) = &self.tone {
            parts.push(format!("tone: {}", clean(tone)));
        }
        if let Some(topic) = &self.topic {
            parts.push(format!("topic: {}", clean(topic)));
        }
        if let Some(habit) = &self.habit {
            parts.push(format!("habit: {}", clean(habit)));
        }
        if let Some(signature) = &self.signature {
            match self.signature_mode {
                Some(mode) => parts.push(format!("signature({}): {}", mode, clean(signature))),
                None => parts.push(format!("signature: {}", clean(signature))),
            }
        }

        parts.join("; ")
    }

    /// Render as a JSON object (the structured form).
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fill every absent field from `other`.
    pub fn or(self, other: PersonaRecord) -> Self {
        Self {
            role: self.role.or(other.role),
            tone: self.tone.or(other.tone),
            habit: self.habit.or(other.habit),
            signature: self.signature.or(other.signature),
            signature_mode: self.signature_mode.or(other.signature_mode),
            topic: self.topic.or(other.topic),
        }
    }

    /// True when every field the persona contract requires is present.
    pub fn is_complete(&self) -> bool {
        self.role.is_some()
            && self.tone.is_some()
            && self.habit.is_some()
            && self.signature.is_some()
            && self.signature_mode.is_some()
            && self.topic.is_some()
    }

    /// Name of the first field missing from the persona contract.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("role", self.role.is_none()),
            ("tone", self.tone.is_none()),
            ("habit", self.habit.is_none()),
            ("signature", self.signature.is_none()),
            ("signature_mode", self.signature_mode.is_none()),
            ("topic", self.topic.is_none()),
        ]
        .into_iter()
        .find(|(_, missing)| *missing)
        .map(|(name, _)| name)
    }

    fn normalized(self) -> Self {
        let keep = |s: Option<String>| s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            role: keep(self.role),
            tone: keep(self.tone),
            habit: keep(self.habit),
            signature: keep(self.signature),
            signature_mode: self.signature_mode,
            topic: keep(self.topic),
        }
    }
}

/// Deterministic persona for a slug, rendered as a text line.
pub fn encode(slug: &str) -> String {
    record_for(slug).to_text_line()
}

/// Deterministic persona record for a slug.
pub fn record_for(slug: &str) -> PersonaRecord {
    let seed = stable_hash(slug) as usize;
    let signature_mode = if (seed / 17) % 2 == 0 {
        SignatureMode::Suffix
    } else {
        SignatureMode::Prefix
    };

    PersonaRecord {
        role: Some(ROLES[seed % ROLES.len()].to_string()),
        tone: Some(TONES[(seed / 3) % TONES.len()].to_string()),
        habit: Some(HABITS[(seed / 11) % HABITS.len()].to_string()),
        signature: Some(SIGNATURES[(seed / 13) % SIGNATURES.len()].to_string()),
        signature_mode: Some(signature_mode),
        topic: Some(TOPICS[(seed / 7) % TOPICS.len()].to_string()),
    }
}

/// Role used in display names and runtime themes.
pub fn role_for(slug: &str) -> &'static str {
    ROLES[stable_hash(slug) as usize % ROLES.len()]
}
