//! OpenClaw CLI protocol: argument lists and JSON output shapes.
//!
//! Every runtime operation is one `openclaw` invocation. The builders here
//! produce the argument vectors; the parsers decode what the CLI prints on
//! stdout with `--json`.

use forum_application::ports::agent_runtime::{AgentIdentity, AgentSpec, RuntimeAgent};
use serde::Deserialize;
use std::time::Duration;

/// `openclaw agents list --json`
pub fn list_agents_args() -> Vec<String> {
    to_args(&["agents", "list", "--json"])
}

/// `openclaw agents add <slug> --workspace <dir> --model <model> --non-interactive --json`
pub fn add_agent_args(spec: &AgentSpec) -> Vec<String> {
    let workspace = spec.workspace.to_string_lossy();
    to_args(&[
        "agents",
        "add",
        &spec.slug,
        "--workspace",
        &workspace,
        "--model",
        &spec.model,
        "--non-interactive",
        "--json",
    ])
}

/// `openclaw agents set-identity --agent <slug> --name .. --theme .. --emoji ..`
pub fn set_identity_args(identity: &AgentIdentity) -> Vec<String> {
    to_args(&[
        "agents",
        "set-identity",
        "--agent",
        &identity.slug,
        "--name",
        &identity.name,
        "--theme",
        &identity.theme,
        "--emoji",
        &identity.emoji,
    ])
}

/// `openclaw agent --agent <slug> --session-id <id> --message <m> --json --timeout <s> [--thinking <l>]`
pub fn invoke_args(
    agent: &str,
    session_id: &str,
    message: &str,
    timeout: Duration,
    thinking: Option<&str>,
) -> Vec<String> {
    let seconds = timeout.as_secs().max(1).to_string();
    let mut args = to_args(&[
        "agent",
        "--agent",
        agent,
        "--session-id",
        session_id,
        "--message",
        message,
        "--json",
        "--timeout",
        &seconds,
    ]);
    if let Some(level) = thinking {
        args.push("--thinking".to_string());
        args.push(level.to_string());
    }
    args
}

fn to_args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Deserialize)]
struct AgentEntry {
    id: String,
    #[serde(default)]
    name: Option<String>,
}

/// Decode the agent listing.
pub fn parse_agent_list(stdout: &str) -> Result<Vec<RuntimeAgent>, serde_json::Error> {
    let entries: Vec<AgentEntry> = serde_json::from_str(stdout)?;
    Ok(entries
        .into_iter()
        .map(|e| RuntimeAgent {
            id: e.id,
            name: e.name,
        })
        .collect())
}

#[derive(Debug, Default, Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    result: Option<InvokeResult>,
}

#[derive(Debug, Default, Deserialize)]
struct InvokeResult {
    #[serde(default)]
    payloads: Vec<Payload>,
}

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    text: Option<String>,
}

/// Decode an invocation's output: the texts of `result.payloads`, joined by
/// newlines and trimmed. A response without payloads yields an empty string.
pub fn parse_invoke_output(stdout: &str) -> Result<String, serde_json::Error> {
    let response: InvokeResponse = serde_json::from_str(stdout)?;
    let texts: Vec<String> = response
        .result
        .map(|r| r.payloads)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    Ok(texts.join("\n").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_invoke_args() {
        let args = invoke_args(
            "agent-003",
            "agent-003",
            "hello",
            Duration::from_secs(1200),
            Some("medium"),
        );
        assert_eq!(
            args,
            vec![
                "agent", "--agent", "agent-003", "--session-id", "agent-003", "--message",
                "hello", "--json", "--timeout", "1200", "--thinking", "medium",
            ]
        );

        let args = invoke_args("a", "a", "m", Duration::from_secs(5), None);
        assert!(!args.contains(&"--thinking".to_string()));
    }

    #[test]
    fn test_add_agent_args() {
        let spec = AgentSpec {
            slug: "agent-001".to_string(),
            workspace: PathBuf::from("agents/agent-001"),
            model: "openai-codex/gpt-5.2-codex".to_string(),
        };
        let args = add_agent_args(&spec);
        assert_eq!(&args[..3], &["agents", "add", "agent-001"]);
        assert!(args.windows(2).any(|w| w == ["--workspace", "agents/agent-001"]));
        assert!(args.contains(&"--non-interactive".to_string()));
    }

    #[test]
    fn test_set_identity_args() {
        let args = set_identity_args(&AgentIdentity {
            slug: "agent-001".to_string(),
            name: "Agent 001 · SRE".to_string(),
            theme: "SRE".to_string(),
            emoji: "🤖".to_string(),
        });
        assert!(args.windows(2).any(|w| w == ["--name", "Agent 001 · SRE"]));
        assert!(args.windows(2).any(|w| w == ["--emoji", "🤖"]));
    }

    #[test]
    fn test_parse_invoke_output() {
        let stdout = r#"{"result": {"payloads": [{"text": "first"}, {"media": "x"}, {"text": "second\n"}]}}"#;
        assert_eq!(parse_invoke_output(stdout).unwrap(), "first\nsecond");
        assert_eq!(parse_invoke_output(r#"{"status": "ok"}"#).unwrap(), "");
        assert!(parse_invoke_output("not json").is_err());
    }

    #[test]
    fn test_parse_agent_list() {
        let agents =
            parse_agent_list(r#"[{"id": "main"}, {"id": "agent-001", "name": "Agent 001", "workspace": "/tmp"}]"#)
                .unwrap();
        assert_eq!(agents.len(), 2);
        assert_eq!(agents[1].id, "agent-001");
        assert_eq!(agents[1].name.as_deref(), Some("Agent 001"));
    }
}
