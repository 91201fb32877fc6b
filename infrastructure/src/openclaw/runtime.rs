//! [`AgentRuntime`] adapter driving the `openclaw` CLI.

use super::protocol;
use async_trait::async_trait;
use forum_application::ports::agent_runtime::{
    AgentIdentity, AgentRuntime, AgentSpec, InvokeRequest, RuntimeAgent, RuntimeError,
};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

/// Management commands (list, add, set-identity) get this much time.
const MANAGEMENT_TIMEOUT: Duration = Duration::from_secs(120);

/// Agent runtime backed by the OpenClaw CLI.
///
/// Each operation spawns one process. Killing happens on drop, so an
/// aborted round does not leave invocations running.
pub struct OpenClawRuntime {
    program: PathBuf,
}

impl OpenClawRuntime {
    /// Use `command` as-is, resolved through `PATH` at spawn time.
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            program: command.into(),
        }
    }

    /// Resolve `command` now, failing when it is not installed.
    pub fn locate(command: &str) -> Result<Self, RuntimeError> {
        let program = which::which(command)
            .map_err(|e| RuntimeError::Unavailable(format!("{} not found: {}", command, e)))?;
        info!("Using agent runtime at {}", program.display());
        Ok(Self { program })
    }

    async fn run(&self, agent: &str, args: Vec<String>, limit: Duration) -> Result<String, RuntimeError> {
        let verb = args.first().cloned().unwrap_or_default();
        debug!("openclaw {} ({} args) for {}", verb, args.len(), agent);

        let mut cmd = Command::new(&self.program);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| {
            RuntimeError::Unavailable(format!("failed to start {}: {}", self.program.display(), e))
        })?;

        let output = tokio::time::timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| RuntimeError::Timeout {
                agent: agent.to_string(),
                seconds: limit.as_secs(),
            })?
            .map_err(|e| RuntimeError::InvocationFailed {
                agent: agent.to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RuntimeError::InvocationFailed {
                agent: agent.to_string(),
                message: format!("openclaw {} exited with {}: {}", verb, output.status, stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl AgentRuntime for OpenClawRuntime {
    async fn invoke(&self, request: InvokeRequest) -> Result<String, RuntimeError> {
        let args = protocol::invoke_args(
            &request.agent,
            &request.session_id,
            &request.message,
            request.timeout,
            request.thinking.as_deref(),
        );
        let stdout = self.run(&request.agent, args, request.timeout).await?;
        protocol::parse_invoke_output(&stdout)
            .map_err(|e| RuntimeError::UnexpectedOutput(format!("agent {}: {}", request.agent, e)))
    }

    async fn list_agents(&self) -> Result<Vec<RuntimeAgent>, RuntimeError> {
        let stdout = self
            .run("*", protocol::list_agents_args(), MANAGEMENT_TIMEOUT)
            .await?;
        protocol::parse_agent_list(&stdout)
            .map_err(|e| RuntimeError::UnexpectedOutput(format!("agents list: {}", e)))
    }

    async fn create_agent(&self, spec: &AgentSpec) -> Result<(), RuntimeError> {
        tokio::fs::create_dir_all(&spec.workspace)
            .await
            .map_err(|e| RuntimeError::InvocationFailed {
                agent: spec.slug.clone(),
                message: format!("workspace {}: {}", spec.workspace.display(), e),
            })?;
        self.run(&spec.slug, protocol::add_agent_args(spec), MANAGEMENT_TIMEOUT)
            .await?;
        Ok(())
    }

    async fn set_identity(&self, identity: &AgentIdentity) -> Result<(), RuntimeError> {
        self.run(
            &identity.slug,
            protocol::set_identity_args(identity),
            MANAGEMENT_TIMEOUT,
        )
        .await?;
        Ok(())
    }
}
