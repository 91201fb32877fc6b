//! Report Agents use case: agent counts in the directory and in the runtime.

use crate::ports::agent_runtime::{AgentRuntime, RuntimeError};
use crate::ports::forum_store::{ForumStore, StoreError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentCounts {
    pub directory: usize,
    pub runtime: usize,
}

pub struct ReportAgentsUseCase<R: AgentRuntime, S: ForumStore> {
    runtime: Arc<R>,
    store: Arc<S>,
}

impl<R: AgentRuntime, S: ForumStore> ReportAgentsUseCase<R, S> {
    pub fn new(runtime: Arc<R>, store: Arc<S>) -> Self {
        Self { runtime, store }
    }

    pub async fn execute(&self) -> Result<AgentCounts, ReportError> {
        let directory = self.store.list_agents().await?.len();
        let runtime = self.runtime.list_agents().await?.len();
        Ok(AgentCounts { directory, runtime })
    }
}
