//! Reconcile Agents use case
//!
//! Makes sure every configured agent slot exists both in the agent runtime
//! and in the forum's agent directory. Slots already present in a space are
//! left alone there, so running it twice changes nothing the second time.

use crate::config::{ForumConfig, RosterParams};
use crate::ports::agent_runtime::{AgentIdentity, AgentRuntime, AgentSpec, RuntimeError};
use crate::ports::forum_store::{ForumStore, StoreError};
use crate::use_cases::shared::run_bounded;
use forum_domain::agent::emoji_for;
use forum_domain::agent::persona::role_for;
use forum_domain::{AgentSlot, NewAgent};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::{debug, info};

/// Errors that abort reconciliation
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Task join error: {0}")]
    Join(#[from] JoinError),
}

/// Slugs created in each identity space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub target_count: usize,
    pub runtime_created: Vec<String>,
    pub directory_created: Vec<String>,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.runtime_created.is_empty() && self.directory_created.is_empty()
    }
}

pub struct ReconcileAgentsUseCase<R: AgentRuntime + 'static, S: ForumStore + 'static> {
    runtime: Arc<R>,
    store: Arc<S>,
    roster: RosterParams,
    model: String,
    max_concurrency: usize,
}

impl<R: AgentRuntime + 'static, S: ForumStore + 'static> ReconcileAgentsUseCase<R, S> {
    pub fn new(runtime: Arc<R>, store: Arc<S>, config: &ForumConfig) -> Self {
        Self {
            runtime,
            store,
            roster: config.roster().clone(),
            model: config.generation().model.clone(),
            max_concurrency: config.round().permits(),
        }
    }

    /// Reconcile the configured number of slots.
    pub async fn execute(&self) -> Result<ReconcileReport, ReconcileError> {
        self.reconcile(self.roster.agent_count).await
    }

    /// Reconcile slots `1..=target_count`.
    pub async fn reconcile(&self, target_count: usize) -> Result<ReconcileReport, ReconcileError> {
        info!("Reconciling {} agent slots", target_count);
        let slots: Vec<AgentSlot> = AgentSlot::range(target_count).collect();

        let runtime_created = self.ensure_runtime_agents(&slots).await?;
        let directory_created = self.ensure_directory_rows(&slots).await?;

        info!(
            "Reconciled: {} created in runtime, {} created in directory",
            runtime_created.len(),
            directory_created.len()
        );
        Ok(ReconcileReport {
            target_count,
            runtime_created,
            directory_created,
        })
    }

    async fn ensure_runtime_agents(&self, slots: &[AgentSlot]) -> Result<Vec<String>, ReconcileError> {
        let existing: HashSet<String> = self
            .runtime
            .list_agents()
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();

        let jobs: Vec<(String, AgentSlot)> = slots
            .iter()
            .filter(|slot| !existing.contains(&slot.slug()))
            .map(|slot| (slot.slug(), *slot))
            .collect();
        if jobs.is_empty() {
            debug!("All {} runtime agents present", slots.len());
            return Ok(Vec::new());
        }

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        run_bounded(
            &semaphore,
            "bootstrap",
            jobs,
            |slot: AgentSlot| {
                let runtime = Arc::clone(&self.runtime);
                let spec = AgentSpec {
                    slug: slot.slug(),
                    workspace: self.roster.agents_dir.join(slot.slug()),
                    model: self.model.clone(),
                };
                async move {
                    let slug = spec.slug.clone();
                    runtime.create_agent(&spec).await?;
                    runtime
                        .set_identity(&AgentIdentity {
                            slug: slug.clone(),
                            name: slot.display_name(),
                            theme: role_for(&slug).to_string(),
                            emoji: emoji_for(&slug).to_string(),
                        })
                        .await?;
                    debug!("Created runtime agent {}", slug);
                    Ok::<_, ReconcileError>(slug)
                }
            },
            &|_: &str, _: bool| {},
        )
        .await
    }

    async fn ensure_directory_rows(&self, slots: &[AgentSlot]) -> Result<Vec<String>, ReconcileError> {
        let existing: HashSet<String> = self
            .store
            .list_agents()
            .await?
            .into_iter()
            .map(|a| a.slug)
            .collect();

        let rows: Vec<NewAgent> = slots
            .iter()
            .filter(|slot| !existing.contains(&slot.slug()))
            .map(AgentSlot::to_new_agent)
            .collect();
        if rows.is_empty() {
            debug!("All {} directory rows present", slots.len());
            return Ok(Vec::new());
        }

        self.store.upsert_agents(&rows).await?;
        Ok(rows.into_iter().map(|row| row.slug).collect())
    }
}
