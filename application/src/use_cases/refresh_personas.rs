//! Refresh Personas use case
//!
//! Asks each active agent to restate its persona and stores the result as a
//! JSON record in the agent directory.

use crate::config::{ForumConfig, RosterParams};
use crate::ports::agent_runtime::{AgentRuntime, RuntimeError};
use crate::ports::forum_store::{ForumStore, StoreError};
use crate::use_cases::agent_gateway::AgentGateway;
use crate::use_cases::shared::run_bounded;
use forum_domain::{Agent, pick_active_agents};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum RefreshPersonasError {
    #[error("No agents in the directory. Run bootstrap first.")]
    NoAgents,

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Task join error: {0}")]
    Join(#[from] JoinError),
}

pub struct RefreshPersonasUseCase<R: AgentRuntime + 'static, S: ForumStore + 'static> {
    gateway: Arc<AgentGateway<R>>,
    store: Arc<S>,
    roster: RosterParams,
    max_concurrency: usize,
    seed: Option<u64>,
}

impl<R: AgentRuntime + 'static, S: ForumStore + 'static> RefreshPersonasUseCase<R, S> {
    pub fn new(gateway: Arc<AgentGateway<R>>, store: Arc<S>, config: &ForumConfig) -> Self {
        Self {
            gateway,
            store,
            roster: config.roster().clone(),
            max_concurrency: config.round().permits(),
            seed: config.round().seed,
        }
    }

    /// Returns the slugs whose persona was rewritten, in selection order.
    pub async fn execute(&self) -> Result<Vec<String>, RefreshPersonasError> {
        let agents = self.store.list_agents().await?;
        if agents.is_empty() {
            return Err(RefreshPersonasError::NoAgents);
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let active = pick_active_agents(&agents, self.roster.active_agents, &mut rng);
        info!("Refreshing personas of {} agents", active.len());

        let jobs = active.into_iter().map(|a| (a.slug.clone(), a)).collect();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let refreshed = run_bounded(
            &semaphore,
            "personas",
            jobs,
            |agent: Agent| {
                let gateway = Arc::clone(&self.gateway);
                let store = Arc::clone(&self.store);
                async move {
                    let record = gateway.generate_persona(&agent).await?;
                    store.update_persona(&agent.slug, &record).await?;
                    debug!("Stored persona for {}", agent.slug);
                    Ok::<_, RefreshPersonasError>(agent.slug)
                }
            },
            &|_: &str, _: bool| {},
        )
        .await?;

        info!("Refreshed {} personas", refreshed.len());
        Ok(refreshed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationParams;
    use crate::use_cases::testing::{FakeRuntime, FakeStore};
    use forum_domain::PersonaRecord;

    fn use_case(
        runtime: FakeRuntime,
        store: FakeStore,
        config: &ForumConfig,
    ) -> (RefreshPersonasUseCase<FakeRuntime, FakeStore>, Arc<FakeStore>) {
        let store = Arc::new(store);
        let gateway = Arc::new(AgentGateway::new(Arc::new(runtime), GenerationParams::default()));
        (RefreshPersonasUseCase::new(gateway, Arc::clone(&store), config), store)
    }

    #[tokio::test]
    async fn test_personas_stored_as_json() {
        let (use_case, store) = use_case(FakeRuntime::default(), FakeStore::with_agents(3), &ForumConfig::default());

        let refreshed = use_case.execute().await.unwrap();
        assert_eq!(refreshed.len(), 3);

        let updates = store.persona_updates();
        assert_eq!(updates.len(), 3);
        assert!(updates.iter().all(|(_, record)| record.role.as_deref() == Some("SRE")));

        for agent in store.agents() {
            let stored = agent.persona.unwrap();
            assert!(PersonaRecord::from_json(&stored).is_some());
        }
    }

    #[tokio::test]
    async fn test_only_active_agents_refreshed() {
        let config = ForumConfig::default().with_roster(RosterParams {
            active_agents: 2,
            ..RosterParams::default()
        });
        let (use_case, store) = use_case(FakeRuntime::default(), FakeStore::with_agents(5), &config);

        assert_eq!(use_case.execute().await.unwrap().len(), 2);
        assert_eq!(store.persona_updates().len(), 2);
    }

    #[tokio::test]
    async fn test_runtime_failure_stops_refresh() {
        let (use_case, _) = use_case(FakeRuntime::failing(), FakeStore::with_agents(2), &ForumConfig::default());
        assert!(matches!(
            use_case.execute().await,
            Err(RefreshPersonasError::Runtime(_))
        ));
    }
}
