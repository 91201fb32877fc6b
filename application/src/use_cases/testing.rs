//! In-memory fakes of the ports, shared by the use case tests.

use crate::ports::agent_runtime::{
    AgentIdentity, AgentRuntime, AgentSpec, InvokeRequest, RuntimeAgent, RuntimeError,
};
use crate::ports::forum_store::{ForumStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use forum_domain::{
    Agent, AgentId, AgentSlot, NewAgent, NewPost, NewVote, PersonaRecord, Post, PostId, RoundId,
};
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Responder = Box<dyn Fn(&InvokeRequest) -> Result<String, RuntimeError> + Send + Sync>;

/// Agent runtime fake: answers from a responder closure and counts how many
/// invocations overlap.
pub(crate) struct FakeRuntime {
    responder: Responder,
    delay: Duration,
    agents: Mutex<Vec<RuntimeAgent>>,
    created: Mutex<Vec<AgentSpec>>,
    identities: Mutex<Vec<AgentIdentity>>,
    requests: Mutex<Vec<InvokeRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl Default for FakeRuntime {
    fn default() -> Self {
        Self::with_responder(|request| Ok(well_formed_answer(request)))
    }
}

impl FakeRuntime {
    pub(crate) fn with_responder(
        responder: impl Fn(&InvokeRequest) -> Result<String, RuntimeError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            delay: Duration::ZERO,
            agents: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            identities: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Always answers with `text`.
    pub(crate) fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::with_responder(move |_| Ok(text.clone()))
    }

    /// Every invocation fails.
    pub(crate) fn failing() -> Self {
        Self::with_responder(|request| {
            Err(RuntimeError::InvocationFailed {
                agent: request.agent.clone(),
                message: "exit status 1".to_string(),
            })
        })
    }

    /// Each invocation takes `delay`, so overlapping calls can be observed.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn with_agents(self, slugs: &[&str]) -> Self {
        *self.agents.lock().unwrap() = slugs
            .iter()
            .map(|slug| RuntimeAgent {
                id: slug.to_string(),
                name: None,
            })
            .collect();
        self
    }

    pub(crate) fn requests(&self) -> Vec<InvokeRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn created(&self) -> Vec<AgentSpec> {
        self.created.lock().unwrap().clone()
    }

    pub(crate) fn identities(&self) -> Vec<AgentIdentity> {
        self.identities.lock().unwrap().clone()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

/// JSON answer matching whichever payload the prompt asks for.
fn well_formed_answer(request: &InvokeRequest) -> String {
    if request.message.contains(r#""title""#) {
        format!(
            r#"{{"title": "Notes from {}", "body": "Shipped a small fix today."}}"#,
            request.agent
        )
    } else if request.message.contains(r#""signature_mode""#) {
        r#"{"role": "SRE", "tone": "dry", "habit": "counts pages", "signature": "-- ops",
            "signature_mode": "suffix", "topic": "alerting"}"#
            .to_string()
    } else {
        format!(r#"{{"body": "Agreed, says {}."}}"#, request.agent)
    }
}

#[async_trait]
impl AgentRuntime for FakeRuntime {
    async fn invoke(&self, request: InvokeRequest) -> Result<String, RuntimeError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        (self.responder)(&request)
    }

    async fn list_agents(&self) -> Result<Vec<RuntimeAgent>, RuntimeError> {
        Ok(self.agents.lock().unwrap().clone())
    }

    async fn create_agent(&self, spec: &AgentSpec) -> Result<(), RuntimeError> {
        self.created.lock().unwrap().push(spec.clone());
        self.agents.lock().unwrap().push(RuntimeAgent {
            id: spec.slug.clone(),
            name: None,
        });
        Ok(())
    }

    async fn set_identity(&self, identity: &AgentIdentity) -> Result<(), RuntimeError> {
        self.identities.lock().unwrap().push(identity.clone());
        Ok(())
    }
}

#[derive(Default)]
struct StoreState {
    agents: Vec<Agent>,
    posts: Vec<Post>,
    votes: Vec<NewVote>,
    next_id: i64,
    persona_updates: Vec<(String, PersonaRecord)>,
}

/// Forum store fake with the relational constraints that matter here:
/// unique slugs, parents must exist, one vote per (post, agent).
#[derive(Default)]
pub(crate) struct FakeStore {
    state: Mutex<StoreState>,
    fail_post_inserts_after: Option<usize>,
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

impl FakeStore {
    /// Store already holding agents for slots `1..=count`.
    pub(crate) fn with_agents(count: usize) -> Self {
        let store = Self::default();
        {
            let mut state = store.state.lock().unwrap();
            state.agents = AgentSlot::range(count).map(|slot| agent(slot.index())).collect();
        }
        store
    }

    /// Pre-existing threads, created before anything this test inserts.
    pub(crate) fn with_threads(self, count: usize) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let author = state
                .agents
                .first()
                .map(|a| a.id.clone())
                .unwrap_or_else(|| AgentId::new("seed-author"));
            for _ in 0..count {
                state.next_id += 1;
                let id = state.next_id;
                let post = NewPost::thread(author.clone(), format!("Old {}", id), "old body", RoundId::new("old"))
                    .into_post(PostId::new(id.to_string()), epoch() + ChronoDuration::seconds(id));
                state.posts.push(post);
            }
        }
        self
    }

    /// The (n+1)-th post insert fails.
    pub(crate) fn failing_after(mut self, inserts: usize) -> Self {
        self.fail_post_inserts_after = Some(inserts);
        self
    }

    pub(crate) fn agents(&self) -> Vec<Agent> {
        self.state.lock().unwrap().agents.clone()
    }

    pub(crate) fn posts(&self) -> Vec<Post> {
        self.state.lock().unwrap().posts.clone()
    }

    pub(crate) fn votes(&self) -> Vec<NewVote> {
        self.state.lock().unwrap().votes.clone()
    }

    pub(crate) fn persona_updates(&self) -> Vec<(String, PersonaRecord)> {
        self.state.lock().unwrap().persona_updates.clone()
    }

    fn recent(&self, limit: usize, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let state = self.state.lock().unwrap();
        let mut posts: Vec<Post> = state.posts.iter().filter(|p| keep(p)).cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit);
        posts
    }
}

#[async_trait]
impl ForumStore for FakeStore {
    async fn list_agents(&self) -> Result<Vec<Agent>, StoreError> {
        Ok(self.agents())
    }

    async fn upsert_agents(&self, agents: &[NewAgent]) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        for row in agents {
            match state.agents.iter().position(|a| a.slug == row.slug) {
                Some(index) => {
                    let agent = &mut state.agents[index];
                    agent.display_name = row.display_name.clone();
                    agent.persona = row.persona.clone();
                    agent.avatar_url = row.avatar_url.clone();
                }
                None => state.agents.push(Agent {
                    id: AgentId::new(format!("id-{}", row.slug)),
                    slug: row.slug.clone(),
                    display_name: row.display_name.clone(),
                    anon_index: row.anon_index,
                    persona: row.persona.clone(),
                    avatar_url: row.avatar_url.clone(),
                }),
            }
        }
        Ok(())
    }

    async fn update_persona(&self, slug: &str, persona: &PersonaRecord) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let agent = state
            .agents
            .iter_mut()
            .find(|a| a.slug == slug)
            .ok_or_else(|| StoreError::Rejected {
                operation: "update persona".to_string(),
                status: 404,
                message: slug.to_string(),
            })?;
        agent.persona = Some(persona.to_json());
        state.persona_updates.push((slug.to_string(), persona.clone()));
        Ok(())
    }

    async fn recent_threads(&self, limit: usize) -> Result<Vec<Post>, StoreError> {
        Ok(self.recent(limit, Post::is_thread))
    }

    async fn recent_replies(&self, limit: usize) -> Result<Vec<Post>, StoreError> {
        Ok(self.recent(limit, |p| !p.is_thread()))
    }

    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>, StoreError> {
        Ok(self.recent(limit, |_| true))
    }

    async fn insert_post(&self, post: &NewPost) -> Result<Post, StoreError> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().unwrap();

        let inserted = state.posts.len();
        if let Some(limit) = self.fail_post_inserts_after
            && inserted >= limit
        {
            return Err(StoreError::RequestFailed("connection reset".to_string()));
        }
        if let Some(parent_id) = post.parent_id()
            && !state.posts.iter().any(|p| &p.id == parent_id)
        {
            return Err(StoreError::Rejected {
                operation: "insert post".to_string(),
                status: 409,
                message: format!("parent {} does not exist", parent_id),
            });
        }

        state.next_id += 1;
        let id = state.next_id;
        let row = post
            .clone()
            .into_post(PostId::new(id.to_string()), epoch() + ChronoDuration::seconds(id));
        state.posts.push(row.clone());
        Ok(row)
    }

    async fn insert_votes(&self, votes: &[NewVote]) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let mut seen: HashSet<(PostId, AgentId)> = state
            .votes
            .iter()
            .map(|v| (v.post_id.clone(), v.agent_id.clone()))
            .collect();
        for vote in votes {
            if seen.insert((vote.post_id.clone(), vote.agent_id.clone())) {
                state.votes.push(vote.clone());
            }
        }
        Ok(())
    }
}

/// Directory agent for slot `index`, as the store would return it.
pub(crate) fn agent(index: usize) -> Agent {
    let slot = AgentSlot::new(index).unwrap();
    let row = slot.to_new_agent();
    Agent {
        id: AgentId::new(format!("id-{}", row.slug)),
        slug: row.slug,
        display_name: row.display_name,
        anon_index: row.anon_index,
        persona: row.persona,
        avatar_url: row.avatar_url,
    }
}

/// A committed thread by `author`.
pub(crate) fn thread_post(id: &str, author: &Agent, seconds: i64) -> Post {
    NewPost::thread(author.id.clone(), "Thread", "Body", RoundId::new("r"))
        .into_post(PostId::new(id), epoch() + ChronoDuration::seconds(seconds))
}
