//! Agent gateway
//!
//! Wraps [`AgentRuntime::invoke`] with the output contract of each kind of
//! generation. The agent is asked for exactly one JSON object; whatever it
//! actually returns, the gateway hands back a usable draft:
//!
//! | Outcome | Handling |
//! |---------|----------|
//! | Runtime error or timeout | propagated as [`RuntimeError`] (hard failure) |
//! | Output without a well-formed payload | fallback draft, logged (soft failure) |
//! | Well-formed payload | decoded draft |

use crate::config::GenerationParams;
use crate::ports::agent_runtime::{AgentRuntime, InvokeRequest, RuntimeError};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use forum_domain::agent::persona::record_for;
use forum_domain::payload::{canned, parse_persona};
use forum_domain::{
    Agent, MalformedOutput, PersonaRecord, Post, PromptTemplate, ReplyDraft, ThreadDraft,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Generation kinds, used in logs and transcript events.
const THREAD: &str = "thread";
const REPLY: &str = "reply";
const PERSONA: &str = "persona";

pub struct AgentGateway<R: AgentRuntime + 'static> {
    runtime: Arc<R>,
    params: GenerationParams,
    logger: Arc<dyn ConversationLogger>,
}

impl<R: AgentRuntime + 'static> AgentGateway<R> {
    pub fn new(runtime: Arc<R>, params: GenerationParams) -> Self {
        Self {
            runtime,
            params,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Persona used when prompting `agent`: the stored record, with any
    /// missing field taken from the slug's deterministic persona.
    pub fn persona_for(agent: &Agent) -> PersonaRecord {
        agent.persona_record().or(record_for(&agent.slug))
    }

    /// Write a new thread as `agent`.
    pub async fn generate_thread(
        &self,
        agent: &Agent,
        context: &str,
        cold_start: bool,
    ) -> Result<ThreadDraft, RuntimeError> {
        if self.params.simulate {
            return Ok(canned::thread_draft(&agent.display_name, &mut rand::thread_rng()));
        }

        let prompt = PromptTemplate::thread_prompt(
            agent,
            &Self::persona_for(agent),
            self.params.style,
            context,
            cold_start,
        );
        let output = self.invoke(agent, THREAD, prompt).await?;

        Ok(ThreadDraft::parse(&output).unwrap_or_else(|reason| {
            self.note_fallback(agent, THREAD, &reason);
            ThreadDraft::fallback(&output, &agent.display_name)
        }))
    }

    /// Write a reply to `parent` as `agent`.
    pub async fn generate_reply(
        &self,
        agent: &Agent,
        parent: &Post,
        context: &str,
    ) -> Result<ReplyDraft, RuntimeError> {
        if self.params.simulate {
            return Ok(canned::reply_draft(&mut rand::thread_rng()));
        }

        let prompt = PromptTemplate::reply_prompt(
            agent,
            &Self::persona_for(agent),
            self.params.style,
            parent,
            context,
        );
        let output = self.invoke(agent, REPLY, prompt).await?;

        Ok(ReplyDraft::parse(&output).unwrap_or_else(|reason| {
            self.note_fallback(agent, REPLY, &reason);
            ReplyDraft::fallback(&output)
        }))
    }

    /// Ask `agent` to describe its persona.
    ///
    /// Fallback: labeled fields found in the raw output, completed from the
    /// slug's deterministic persona.
    pub async fn generate_persona(&self, agent: &Agent) -> Result<PersonaRecord, RuntimeError> {
        if self.params.simulate {
            return Ok(record_for(&agent.slug));
        }

        let prompt = PromptTemplate::persona_prompt(agent, &agent.persona_record());
        let output = self.invoke(agent, PERSONA, prompt).await?;

        Ok(parse_persona(&output).unwrap_or_else(|reason| {
            self.note_fallback(agent, PERSONA, &reason);
            PersonaRecord::from_labeled_text(&output).or(record_for(&agent.slug))
        }))
    }

    async fn invoke(&self, agent: &Agent, kind: &'static str, prompt: String) -> Result<String, RuntimeError> {
        debug!("Invoking {} for {} ({} chars)", kind, agent.slug, prompt.len());
        self.logger.log(ConversationEvent::new(
            "agent_prompt",
            json!({ "agent": agent.slug, "kind": kind, "prompt": prompt }),
        ));

        let request = InvokeRequest {
            agent: agent.slug.clone(),
            session_id: agent.slug.clone(),
            message: prompt,
            timeout: self.params.timeout,
            thinking: self.params.thinking.clone(),
        };
        let output = self.runtime.invoke(request).await?;

        self.logger.log(ConversationEvent::new(
            "agent_output",
            json!({ "agent": agent.slug, "kind": kind, "output": output }),
        ));
        Ok(output)
    }

    fn note_fallback(&self, agent: &Agent, kind: &'static str, reason: &MalformedOutput) {
        warn!("{} output from {} unusable ({}), using fallback", kind, agent.slug, reason);
        self.logger.log(ConversationEvent::new(
            "payload_fallback",
            json!({ "agent": agent.slug, "kind": kind, "reason": reason.to_string() }),
        ));
    }
}
