//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No agents registered in the directory")]
    NoAgents,

    #[error("Invalid vote direction: {0}")]
    InvalidVoteDirection(i64),

    #[error("Invalid signature mode: {0}")]
    InvalidSignatureMode(String),

    #[error("Invalid agent slot: {0}")]
    InvalidSlot(usize),
}

/// Reasons an agent's output failed its structured-payload contract.
///
/// Never surfaced to the round scheduler: the gateway recovers from every
/// variant by synthesizing a fallback draft.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedOutput {
    #[error("no JSON object found in agent output")]
    NoObject,

    #[error("JSON object could not be decoded: {0}")]
    InvalidJson(String),

    #[error("required field `{0}` is missing or empty")]
    MissingField(&'static str),
}
