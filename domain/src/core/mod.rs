//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`error::MalformedOutput`]: agent output that broke its payload contract
//! - [`hash::stable_hash`]: the hash behind personas and vote decisions

pub mod error;
pub mod hash;
pub mod string;
