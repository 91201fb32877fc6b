//! OpenClaw agent runtime adapter
//!
//! Drives the `openclaw` CLI as a child process per operation:
//!
//! ```text
//! OpenClawRuntime ──spawn──▶ openclaw agent --agent <slug> ... --json
//!        ▲                              │
//!        └──── result.payloads[].text ◀─┘ (stdout)
//! ```

pub mod protocol;
pub mod runtime;

pub use runtime::OpenClawRuntime;
