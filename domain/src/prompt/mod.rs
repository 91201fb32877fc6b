//! Prompt domain
//!
//! Templates for the thread, reply and persona generation prompts.

mod template;

pub use template::{ASK_ABOUT_FORUM_LINE, COLD_START_LINE, PromptTemplate, StyleFlags};
