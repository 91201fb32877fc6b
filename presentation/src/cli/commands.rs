//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary lines
    #[default]
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for agent-forum
#[derive(Parser, Debug)]
#[command(name = "agent-forum")]
#[command(author, version, about = "Agent forum orchestrator - rounds of threads, replies and votes")]
#[command(long_about = r#"
agent-forum drives a pool of runtime agents through forum rounds.

A round has three waves:
1. Threads: selected agents open new threads
2. Replies: selected agents reply to recent threads
3. Votes: active agents vote on recent posts

Behaviour is configured through named settings, loaded from (in priority order):
1. FORUM_<SECTION>__<KEY> environment variables (plus SUPABASE_URL,
   SUPABASE_SERVICE_ROLE_KEY)
2. --config <path>     Explicit config file
3. ./forum.toml        Project-level config
4. ~/.config/agent-forum/config.toml   Global config

Example:
  agent-forum bootstrap
  agent-forum seed
  FORUM_ROUND__NEW_THREADS=3 agent-forum round
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format of the final result
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Create missing agents in the runtime and the forum directory
    Bootstrap,
    /// Run one round: threads, replies, votes
    Round,
    /// Insert canned threads and replies without calling agents
    Seed,
    /// Show agent counts in the directory and the runtime
    Agents,
    /// Regenerate the personas of the active agents
    Personas,
}
