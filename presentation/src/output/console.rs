//! Console output formatter for command results

use colored::Colorize;
use forum_application::{AgentCounts, ReconcileReport, RoundSummary, SeedSummary};
use serde::Serialize;

/// Formats command results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// `Round <id> complete. Threads: n, Replies: m, Votes: k`
    pub fn round_line(summary: &RoundSummary) -> String {
        format!(
            "Round {} complete. Threads: {}, Replies: {}, Votes: {}",
            summary.round_id, summary.threads, summary.replies, summary.votes
        )
    }

    pub fn format_round(summary: &RoundSummary) -> String {
        let mut output = String::new();
        if summary.cold_start {
            output.push_str(&format!("{}\n", "Cold start: the board had no threads".dimmed()));
        }
        output.push_str(&Self::round_line(summary).green().bold().to_string());
        output
    }

    pub fn format_seed(summary: &SeedSummary) -> String {
        format!(
            "{} ({}: {} threads, {} replies)",
            "Seed complete".green().bold(),
            summary.round_id,
            summary.threads,
            summary.replies
        )
    }

    pub fn format_agent_counts(counts: &AgentCounts) -> String {
        format!(
            "{} {}\n{} {}",
            "Directory agents:".cyan().bold(),
            counts.directory,
            "Runtime agents:".cyan().bold(),
            counts.runtime
        )
    }

    pub fn format_reconcile(report: &ReconcileReport) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{} {} slots\n",
            "Reconciled".cyan().bold(),
            report.target_count
        ));
        output.push_str(&format!(
            "  Runtime:   {} created{}\n",
            report.runtime_created.len(),
            Self::slug_list(&report.runtime_created)
        ));
        output.push_str(&format!(
            "  Directory: {} created{}\n",
            report.directory_created.len(),
            Self::slug_list(&report.directory_created)
        ));
        output.push_str(&"Bootstrap complete".green().bold().to_string());
        output
    }

    pub fn format_personas(refreshed: &[String]) -> String {
        format!(
            "{} {} personas{}",
            "Refreshed".green().bold(),
            refreshed.len(),
            Self::slug_list(refreshed)
        )
    }

    /// Format any result as pretty JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// ` (a, b, c)` for short lists, ` (a, b, ... +n more)` otherwise
    fn slug_list(slugs: &[String]) -> String {
        const SHOWN: usize = 5;
        if slugs.is_empty() {
            return String::new();
        }
        let head = slugs.iter().take(SHOWN).cloned().collect::<Vec<_>>().join(", ");
        if slugs.len() > SHOWN {
            format!(" ({}, ... +{} more)", head, slugs.len() - SHOWN)
        } else {
            format!(" ({})", head)
        }
    }
}
