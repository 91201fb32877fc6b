//! Progress notification port
//!
//! Defines the interface for reporting progress while a round runs.

use forum_domain::Wave;

/// Callback for progress updates during a round
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain log lines, etc.)
pub trait RoundProgressNotifier: Send + Sync {
    /// Called when a wave starts
    fn on_wave_start(&self, wave: Wave, total_tasks: usize);

    /// Called when a task completes within a wave
    fn on_task_complete(&self, wave: Wave, agent_slug: &str, success: bool);

    /// Called when a wave completes
    fn on_wave_complete(&self, wave: Wave);

    /// Called when a wave is skipped entirely
    fn on_wave_skipped(&self, _wave: Wave, _reason: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl RoundProgressNotifier for NoProgress {
    fn on_wave_start(&self, _wave: Wave, _total_tasks: usize) {}
    fn on_task_complete(&self, _wave: Wave, _agent_slug: &str, _success: bool) {}
    fn on_wave_complete(&self, _wave: Wave) {}
}
