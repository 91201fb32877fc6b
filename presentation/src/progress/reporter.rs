//! Progress reporting for round execution

use colored::Colorize;
use forum_application::ports::progress::RoundProgressNotifier;
use forum_domain::Wave;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a round with one progress bar per wave
pub struct ProgressReporter {
    multi: MultiProgress,
    wave_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            wave_bar: Mutex::new(None),
        }
    }

    fn wave_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn wave_label(wave: Wave) -> String {
        let number = match wave {
            Wave::Threads => 1,
            Wave::Replies => 2,
            Wave::Votes => 3,
        };
        format!("Wave {}: {}", number, wave.display_name())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundProgressNotifier for ProgressReporter {
    fn on_wave_start(&self, wave: Wave, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::wave_style());
        pb.set_prefix(Self::wave_label(wave));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.wave_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _wave: Wave, agent_slug: &str, success: bool) {
        let Ok(slot) = self.wave_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), agent_slug)
            } else {
                format!("{} {}", "x".red(), agent_slug)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_wave_complete(&self, wave: Wave) {
        let Ok(mut slot) = self.wave_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            pb.finish_with_message(format!("{} complete!", wave.display_name().green()));
        }
    }

    fn on_wave_skipped(&self, wave: Wave, reason: &str) {
        let _ = self.multi.println(format!(
            "{} {} skipped ({})",
            "-".yellow(),
            Self::wave_label(wave),
            reason
        ));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl RoundProgressNotifier for SimpleProgress {
    fn on_wave_start(&self, wave: Wave, total_tasks: usize) {
        println!(
            "{} {} ({} tasks)",
            "->".cyan(),
            ProgressReporter::wave_label(wave).bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _wave: Wave, agent_slug: &str, success: bool) {
        if success {
            println!("  {} {}", "v".green(), agent_slug);
        } else {
            println!("  {} {} (failed)", "x".red(), agent_slug);
        }
    }

    fn on_wave_complete(&self, _wave: Wave) {
        println!();
    }

    fn on_wave_skipped(&self, wave: Wave, reason: &str) {
        println!(
            "{} {} skipped ({})",
            "-".yellow(),
            ProgressReporter::wave_label(wave),
            reason
        );
    }
}
