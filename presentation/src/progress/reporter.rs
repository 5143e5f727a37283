//! Progress reporting for panel execution

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use panel_application::ProgressNotifier;
use panel_domain::Phase;
use std::sync::Mutex;

/// Reports progress during a panel run with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: &Phase) -> &'static str {
        match phase {
            Phase::Sanitize => "Phase 0: Sanitize",
            Phase::Broadcast => "Phase 1: Broadcast",
            Phase::Critique => "Phase 2: Critique",
            Phase::Synthesis => "Phase 3: Synthesis",
        }
    }

    fn phase_short_name(phase: &Phase) -> &'static str {
        match phase {
            Phase::Sanitize => "Phase 0",
            Phase::Broadcast => "Phase 1",
            Phase::Critique => "Phase 2",
            Phase::Synthesis => "Phase 3",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_display_name(phase).to_string());
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_agent_complete(&self, _phase: &Phase, agent: &str, success: bool) {
        let Ok(slot) = self.phase_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), agent)
            } else {
                format!("{} {}", "x".red(), agent)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        let bar = self.phase_bar.lock().ok().and_then(|mut slot| slot.take());
        if let Some(pb) = bar {
            let phase_name = Self::phase_short_name(phase);
            pb.finish_with_message(format!("{} complete!", phase_name.green()));
        }
    }
}

/// Simple text-based progress (no progress bars)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let phase_name = ProgressReporter::phase_display_name(phase);
        println!(
            "{} {} ({} tasks)",
            "->".cyan(),
            phase_name.bold(),
            total_tasks
        );
    }

    fn on_agent_complete(&self, _phase: &Phase, agent: &str, success: bool) {
        if success {
            println!("  {} {}", "v".green(), agent);
        } else {
            println!("  {} {} (failed)", "x".red(), agent);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_is_cleared_after_phase() {
        let reporter = ProgressReporter::new();
        reporter.on_phase_start(&Phase::Broadcast, 2);
        reporter.on_agent_complete(&Phase::Broadcast, "Claude", true);
        reporter.on_agent_complete(&Phase::Broadcast, "Grok", false);
        reporter.on_phase_complete(&Phase::Broadcast);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_agent_complete_without_phase_is_ignored() {
        let reporter = ProgressReporter::new();
        reporter.on_agent_complete(&Phase::Critique, "Claude", true);
        reporter.on_phase_complete(&Phase::Critique);
    }
}
