//! Console output formatter for panel results

use colored::Colorize;
use panel_application::PanelStatus;
use panel_domain::{AgentResponse, OrchestrationResult, OutputFormat, SynthesisSource};

/// Formats panel results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render `result` in the requested format
    pub fn render(format: OutputFormat, query: &str, result: &OrchestrationResult) -> String {
        match format {
            OutputFormat::Full => Self::format(query, result),
            OutputFormat::Synthesis => Self::format_synthesis_only(query, result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format the complete panel result
    pub fn format(query: &str, result: &OrchestrationResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Agent Panel Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Question:".cyan().bold(), query));

        let names: Vec<&str> = result.agents.iter().map(|a| a.name.as_str()).collect();
        output.push_str(&format!(
            "{} {}\n\n",
            "Agents:".cyan().bold(),
            names.join(", ")
        ));

        output.push_str(&Self::section_header("Agent Responses"));
        for response in &result.agents {
            output.push_str(&Self::agent_block(response));
        }

        let failed: Vec<&str> = result.failed_agents().map(|a| a.name.as_str()).collect();
        if !failed.is_empty() {
            output.push_str(&format!(
                "\n{} {}\n",
                "Failed agents:".red().bold(),
                failed.join(", ")
            ));
        }

        output.push_str(&Self::section_header(Self::synthesis_title(result.synthesis)));
        output.push_str(&format!("\n{}\n", result.final_answer));
        output.push_str(&Self::result_details(result));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &OrchestrationResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the combined answer only (concise output)
    pub fn format_synthesis_only(query: &str, result: &OrchestrationResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Agent Panel Conclusion ===".cyan().bold()
        ));

        output.push_str(&format!("{} {}\n\n", "Q:".bold(), query));

        let consulted = result.valid_agents().count();
        output.push_str(&format!(
            "{} {}/{}\n\n",
            "Agents answered:".dimmed(),
            consulted,
            result.agents.len()
        ));

        output.push_str(&result.final_answer);
        output.push('\n');
        output.push_str(&Self::result_details(result));

        output
    }

    /// Format a panel status snapshot
    pub fn format_status(status: &PanelStatus) -> String {
        let mut output = String::new();
        output.push_str(&format!("{} {}\n", "Panel:".cyan().bold(), status.name));
        if !status.description.is_empty() {
            output.push_str(&format!("{}\n", status.description.dimmed()));
        }
        output.push_str(&format!("{} {}\n", "Mode:".cyan().bold(), status.mode));
        if !status.output_requirements.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Output:".cyan().bold(),
                status.output_requirements
            ));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Agents:".cyan().bold(),
            status.agents.join(", ")
        ));
        let synthesis = if status.synthesis_available {
            "available".green()
        } else {
            "unavailable (heuristic fallback)".yellow()
        };
        output.push_str(&format!("{} {}\n", "Synthesis:".cyan().bold(), synthesis));
        output.push_str(&format!(
            "{} answer {}s, critique {}s, total {}s\n",
            "Timeouts:".cyan().bold(),
            status.timeouts.initial_answer.as_secs(),
            status.timeouts.discussion_answer.as_secs(),
            status.timeouts.total_orchestration.as_secs()
        ));
        output
    }

    fn agent_block(response: &AgentResponse) -> String {
        let title = format!("── {} ──", response.name);
        if !response.is_valid() {
            return format!(
                "\n{}\n{}\n",
                title.red().bold(),
                Self::indent(&format!("{} ({})", response.answer, response.rationale), "  ")
            );
        }

        let mut block = format!(
            "\n{} {}\n{}\n",
            title.yellow().bold(),
            format!("confidence {:.2}", response.confidence).dimmed(),
            response.answer
        );
        block.push_str(&format!("{} {}\n", "Rationale:".dimmed(), response.rationale));
        if !response.sources.is_empty() {
            block.push_str(&format!(
                "{} {}\n",
                "Sources:".dimmed(),
                response.sources.join(", ")
            ));
        }
        block
    }

    fn result_details(result: &OrchestrationResult) -> String {
        let confidence = format!("{:.2}", result.combined_confidence);
        let confidence = if result.combined_confidence >= 0.7 {
            confidence.green()
        } else if result.combined_confidence > 0.0 {
            confidence.yellow()
        } else {
            confidence.red()
        };
        format!(
            "\n{} {}\n{} {}\n{} {}\n",
            "Confidence:".cyan().bold(),
            confidence,
            "Disagreement:".cyan().bold(),
            result.disagreement,
            "Next steps:".cyan().bold(),
            result.recommended_next_steps
        )
    }

    fn synthesis_title(source: SynthesisSource) -> &'static str {
        match source {
            SynthesisSource::Synthesized => "Combined Answer",
            SynthesisSource::Fallback => "Combined Answer (fallback)",
            SynthesisSource::NoValidResponses => "No Answer",
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
