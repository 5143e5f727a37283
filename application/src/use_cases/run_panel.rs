//! Run Panel use case
//!
//! Drives one query through sanitize → broadcast → critique → synthesize.
//!
//! Every agent call runs in its own task under the phase deadline. A call
//! that errors, panics or misses the deadline is replaced by a sentinel in
//! its roster slot, so the result always has one response per roster member
//! in roster order. No phase failure is fatal to the run.

use crate::agents::{Roster, RosterBuilder};
use crate::config::PanelSettings;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::sanitizer::Sanitizer;
use crate::use_cases::synthesize::Combiner;
use panel_domain::orchestration::value_objects::CRITIQUE_FAILED;
use panel_domain::{
    AgentMode, AgentResponse, ChatTurn, DomainError, OrchestrationResult, PanelQuery, Phase,
    PhaseTimeouts,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::task::{Id, JoinSet};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Errors that can occur during a panel run
///
/// Provider failures never show up here; they become sentinel responses or
/// a fallback synthesis.
#[derive(Error, Debug)]
pub enum RunPanelError {
    #[error("No agents configured")]
    EmptyRoster,

    #[error("Roster lock poisoned")]
    RosterUnavailable,

    #[error("Invalid roster: {0}")]
    Roster(#[from] DomainError),
}

/// Input for the RunPanel use case
#[derive(Debug, Clone)]
pub struct RunPanelInput {
    /// The query as typed, before sanitization
    pub query: String,
    /// Prior conversation turns, sanitized like the query before any agent
    /// sees them
    pub history: Vec<ChatTurn>,
}

impl RunPanelInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }
}

/// Snapshot of the orchestrator for display
#[derive(Debug, Clone, PartialEq)]
pub struct PanelStatus {
    pub name: String,
    pub description: String,
    pub output_requirements: String,
    pub mode: AgentMode,
    pub agents: Vec<String>,
    pub synthesis_available: bool,
    pub timeouts: PhaseTimeouts,
}

/// The panel orchestrator
///
/// Safe to share across tasks: `process` takes `&self` and only reads the
/// roster, which a mode switch replaces atomically.
pub struct PanelOrchestrator {
    settings: PanelSettings,
    roster: RwLock<Arc<Roster>>,
    combiner: Combiner,
    sanitizer: Arc<dyn Sanitizer>,
    logger: Arc<dyn ConversationLogger>,
}

impl PanelOrchestrator {
    pub fn new(
        settings: PanelSettings,
        roster: Roster,
        combiner: Combiner,
        sanitizer: Arc<dyn Sanitizer>,
    ) -> Self {
        Self {
            settings,
            roster: RwLock::new(Arc::new(roster)),
            combiner,
            sanitizer,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn settings(&self) -> &PanelSettings {
        &self.settings
    }

    /// Run a single query with no history and no progress reporting
    pub async fn process(&self, query: &str) -> Result<OrchestrationResult, RunPanelError> {
        self.execute(RunPanelInput::new(query)).await
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunPanelInput,
    ) -> Result<OrchestrationResult, RunPanelError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// An empty roster is a configuration defect and returns
    /// [`RunPanelError::EmptyRoster`] instead of an "all agents failed" result.
    pub async fn execute_with_progress(
        &self,
        input: RunPanelInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<OrchestrationResult, RunPanelError> {
        let started = Instant::now();
        let roster = self.roster_snapshot()?;
        if roster.is_empty() {
            return Err(RunPanelError::EmptyRoster);
        }

        info!(
            "Starting panel '{}' with {} {} agents",
            self.settings.name,
            roster.len(),
            roster.mode()
        );

        let query = self.sanitize(input.query, progress);
        let history: Arc<[ChatTurn]> = input
            .history
            .into_iter()
            .map(|turn| ChatTurn {
                content: self.sanitizer.sanitize(&turn.content),
                ..turn
            })
            .collect();

        let responses = self.broadcast(&roster, &query, history, progress).await;

        let valid: Vec<AgentResponse> = responses.iter().filter(|r| r.is_valid()).cloned().collect();
        let critiques = if valid.is_empty() {
            debug!("Skipping critique phase: no valid responses");
            Vec::new()
        } else {
            self.critique(&roster, valid, progress).await
        };

        info!("Phase: {}", Phase::Synthesis.display_name());
        progress.on_phase_start(&Phase::Synthesis, 1);
        let budget = self.settings.timeouts.synthesis_budget(started.elapsed());
        let result = self
            .combiner
            .synthesize_within(Some(budget), &query, &responses, &critiques)
            .await;
        progress.on_agent_complete(&Phase::Synthesis, "combiner", !result.is_fallback());
        progress.on_phase_complete(&Phase::Synthesis);

        let result = result.with_agents(responses);
        self.logger.log(ConversationEvent::panel_result(&result));
        info!(
            "Panel finished in {:?} ({:?}, confidence {:.2})",
            started.elapsed(),
            result.synthesis,
            result.combined_confidence
        );
        Ok(result)
    }

    fn sanitize(&self, raw: String, progress: &dyn ProgressNotifier) -> PanelQuery {
        progress.on_phase_start(&Phase::Sanitize, 1);
        let sanitized = self.sanitizer.sanitize(&raw);
        let query = PanelQuery::new(raw, sanitized);
        if query.was_redacted() {
            info!("Sensitive content redacted from query");
        }
        self.logger.log(ConversationEvent::query_sanitized(
            query.sanitized(),
            query.was_redacted(),
        ));
        progress.on_phase_complete(&Phase::Sanitize);
        query
    }

    /// Broadcast phase: every agent answers the sanitized query in parallel
    async fn broadcast(
        &self,
        roster: &Roster,
        query: &PanelQuery,
        history: Arc<[ChatTurn]>,
        progress: &dyn ProgressNotifier,
    ) -> Vec<AgentResponse> {
        info!("Phase: {}", Phase::Broadcast.display_name());
        progress.on_phase_start(&Phase::Broadcast, roster.len());

        let deadline = Instant::now() + self.settings.timeouts.initial_answer;
        let text: Arc<str> = query.sanitized().into();
        let mut join_set = JoinSet::new();
        let mut task_slots = HashMap::with_capacity(roster.len());

        for (index, agent) in roster.agents().iter().enumerate() {
            let agent = Arc::clone(agent);
            let text = Arc::clone(&text);
            let history = Arc::clone(&history);

            let handle = join_set.spawn(async move {
                tokio::time::timeout_at(deadline, agent.query(&text, &history)).await
            });
            task_slots.insert(handle.id(), index);
        }

        let mut slots: Vec<Option<AgentResponse>> = vec![None; roster.len()];

        while let Some(joined) = join_set.join_next_with_id().await {
            let Some((index, outcome)) = settled_slot(&task_slots, joined) else {
                continue;
            };
            let name = roster.agents()[index].name();
            match outcome {
                Some(Ok(response)) => {
                    if response.is_valid() {
                        debug!("Agent {} answered ({:.2})", name, response.confidence);
                    } else {
                        warn!("Agent {} returned a sentinel: {}", name, response.answer);
                    }
                    progress.on_agent_complete(&Phase::Broadcast, name, response.is_valid());
                    slots[index] = Some(response);
                }
                Some(Err(_)) => {
                    warn!("Agent {} missed the broadcast deadline", name);
                    progress.on_agent_complete(&Phase::Broadcast, name, false);
                }
                None => {
                    warn!("Agent {} crashed during broadcast", name);
                    progress.on_agent_complete(&Phase::Broadcast, name, false);
                }
            }
        }

        let responses: Vec<AgentResponse> = slots
            .into_iter()
            .zip(roster.agents())
            .map(|(slot, agent)| slot.unwrap_or_else(|| AgentResponse::timeout_or_error(agent.name())))
            .collect();

        for response in &responses {
            self.logger
                .log(ConversationEvent::agent_response(&Phase::Broadcast, response));
        }

        progress.on_phase_complete(&Phase::Broadcast);
        responses
    }

    /// Critique phase: every agent comments on all valid responses
    async fn critique(
        &self,
        roster: &Roster,
        valid: Vec<AgentResponse>,
        progress: &dyn ProgressNotifier,
    ) -> Vec<String> {
        info!("Phase: {}", Phase::Critique.display_name());
        progress.on_phase_start(&Phase::Critique, roster.len());

        let deadline = Instant::now() + self.settings.timeouts.discussion_answer;
        let peers: Arc<[AgentResponse]> = valid.into();
        let mut join_set = JoinSet::new();
        let mut task_slots = HashMap::with_capacity(roster.len());

        for (index, agent) in roster.agents().iter().enumerate() {
            let agent = Arc::clone(agent);
            let peers = Arc::clone(&peers);

            let handle = join_set.spawn(async move {
                tokio::time::timeout_at(deadline, agent.critique(&peers)).await
            });
            task_slots.insert(handle.id(), index);
        }

        let mut slots: Vec<Option<String>> = vec![None; roster.len()];

        while let Some(joined) = join_set.join_next_with_id().await {
            let Some((index, outcome)) = settled_slot(&task_slots, joined) else {
                continue;
            };
            let name = roster.agents()[index].name();
            match outcome {
                Some(Ok(text)) => {
                    let success = text != CRITIQUE_FAILED;
                    progress.on_agent_complete(&Phase::Critique, name, success);
                    self.logger.log(ConversationEvent::critique(name, &text));
                    slots[index] = Some(text);
                }
                Some(Err(_)) => {
                    warn!("Critique by {} missed the discussion deadline", name);
                    progress.on_agent_complete(&Phase::Critique, name, false);
                    self.logger.log(ConversationEvent::critique(name, CRITIQUE_FAILED));
                }
                None => {
                    warn!("Critique by {} crashed", name);
                    progress.on_agent_complete(&Phase::Critique, name, false);
                    self.logger.log(ConversationEvent::critique(name, CRITIQUE_FAILED));
                }
            }
        }

        progress.on_phase_complete(&Phase::Critique);
        slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| CRITIQUE_FAILED.to_string()))
            .collect()
    }

    // ==================== Roster ====================

    /// The roster current at call time
    pub fn roster_snapshot(&self) -> Result<Arc<Roster>, RunPanelError> {
        self.roster
            .read()
            .map(|roster| Arc::clone(&roster))
            .map_err(|_| RunPanelError::RosterUnavailable)
    }

    /// Swap in a new roster; runs already in flight keep the old one.
    pub fn replace_roster(&self, roster: Roster) -> Result<(), RunPanelError> {
        let mut current = self
            .roster
            .write()
            .map_err(|_| RunPanelError::RosterUnavailable)?;
        *current = Arc::new(roster);
        Ok(())
    }

    /// Rebuild the configured roster in `mode` and swap it in.
    pub fn switch_mode(
        &self,
        mode: AgentMode,
        builder: &RosterBuilder,
    ) -> Result<(), RunPanelError> {
        let roster = builder.build(&self.settings.agents, mode)?;
        self.replace_roster(roster)?;
        info!("Switched panel to {} mode", mode);
        Ok(())
    }

    pub fn status(&self) -> Result<PanelStatus, RunPanelError> {
        let roster = self.roster_snapshot()?;
        Ok(PanelStatus {
            name: self.settings.name.clone(),
            description: self.settings.description.clone(),
            output_requirements: self.settings.output_requirements.clone(),
            mode: roster.mode(),
            agents: roster.names(),
            synthesis_available: self.combiner.has_provider(),
            timeouts: self.settings.timeouts,
        })
    }
}

/// Map a joined phase task back to its roster slot.
///
/// The outcome is `None` when the task panicked or was cancelled.
fn settled_slot<T>(
    task_slots: &HashMap<Id, usize>,
    joined: Result<(Id, T), tokio::task::JoinError>,
) -> Option<(usize, Option<T>)> {
    let (id, outcome) = match joined {
        Ok((id, outcome)) => (id, Some(outcome)),
        Err(e) => {
            debug!("Phase task failed: {}", e);
            (e.id(), None)
        }
    };
    task_slots.get(&id).map(|&index| (index, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::SimulatedLatency;
    use crate::ports::agent::Agent;
    use crate::ports::provider_directory::NoProviders;
    use crate::ports::sanitizer::PassthroughSanitizer;
    use async_trait::async_trait;
    use panel_domain::{AgentProfile, SynthesisSource, Vendor};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Clone)]
    enum Behavior {
        Answer(&'static str, f64),
        Hang,
        Panic,
        Delayed(Duration, &'static str, f64),
    }

    struct ScriptedAgent {
        profile: AgentProfile,
        behavior: Behavior,
        seen_queries: Mutex<Vec<String>>,
        seen_peers: Mutex<Vec<usize>>,
    }

    impl ScriptedAgent {
        fn new(name: &str, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                profile: AgentProfile::new(name, Vendor::Custom("test".into()), "persona"),
                behavior,
                seen_queries: Mutex::new(Vec::new()),
                seen_peers: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Agent for ScriptedAgent {
        fn profile(&self) -> &AgentProfile {
            &self.profile
        }

        async fn query(&self, text: &str, _history: &[ChatTurn]) -> AgentResponse {
            self.seen_queries.lock().unwrap().push(text.to_string());
            match self.behavior.clone() {
                Behavior::Answer(answer, confidence) => {
                    AgentResponse::new(self.name(), answer, "scripted", confidence)
                }
                Behavior::Hang => std::future::pending().await,
                Behavior::Panic => panic!("agent crashed"),
                Behavior::Delayed(delay, answer, confidence) => {
                    tokio::time::sleep(delay).await;
                    AgentResponse::new(self.name(), answer, "scripted", confidence)
                }
            }
        }

        async fn critique(&self, peers: &[AgentResponse]) -> String {
            self.seen_peers.lock().unwrap().push(peers.len());
            match self.behavior {
                Behavior::Hang => std::future::pending().await,
                Behavior::Panic => panic!("critique crashed"),
                _ => format!("{} approves", self.name()),
            }
        }
    }

    struct UppercaseSanitizer;

    impl Sanitizer for UppercaseSanitizer {
        fn sanitize(&self, text: &str) -> String {
            text.to_uppercase()
        }
    }

    #[derive(Default)]
    struct CountingSanitizer {
        calls: Mutex<Vec<String>>,
    }

    impl Sanitizer for CountingSanitizer {
        fn sanitize(&self, text: &str) -> String {
            self.calls.lock().unwrap().push(text.to_string());
            format!("<{}>", text)
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        completed: Mutex<Vec<(Phase, String, bool)>>,
    }

    impl RecordingProgress {
        fn completed_in(&self, phase: Phase) -> Vec<(String, bool)> {
            let mut done: Vec<_> = self
                .completed
                .lock()
                .unwrap()
                .iter()
                .filter(|(p, _, _)| *p == phase)
                .map(|(_, name, ok)| (name.clone(), *ok))
                .collect();
            done.sort();
            done
        }
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}

        fn on_agent_complete(&self, phase: &Phase, agent: &str, success: bool) {
            self.completed
                .lock()
                .unwrap()
                .push((*phase, agent.to_string(), success));
        }

        fn on_phase_complete(&self, _phase: &Phase) {}
    }

    #[derive(Default)]
    struct CapturingLogger {
        events: Mutex<Vec<(String, serde_json::Value)>>,
    }

    impl ConversationLogger for CapturingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type.to_string(), event.payload));
        }
    }

    fn roster(agents: &[Arc<ScriptedAgent>]) -> Roster {
        Roster::new(
            AgentMode::Simulated,
            agents.iter().map(|a| Arc::clone(a) as Arc<dyn Agent>).collect(),
        )
    }

    fn orchestrator(agents: &[Arc<ScriptedAgent>]) -> PanelOrchestrator {
        let settings =
            PanelSettings::default().with_timeouts(PhaseTimeouts::from_secs(5, 3, 20));
        PanelOrchestrator::new(
            settings,
            roster(agents),
            Combiner::new(None),
            Arc::new(PassthroughSanitizer),
        )
    }

    #[tokio::test]
    async fn test_result_keeps_roster_order_and_length() {
        let agents = [
            ScriptedAgent::new("A", Behavior::Answer("a", 0.6)),
            ScriptedAgent::new("B", Behavior::Answer("b", 0.0)),
            ScriptedAgent::new("C", Behavior::Answer("c", 0.8)),
        ];
        let result = orchestrator(&agents).process("q").await.unwrap();
        let names: Vec<_> = result.agents.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(result.final_answer, "[Fallback Synthesis] c");
        assert_eq!(result.combined_confidence, 0.8);
    }

    #[tokio::test]
    async fn test_fallback_example_with_failed_agent() {
        let agents = [
            ScriptedAgent::new("A", Behavior::Answer("X", 0.9)),
            ScriptedAgent::new("B", Behavior::Answer("Error: boom", 0.0)),
        ];
        let result = orchestrator(&agents).process("q").await.unwrap();
        assert_eq!(result.final_answer, "[Fallback Synthesis] X");
        assert_eq!(result.combined_confidence, 0.9);
        assert_eq!(result.disagreement, "Synthesis LLM unavailable.");
        assert_eq!(result.agents.len(), 2);
    }

    #[tokio::test]
    async fn test_all_agents_failed_still_carries_roster() {
        let agents = [
            ScriptedAgent::new("A", Behavior::Answer("", 0.0)),
            ScriptedAgent::new("B", Behavior::Panic),
        ];
        let result = orchestrator(&agents).process("q").await.unwrap();
        assert_eq!(result.final_answer, "All agents failed to respond.");
        assert_eq!(result.combined_confidence, 0.0);
        assert_eq!(result.synthesis, SynthesisSource::NoValidResponses);
        assert_eq!(result.agents.len(), 2);
        assert_eq!(result.agents[1].answer, "[Timeout/Error]");
        assert!(agents[0].seen_peers.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tie_break_prefers_earlier_agent() {
        let agents = [
            ScriptedAgent::new("A", Behavior::Answer("first", 0.7)),
            ScriptedAgent::new("B", Behavior::Answer("second", 0.7)),
        ];
        let result = orchestrator(&agents).process("q").await.unwrap();
        assert_eq!(result.final_answer, "[Fallback Synthesis] first");
    }

    #[tokio::test]
    async fn test_panicking_agent_is_isolated() {
        let agents = [
            ScriptedAgent::new("A", Behavior::Panic),
            ScriptedAgent::new("B", Behavior::Answer("fine", 0.5)),
        ];
        let result = orchestrator(&agents).process("q").await.unwrap();
        assert_eq!(result.agents[0].name, "A");
        assert!(!result.agents[0].is_valid());
        assert_eq!(result.agents[1].answer, "fine");
    }

    #[tokio::test]
    async fn test_crashed_agent_is_reported_in_every_phase() {
        let agents = [
            ScriptedAgent::new("A", Behavior::Panic),
            ScriptedAgent::new("B", Behavior::Answer("fine", 0.5)),
        ];
        let logger = Arc::new(CapturingLogger::default());
        let progress = RecordingProgress::default();
        let orchestrator = orchestrator(&agents).with_logger(logger.clone());

        let result = orchestrator
            .execute_with_progress(RunPanelInput::new("q"), &progress)
            .await
            .unwrap();
        assert_eq!(result.agents.len(), 2);

        let expected = vec![("A".to_string(), false), ("B".to_string(), true)];
        assert_eq!(progress.completed_in(Phase::Broadcast), expected);
        assert_eq!(progress.completed_in(Phase::Critique), expected);

        let events = logger.events.lock().unwrap();
        let critiques: Vec<_> = events
            .iter()
            .filter(|(kind, _)| kind == "critique")
            .map(|(_, payload)| payload.clone())
            .collect();
        assert_eq!(critiques.len(), 2);
        assert!(
            critiques
                .iter()
                .any(|c| c["agent"] == "A" && c["text"] == CRITIQUE_FAILED)
        );
    }

    #[tokio::test]
    async fn test_empty_roster_is_an_error() {
        let result = orchestrator(&[]).process("q").await;
        assert!(matches!(result, Err(RunPanelError::EmptyRoster)));
    }

    #[tokio::test]
    async fn test_query_is_sanitized_exactly_once() {
        let agents = [
            ScriptedAgent::new("A", Behavior::Answer("a", 0.9)),
            ScriptedAgent::new("B", Behavior::Answer("b", 0.8)),
        ];
        let sanitizer = Arc::new(CountingSanitizer::default());
        let orchestrator = PanelOrchestrator::new(
            PanelSettings::default(),
            roster(&agents),
            Combiner::new(None),
            sanitizer.clone(),
        );

        orchestrator.process("alone").await.unwrap();
        assert_eq!(*sanitizer.calls.lock().unwrap(), vec!["alone"]);
        for agent in &agents {
            assert_eq!(*agent.seen_queries.lock().unwrap(), vec!["<alone>"]);
        }

        sanitizer.calls.lock().unwrap().clear();
        let input = RunPanelInput::new("next")
            .with_history(vec![ChatTurn::user("hi"), ChatTurn::assistant("hello")]);
        orchestrator.execute(input).await.unwrap();
        assert_eq!(sanitizer.calls.lock().unwrap().len(), 3);
        assert_eq!(agents[0].seen_queries.lock().unwrap()[1], "<next>");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_agent_does_not_block_others() {
        let agents = [
            ScriptedAgent::new("Fast", Behavior::Answer("quick", 0.6)),
            ScriptedAgent::new("Stuck", Behavior::Hang),
            ScriptedAgent::new(
                "Late",
                Behavior::Delayed(Duration::from_secs(60), "late", 0.99),
            ),
        ];
        let logger = Arc::new(CapturingLogger::default());
        let orchestrator = orchestrator(&agents).with_logger(logger.clone());

        let started = Instant::now();
        let result = orchestrator.process("q").await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(20));
        assert_eq!(result.agents[0].answer, "quick");
        assert_eq!(result.agents[1].answer, "[Timeout/Error]");
        assert_eq!(result.agents[2].answer, "[Timeout/Error]");
        assert_eq!(result.final_answer, "[Fallback Synthesis] quick");

        let events = logger.events.lock().unwrap();
        let critiques: Vec<_> = events
            .iter()
            .filter(|(kind, _)| kind == "critique")
            .map(|(_, payload)| payload["text"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(critiques.len(), 3);
        assert!(critiques.contains(&"Critique failed.".to_string()));
    }

    #[tokio::test]
    async fn test_critique_sees_only_valid_responses() {
        let agents = [
            ScriptedAgent::new("A", Behavior::Answer("a", 0.9)),
            ScriptedAgent::new("B", Behavior::Answer("b", 0.0)),
            ScriptedAgent::new("C", Behavior::Answer("c", 0.4)),
        ];
        orchestrator(&agents).process("q").await.unwrap();
        for agent in &agents {
            assert_eq!(*agent.seen_peers.lock().unwrap(), vec![2]);
        }
    }

    #[tokio::test]
    async fn test_agents_only_see_sanitized_query() {
        let agents = [
            ScriptedAgent::new("A", Behavior::Answer("a", 0.9)),
            ScriptedAgent::new("B", Behavior::Answer("b", 0.9)),
        ];
        let logger = Arc::new(CapturingLogger::default());
        let orchestrator = PanelOrchestrator::new(
            PanelSettings::default(),
            roster(&agents),
            Combiner::new(None),
            Arc::new(UppercaseSanitizer),
        )
        .with_logger(logger.clone());

        orchestrator.process("secret").await.unwrap();
        for agent in &agents {
            assert_eq!(*agent.seen_queries.lock().unwrap(), vec!["SECRET".to_string()]);
        }
        let events = logger.events.lock().unwrap();
        assert_eq!(events[0].0, "query_sanitized");
        assert_eq!(events[0].1["query"], "SECRET");
        assert_eq!(events.last().unwrap().0, "panel_result");
    }

    #[tokio::test]
    async fn test_concurrent_runs_share_orchestrator() {
        let agents = [
            ScriptedAgent::new("A", Behavior::Answer("a", 0.9)),
            ScriptedAgent::new("B", Behavior::Answer("b", 0.3)),
        ];
        let orchestrator = orchestrator(&agents);
        let (first, second) = tokio::join!(orchestrator.process("one"), orchestrator.process("two"));
        assert_eq!(first.unwrap().agents.len(), 2);
        assert_eq!(second.unwrap().agents.len(), 2);
        assert_eq!(agents[0].seen_queries.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_switch_mode_rebuilds_roster() {
        let builder =
            RosterBuilder::new(Arc::new(NoProviders)).with_latency(SimulatedLatency::none());
        let settings = PanelSettings::default();
        let roster = builder.build(&settings.agents, AgentMode::Simulated).unwrap();
        let orchestrator = PanelOrchestrator::new(
            settings,
            roster,
            Combiner::new(None),
            Arc::new(PassthroughSanitizer),
        );

        let before = orchestrator.roster_snapshot().unwrap();
        let simulated = orchestrator.process("hello").await.unwrap();
        assert!(simulated.final_answer.starts_with("[Fallback Synthesis] "));
        assert_eq!(simulated.combined_confidence, 0.95);

        orchestrator.switch_mode(AgentMode::Live, &builder).unwrap();
        let status = orchestrator.status().unwrap();
        assert_eq!(status.mode, AgentMode::Live);
        assert_eq!(status.agents, vec!["ChatGPT", "Claude", "Gemini", "Grok"]);
        assert!(!status.synthesis_available);
        assert_eq!(before.mode(), AgentMode::Simulated);

        let live = orchestrator.process("hello").await.unwrap();
        assert_eq!(live.final_answer, "All agents failed to respond.");
        assert_eq!(live.agents.len(), 4);
        assert!(live.agents[0].answer.starts_with("[MISSING KEY]"));
    }

    #[tokio::test]
    async fn test_history_is_sanitized_and_forwarded() {
        struct HistoryProbe {
            profile: AgentProfile,
            turns: Mutex<Vec<String>>,
        }

        #[async_trait]
        impl Agent for HistoryProbe {
            fn profile(&self) -> &AgentProfile {
                &self.profile
            }

            async fn query(&self, _text: &str, history: &[ChatTurn]) -> AgentResponse {
                *self.turns.lock().unwrap() = history.iter().map(|t| t.content.clone()).collect();
                AgentResponse::new(self.name(), "ok", "r", 0.5)
            }

            async fn critique(&self, _peers: &[AgentResponse]) -> String {
                String::new()
            }
        }

        let probe = Arc::new(HistoryProbe {
            profile: AgentProfile::new("Probe", Vendor::OpenAi, ""),
            turns: Mutex::new(Vec::new()),
        });
        let orchestrator = PanelOrchestrator::new(
            PanelSettings::default(),
            Roster::new(AgentMode::Simulated, vec![probe.clone() as Arc<dyn Agent>]),
            Combiner::new(None),
            Arc::new(UppercaseSanitizer),
        );
        let input = RunPanelInput::new("next")
            .with_history(vec![ChatTurn::user("hi"), ChatTurn::assistant("hello")]);
        orchestrator.execute(input).await.unwrap();
        assert_eq!(*probe.turns.lock().unwrap(), vec!["HI", "HELLO"]);
    }
}
