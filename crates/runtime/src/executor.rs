//! Turn executor: drives one playground with external decisions.
//!
//! A turn is
//!
//! ```text
//! start turn ─▶ for agent in ordered agents: decide ─▶ apply ─▶ close turn ─▶ outcome
//! ```
//!
//! Illegal decisions are not fatal: the core rejects them without mutating
//! anything, the executor logs them and moves on to the next agent.

use playground_core::{
    AgentAbility, GameError, GameOutcome, ObjectId, Playground, PlaygroundError, PlaygroundEvent,
    PlaygroundId,
};
use serde::Serialize;

use crate::api::{Decision, DecisionProvider, ProviderKind, Result};

/// What happened during one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    pub turn: u64,
    /// Decisions applied successfully.
    pub applied: u32,
    /// Decisions the core rejected.
    pub rejected: u32,
    pub events: Vec<PlaygroundEvent>,
    pub outcome: Option<GameOutcome>,
}

/// Result of running a playground until it ends or hits the turn cap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EpisodeSummary {
    pub playground: PlaygroundId,
    pub turns: u64,
    pub applied: u32,
    pub rejected: u32,
    pub outcome: Option<GameOutcome>,
    pub events: Vec<PlaygroundEvent>,
}

impl EpisodeSummary {
    pub fn escaped(&self) -> bool {
        matches!(self.outcome, Some(GameOutcome::Escaped { .. }))
    }

    pub fn caught(&self) -> bool {
        matches!(self.outcome, Some(GameOutcome::Caught { .. }))
    }
}

/// Owns one playground and the providers deciding for its agents.
pub struct TurnExecutor {
    playground: Playground,
    hero_provider: Box<dyn DecisionProvider>,
    enemy_provider: Box<dyn DecisionProvider>,
}

impl TurnExecutor {
    /// Decisions one agent may make per turn. Sprinting does not end an
    /// agent's turn, so a sprint can be followed by a walk.
    pub const MAX_DECISIONS_PER_AGENT: usize = 4;

    pub fn new(
        playground: Playground,
        hero_provider: impl DecisionProvider + 'static,
        enemy_provider: impl DecisionProvider + 'static,
    ) -> Self {
        Self {
            playground,
            hero_provider: Box::new(hero_provider),
            enemy_provider: Box::new(enemy_provider),
        }
    }

    pub fn playground(&self) -> &Playground {
        &self.playground
    }

    pub fn into_playground(self) -> Playground {
        self.playground
    }

    /// Runs one full turn.
    pub fn step(&mut self) -> Result<TurnReport> {
        let turn = self.playground.on_start_turn_actions();
        tracing::debug!(playground = %self.playground.id(), turn, "turn started");

        let mut report = TurnReport {
            turn,
            applied: 0,
            rejected: 0,
            events: Vec::new(),
            outcome: None,
        };

        for agent in self.playground.ordered_agents_for_turn() {
            if self.playground.outcome().is_some() {
                break;
            }
            self.act(agent, &mut report)?;
        }

        self.playground.close_turn();
        report.outcome = self.playground.outcome();
        report.events = self.playground.drain_events();

        tracing::debug!(
            playground = %self.playground.id(),
            turn,
            applied = report.applied,
            rejected = report.rejected,
            "turn closed"
        );
        Ok(report)
    }

    /// Steps until an outcome is reached or `max_turns` turns have run.
    pub fn run(&mut self, max_turns: u64) -> Result<EpisodeSummary> {
        let mut summary = EpisodeSummary {
            playground: self.playground.id(),
            turns: 0,
            applied: 0,
            rejected: 0,
            outcome: self.playground.outcome(),
            events: Vec::new(),
        };

        while summary.outcome.is_none() && summary.turns < max_turns {
            let report = self.step()?;
            summary.turns += 1;
            summary.applied += report.applied;
            summary.rejected += report.rejected;
            summary.outcome = report.outcome;
            summary.events.extend(report.events);
        }

        match summary.outcome {
            Some(outcome) => tracing::info!(
                playground = %summary.playground,
                turns = summary.turns,
                ?outcome,
                "episode finished"
            ),
            None => tracing::info!(
                playground = %summary.playground,
                turns = summary.turns,
                "episode reached the turn limit"
            ),
        }
        Ok(summary)
    }

    /// Asks the agent's provider for decisions until it ends its turn.
    fn act(&mut self, agent: ObjectId, report: &mut TurnReport) -> Result<()> {
        let kind = if self.playground.hero() == Some(agent) {
            ProviderKind::Hero
        } else {
            ProviderKind::Enemy
        };

        for _ in 0..Self::MAX_DECISIONS_PER_AGENT {
            let provider = match kind {
                ProviderKind::Hero => &mut self.hero_provider,
                ProviderKind::Enemy => &mut self.enemy_provider,
            };
            let decision = provider.decide(agent, &self.playground)?;
            let ends_turn = !matches!(decision, Decision::Ability(AgentAbility::Sprint));

            match apply(&mut self.playground, agent, decision) {
                Ok(()) => report.applied += 1,
                Err(err) if err.severity().is_internal() => return Err(err.into()),
                Err(err) => {
                    tracing::warn!(
                        %agent,
                        %kind,
                        code = err.error_code(),
                        "illegal decision ignored: {}",
                        err
                    );
                    report.rejected += 1;
                    return Ok(());
                }
            }

            if ends_turn || self.playground.outcome().is_some() {
                break;
            }
        }
        Ok(())
    }
}

fn apply(
    playground: &mut Playground,
    agent: ObjectId,
    decision: Decision,
) -> std::result::Result<(), PlaygroundError> {
    match decision {
        Decision::Path(steps) => playground.apply_path(agent, &steps).map(|_| ()),
        Decision::Ability(ability) => playground.use_ability(agent, ability),
        Decision::Wait => playground.wait(agent),
    }
}
