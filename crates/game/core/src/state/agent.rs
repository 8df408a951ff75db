//! Per-agent turn state shared by the hero and enemies.
//!
//! An agent cycles through [`TurnPhase`] once per turn:
//!
//! ```text
//! Idle ──refresh──▶ ActionsAvailable ──act──▶ ActionsExecuted ──close──▶ TurnClosed
//!  ▲                                                                         │
//!  └──────────────────────────────── start_turn ─────────────────────────────┘
//! ```
//!
//! Movement is budgeted two ways: every step spends one point of stamina, and
//! the number of steps per turn is capped by speed (doubled while sprinting).

use crate::error::{ErrorKind, ErrorSeverity, GameError};

use super::{Coordinates, ObjectId, ResourceMeter};

/// Construction-time statistics for an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStats {
    /// Maximum move steps per turn while walking.
    pub speed: u32,
    /// Euclidean radius, in cells, of the agent's field of view.
    pub sight_range: u32,
    /// Maximum (and starting) stamina.
    pub stamina: u32,
}

impl AgentStats {
    pub const fn new(speed: u32, sight_range: u32, stamina: u32) -> Self {
        Self {
            speed,
            sight_range,
            stamina,
        }
    }
}

/// Abilities an agent may use instead of, or in addition to, moving.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AgentAbility {
    /// Doubles the step limit for the rest of the turn.
    Sprint,
    /// Refills stamina and ends movement for the turn.
    Rest,
}

/// One action an agent can take (or took) during a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentAction {
    Move { to: Coordinates },
    Ability(AgentAbility),
    Wait,
}

impl AgentAction {
    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    #[default]
    Idle,
    ActionsAvailable,
    ActionsExecuted,
    TurnClosed,
}

/// Insufficient budget for a requested move sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StaminaError {
    #[error("agent {agent} needs {required} stamina but has {available}")]
    Exhausted {
        agent: ObjectId,
        required: u32,
        available: u32,
    },

    #[error("agent {agent} requested {requested} steps but may take {allowed} more this turn")]
    StepLimitExceeded {
        agent: ObjectId,
        requested: u32,
        allowed: u32,
    },
}

impl GameError for StaminaError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::ResourceExhaustion
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Exhausted { .. } => "STAMINA_EXHAUSTED",
            Self::StepLimitExceeded { .. } => "STAMINA_STEP_LIMIT_EXCEEDED",
        }
    }
}

/// Mutable behavioural state carried by hero and enemy objects.
///
/// # Invariants
///
/// - Stamina spent by moves within a turn never exceeds the stamina held at
///   the start of the turn (every step is checked before it is applied).
/// - `executed_actions` only contains actions of the current turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    speed: u32,
    sight_range: u32,
    stamina: ResourceMeter,
    is_run: bool,
    order_in_turn_queue: u32,
    path_to_target: Vec<Coordinates>,
    traveled_path: Vec<Coordinates>,
    available_actions: Vec<AgentAction>,
    executed_actions: Vec<AgentAction>,
    visible_cells: Vec<Coordinates>,
    phase: TurnPhase,
}

impl AgentState {
    /// Most recent cells kept in [`AgentState::traveled_path`].
    pub const TRAVELED_PATH_LIMIT: usize = 256;

    pub fn new(stats: AgentStats) -> Self {
        Self {
            speed: stats.speed,
            sight_range: stats.sight_range,
            stamina: ResourceMeter::full(stats.stamina),
            is_run: false,
            order_in_turn_queue: 0,
            path_to_target: Vec::new(),
            traveled_path: Vec::new(),
            available_actions: Vec::new(),
            executed_actions: Vec::new(),
            visible_cells: Vec::new(),
            phase: TurnPhase::Idle,
        }
    }

    pub fn with_order_in_turn_queue(mut self, order: u32) -> Self {
        self.order_in_turn_queue = order;
        self
    }

    pub fn with_path_to_target(mut self, path: Vec<Coordinates>) -> Self {
        self.path_to_target = path;
        self
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn sight_range(&self) -> u32 {
        self.sight_range
    }

    pub fn stamina(&self) -> ResourceMeter {
        self.stamina
    }

    pub fn is_run(&self) -> bool {
        self.is_run
    }

    pub fn order_in_turn_queue(&self) -> u32 {
        self.order_in_turn_queue
    }

    pub fn path_to_target(&self) -> &[Coordinates] {
        &self.path_to_target
    }

    /// Cells entered so far, oldest first, capped at
    /// [`AgentState::TRAVELED_PATH_LIMIT`] entries.
    pub fn traveled_path(&self) -> &[Coordinates] {
        &self.traveled_path
    }

    pub fn available_actions(&self) -> &[AgentAction] {
        &self.available_actions
    }

    pub fn executed_actions(&self) -> &[AgentAction] {
        &self.executed_actions
    }

    pub fn visible_cells(&self) -> &[Coordinates] {
        &self.visible_cells
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Whether the agent may act right now.
    pub fn can_act(&self) -> bool {
        matches!(
            self.phase,
            TurnPhase::ActionsAvailable | TurnPhase::ActionsExecuted
        )
    }

    /// Step cap for this turn before stamina is considered.
    pub fn step_limit(&self) -> u32 {
        if self.is_run {
            self.speed.saturating_mul(2)
        } else {
            self.speed
        }
    }

    pub fn executed_moves(&self) -> u32 {
        self.executed_actions
            .iter()
            .filter(|action| action.is_move())
            .count() as u32
    }

    pub fn has_rested(&self) -> bool {
        self.executed_actions
            .contains(&AgentAction::Ability(AgentAbility::Rest))
    }

    /// Steps still allowed this turn by the step limit alone.
    fn steps_left_in_turn(&self) -> u32 {
        if self.has_rested() {
            return 0;
        }
        self.step_limit().saturating_sub(self.executed_moves())
    }

    /// Move steps the agent can still take this turn.
    pub fn remaining_steps(&self) -> u32 {
        self.steps_left_in_turn().min(self.stamina.current)
    }

    /// Checks that `requested` more steps fit both stamina and the step limit.
    pub fn check_move_budget(&self, agent: ObjectId, requested: u32) -> Result<(), StaminaError> {
        if requested > self.stamina.current {
            return Err(StaminaError::Exhausted {
                agent,
                required: requested,
                available: self.stamina.current,
            });
        }

        let allowed = self.steps_left_in_turn();
        if requested > allowed {
            return Err(StaminaError::StepLimitExceeded {
                agent,
                requested,
                allowed,
            });
        }

        Ok(())
    }

    pub(crate) fn set_order_in_turn_queue(&mut self, order: u32) {
        self.order_in_turn_queue = order;
    }

    pub(crate) fn set_path_to_target(&mut self, path: Vec<Coordinates>) {
        self.path_to_target = path;
    }

    pub(crate) fn set_visible_cells(&mut self, cells: Vec<Coordinates>) {
        self.visible_cells = cells;
    }

    /// Appends `to`, dropping the oldest entries beyond
    /// [`AgentState::TRAVELED_PATH_LIMIT`].
    pub(crate) fn record_traveled(&mut self, to: Coordinates) {
        if self.traveled_path.len() >= Self::TRAVELED_PATH_LIMIT {
            let excess = self.traveled_path.len() + 1 - Self::TRAVELED_PATH_LIMIT;
            self.traveled_path.drain(..excess);
        }
        self.traveled_path.push(to);
    }

    /// Resets per-turn bookkeeping; the agent becomes `Idle`.
    pub(crate) fn start_turn(&mut self) {
        self.executed_actions.clear();
        self.available_actions.clear();
        self.is_run = false;
        self.phase = TurnPhase::Idle;
    }

    /// Rebuilds the action list from remaining budget and the supplied path.
    ///
    /// `contains` reports whether a coordinate lies on the grid; the path
    /// prefix stops at the first step outside it.
    pub(crate) fn refresh_available_actions(&mut self, contains: impl Fn(Coordinates) -> bool) {
        let steps = self.remaining_steps() as usize;
        let mut actions: Vec<AgentAction> = self
            .path_to_target
            .iter()
            .copied()
            .take_while(|&step| contains(step))
            .take(steps)
            .map(|to| AgentAction::Move { to })
            .collect();

        if !self.is_run && !self.has_rested() && !self.stamina.is_exhausted() {
            actions.push(AgentAction::Ability(AgentAbility::Sprint));
        }
        if !self.has_rested() {
            actions.push(AgentAction::Ability(AgentAbility::Rest));
        }
        actions.push(AgentAction::Wait);

        self.available_actions = actions;
        if self.phase != TurnPhase::ActionsExecuted {
            self.phase = TurnPhase::ActionsAvailable;
        }
    }

    /// Books one applied step. The caller has already checked the budget.
    pub(crate) fn record_move(&mut self, to: Coordinates) {
        let spent = self.stamina.consume(1);
        debug_assert!(spent, "move recorded without stamina");
        if self.path_to_target.first() == Some(&to) {
            self.path_to_target.remove(0);
        }
        self.executed_actions.push(AgentAction::Move { to });
        self.phase = TurnPhase::ActionsExecuted;
    }

    pub(crate) fn use_ability(&mut self, ability: AgentAbility) {
        match ability {
            AgentAbility::Sprint => self.is_run = true,
            AgentAbility::Rest => self.stamina.restore(),
        }
        self.executed_actions.push(AgentAction::Ability(ability));
        self.phase = TurnPhase::ActionsExecuted;
    }

    pub(crate) fn record_wait(&mut self) {
        self.executed_actions.push(AgentAction::Wait);
        self.phase = TurnPhase::ActionsExecuted;
    }

    pub(crate) fn close_turn(&mut self) {
        self.is_run = false;
        self.available_actions.clear();
        self.phase = TurnPhase::TurnClosed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(speed: u32, stamina: u32) -> AgentState {
        AgentState::new(AgentStats::new(speed, 3, stamina))
    }

    #[test]
    fn budget_is_min_of_speed_and_stamina() {
        let walker = agent(2, 5);
        assert_eq!(walker.remaining_steps(), 2);

        let tired = agent(4, 1);
        assert_eq!(tired.remaining_steps(), 1);
        assert!(matches!(
            tired.check_move_budget(ObjectId(1), 2),
            Err(StaminaError::Exhausted {
                required: 2,
                available: 1,
                ..
            })
        ));
    }

    #[test]
    fn executed_moves_count_against_step_limit() {
        let mut walker = agent(2, 10);
        walker.refresh_available_actions(|_| true);
        walker.record_move(Coordinates::new(1, 1));

        assert_eq!(walker.stamina().current, 9);
        assert_eq!(walker.remaining_steps(), 1);
        assert!(matches!(
            walker.check_move_budget(ObjectId(7), 2),
            Err(StaminaError::StepLimitExceeded {
                requested: 2,
                allowed: 1,
                ..
            })
        ));
        assert_eq!(walker.phase(), TurnPhase::ActionsExecuted);
    }

    #[test]
    fn sprint_doubles_step_limit_until_turn_closes() {
        let mut runner = agent(2, 10);
        runner.refresh_available_actions(|_| true);
        runner.use_ability(AgentAbility::Sprint);
        assert!(runner.is_run());
        assert_eq!(runner.remaining_steps(), 4);

        runner.close_turn();
        assert!(!runner.is_run());
        assert_eq!(runner.phase(), TurnPhase::TurnClosed);
    }

    #[test]
    fn rest_restores_stamina_and_stops_movement() {
        let mut resting = AgentState::new(AgentStats::new(3, 3, 4));
        resting.refresh_available_actions(|_| true);
        resting.record_move(Coordinates::new(1, 0));
        resting.record_move(Coordinates::new(2, 0));
        resting.use_ability(AgentAbility::Rest);

        assert_eq!(resting.stamina().current, 4);
        assert_eq!(resting.remaining_steps(), 0);
    }

    #[test]
    fn available_actions_follow_path_prefix() {
        let path = vec![
            Coordinates::new(1, 0),
            Coordinates::new(2, 0),
            Coordinates::new(3, 0),
        ];
        let mut walker = agent(2, 10).with_path_to_target(path);
        walker.refresh_available_actions(|c| c.x < 10);

        assert_eq!(
            walker.available_actions(),
            &[
                AgentAction::Move {
                    to: Coordinates::new(1, 0)
                },
                AgentAction::Move {
                    to: Coordinates::new(2, 0)
                },
                AgentAction::Ability(AgentAbility::Sprint),
                AgentAction::Ability(AgentAbility::Rest),
                AgentAction::Wait,
            ]
        );
        assert_eq!(walker.phase(), TurnPhase::ActionsAvailable);
    }

    #[test]
    fn path_prefix_stops_outside_grid() {
        let path = vec![Coordinates::new(1, 0), Coordinates::new(9, 0)];
        let mut walker = agent(5, 10).with_path_to_target(path);
        walker.refresh_available_actions(|c| c.x < 5);

        assert_eq!(
            walker
                .available_actions()
                .iter()
                .filter(|a| a.is_move())
                .count(),
            1
        );
    }

    #[test]
    fn start_turn_clears_executed_actions() {
        let mut walker = agent(1, 5);
        walker.refresh_available_actions(|_| true);
        walker.record_wait();
        walker.start_turn();

        assert!(walker.executed_actions().is_empty());
        assert_eq!(walker.phase(), TurnPhase::Idle);
        assert!(!walker.can_act());
    }

    #[test]
    fn traveled_path_keeps_the_most_recent_cells() {
        let mut walker = agent(1, 5);
        let total = AgentState::TRAVELED_PATH_LIMIT as u32 + 44;
        for x in 0..total {
            walker.record_traveled(Coordinates::new(x, 0));
        }

        let path = walker.traveled_path();
        assert_eq!(path.len(), AgentState::TRAVELED_PATH_LIMIT);
        assert_eq!(path.first(), Some(&Coordinates::new(44, 0)));
        assert_eq!(path.last(), Some(&Coordinates::new(total - 1, 0)));
    }

    #[test]
    fn ability_parses_case_insensitively() {
        assert_eq!("SPRINT".parse::<AgentAbility>(), Ok(AgentAbility::Sprint));
        assert_eq!(AgentAbility::Rest.to_string(), "rest");
    }
}
