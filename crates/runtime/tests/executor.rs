use std::collections::VecDeque;

use playground_core::{
    AgentAbility, AgentState, AgentStats, Coordinates, GameOutcome, ObjectId, Playground,
    PlaygroundEvent, PlaygroundFactory, PlaygroundId, PlaygroundParams,
};
use playground_runtime::{
    Decision, DecisionProvider, RandomWalkProvider, Result, TurnExecutor, WaitProvider,
};

/// Replays a fixed list of decisions, then waits.
struct Scripted(VecDeque<Decision>);

impl Scripted {
    fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self(decisions.into_iter().collect())
    }
}

impl DecisionProvider for Scripted {
    fn decide(&mut self, _agent: ObjectId, _playground: &Playground) -> Result<Decision> {
        Ok(self.0.pop_front().unwrap_or(Decision::Wait))
    }
}

fn c(x: u32, y: u32) -> Coordinates {
    Coordinates::new(x, y)
}

/// 7x7 corridor: hero at (1, 3), exit at (5, 3).
fn corridor() -> (Playground, ObjectId, ObjectId) {
    let mut pg = Playground::new(PlaygroundId(1), 7, 7).unwrap();
    let hero = pg
        .place_hero(AgentState::new(AgentStats::new(1, 3, 10)), c(1, 3))
        .unwrap();
    let exit = pg.place_exit(c(5, 3)).unwrap();
    (pg, hero, exit)
}

#[test]
fn hero_walks_to_the_exit() {
    let (pg, hero, exit) = corridor();
    let script = Scripted::new([
        Decision::Path(vec![c(2, 3)]),
        Decision::Path(vec![c(3, 3)]),
        Decision::Path(vec![c(4, 3)]),
    ]);
    let mut executor = TurnExecutor::new(pg, script, WaitProvider);

    let summary = executor.run(10).unwrap();
    assert_eq!(summary.turns, 3);
    assert_eq!(summary.outcome, Some(GameOutcome::Escaped { hero, exit }));
    assert!(summary.escaped());
    assert_eq!(summary.rejected, 0);
    assert!(
        summary
            .events
            .contains(&PlaygroundEvent::HeroReachedExit { hero, exit })
    );
    assert_eq!(executor.playground().turn(), 3);
}

#[test]
fn illegal_decisions_are_counted_and_skipped() {
    let (pg, hero, _) = corridor();
    let script = Scripted::new([Decision::Path(vec![c(3, 3)])]);
    let mut executor = TurnExecutor::new(pg, script, WaitProvider);

    let report = executor.step().unwrap();
    assert_eq!(report.turn, 1);
    assert_eq!(report.rejected, 1);
    assert_eq!(report.applied, 0);
    assert_eq!(
        executor.playground().object(hero).unwrap().coordinates(),
        c(1, 3)
    );
}

#[test]
fn sprint_does_not_end_the_agents_turn() {
    let (pg, hero, _) = corridor();
    let script = Scripted::new([
        Decision::Ability(AgentAbility::Sprint),
        Decision::Path(vec![c(2, 3), c(3, 3)]),
    ]);
    let mut executor = TurnExecutor::new(pg, script, WaitProvider);

    let report = executor.step().unwrap();
    assert_eq!(report.applied, 2);
    assert_eq!(
        executor.playground().object(hero).unwrap().coordinates(),
        c(3, 3)
    );
    assert!(report.events.contains(&PlaygroundEvent::AbilityUsed {
        agent: hero,
        ability: AgentAbility::Sprint,
    }));
}

#[test]
fn enemy_catches_the_hero() {
    let (mut pg, hero, _) = corridor();
    let enemy = pg
        .place_enemy(AgentState::new(AgentStats::new(1, 3, 10)), c(1, 5))
        .unwrap();
    let chase = Scripted::new([Decision::Path(vec![c(1, 4)])]);
    let mut executor = TurnExecutor::new(pg, WaitProvider, chase);

    let report = executor.step().unwrap();
    assert_eq!(report.outcome, Some(GameOutcome::Caught { hero, enemy }));
    assert_eq!(
        report.events.last(),
        Some(&PlaygroundEvent::HeroCaught { hero, enemy })
    );
}

#[test]
fn turn_limit_stops_an_undecided_episode() {
    let (pg, _, _) = corridor();
    let mut executor = TurnExecutor::new(pg, WaitProvider, WaitProvider);

    let summary = executor.run(5).unwrap();
    assert_eq!(summary.turns, 5);
    assert_eq!(summary.outcome, None);
    assert_eq!(summary.applied, 5);
    let started = summary
        .events
        .iter()
        .filter(|event| matches!(event, PlaygroundEvent::TurnStarted { .. }))
        .count();
    assert_eq!(started, 5);
}

#[test]
fn random_episodes_are_reproducible_and_keep_invariants() {
    let params = PlaygroundParams::new(21, 21, 15, 3).with_seed(4);
    let episode = || {
        let pg = PlaygroundFactory::new().create(&params).unwrap();
        let mut executor =
            TurnExecutor::new(pg, RandomWalkProvider::seeded(1), RandomWalkProvider::seeded(2));
        let summary = executor.run(40).unwrap();
        (summary, executor.into_playground())
    };

    let (first, pg) = episode();
    let (second, _) = episode();
    assert_eq!(first, second);
    assert!(first.turns <= 40);

    for cell in pg.grid().cells() {
        let object = pg.object(cell.occupant()).unwrap();
        assert_eq!(object.coordinates(), cell.coordinates());
    }
    for id in pg.ordered_agents_for_turn() {
        let state = pg.agent(id).unwrap();
        assert!(state.stamina().current <= state.stamina().maximum);
    }
}
