#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Round-based combat engine for Cavern Skirmish.
//!
//! The engine owns the [`World`] for the whole run. Each round it snapshots
//! the living units in reading order and lets each one act in turn: attack an
//! adjacent enemy if there is one, otherwise step toward the nearest reachable
//! enemy and attack if that brings one into range. Fallen units stop acting
//! at once and leave the live set when the round completes.

mod search;
mod targeting;

use std::ops::ControlFlow;

pub use search::{elf_power_ceiling, minimum_flawless_elf_power, FlawlessVictory};
pub use targeting::{movement_targets, select_target};

use skirmish_core::{CombatError, CombatRules, Command, Event, Grid, Outcome, Placement, UnitId};
use skirmish_system_pathfinding::{PathFinder, Route};
use skirmish_world::{self as world, query, World};
use tracing::{debug, info, trace, warn};

/// What a call to [`CombatEngine::play_round`] achieved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundResult {
    /// Every unit acted and both factions still stand.
    Continuing {
        /// Full rounds completed so far.
        completed_rounds: u32,
    },
    /// One faction has been eliminated.
    Decided(Outcome),
}

/// What a single unit did with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Turn {
    Skipped,
    NoEnemiesLeft,
    Attacked,
    Moved,
    MovedAndAttacked,
    Held,
}

impl Turn {
    fn changed_anything(self) -> bool {
        matches!(self, Turn::Attacked | Turn::Moved | Turn::MovedAndAttacked)
    }
}

/// Drives rounds of combat over an exclusively owned world.
#[derive(Debug)]
pub struct CombatEngine {
    world: World,
    pathfinder: PathFinder,
    outcome: Option<Outcome>,
}

impl CombatEngine {
    /// Creates an engine that takes ownership of the provided world.
    #[must_use]
    pub fn new(world: World) -> Self {
        Self {
            world,
            pathfinder: PathFinder::new(),
            outcome: None,
        }
    }

    /// Builds the world from a grid and placements and wraps it in an engine.
    pub fn from_placements(
        grid: Grid,
        placements: &[Placement],
        rules: CombatRules,
    ) -> Result<Self, CombatError> {
        World::new(grid, placements, rules).map(Self::new)
    }

    /// Read-only access to the world being simulated.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Outcome of the run, once combat has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Runs rounds until one faction is eliminated.
    pub fn run(&mut self) -> Result<Outcome, CombatError> {
        loop {
            if let RoundResult::Decided(outcome) = self.play_round()? {
                return Ok(outcome);
            }
        }
    }

    /// Runs rounds until one faction is eliminated, handing the events of
    /// every round to `observer`.
    ///
    /// Returns `Ok(None)` when the observer breaks off the run.
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<Option<Outcome>, CombatError>
    where
        F: FnMut(&[Event]) -> ControlFlow<()>,
    {
        let mut events = Vec::new();
        loop {
            events.clear();
            let result = self.play_round_into(&mut events)?;
            if observer(&events).is_break() {
                return Ok(None);
            }
            if let RoundResult::Decided(outcome) = result {
                return Ok(Some(outcome));
            }
        }
    }

    /// Plays exactly one round.
    ///
    /// Once combat has ended, further calls keep reporting the same outcome.
    /// A round in which no unit moved or attacked is reported as
    /// [`CombatError::Stalemate`], since every later round would repeat it.
    pub fn play_round(&mut self) -> Result<RoundResult, CombatError> {
        let mut events = Vec::new();
        self.play_round_into(&mut events)
    }

    fn play_round_into(&mut self, out: &mut Vec<Event>) -> Result<RoundResult, CombatError> {
        if let Some(outcome) = self.outcome {
            return Ok(RoundResult::Decided(outcome));
        }

        let order: Vec<UnitId> = query::unit_view(&self.world)
            .living()
            .map(|unit| unit.id)
            .collect();

        let mut active = false;
        for unit in order {
            let turn = self.take_turn(unit, out);
            trace!(unit = unit.get(), ?turn, "turn resolved");
            if turn == Turn::NoEnemiesLeft {
                if let Some(outcome) = query::outcome(&self.world) {
                    return Ok(RoundResult::Decided(self.conclude(outcome)));
                }
            }
            active |= turn.changed_anything();
        }

        let completed_rounds = query::completed_rounds(&self.world);
        if !active {
            return Err(CombatError::Stalemate { completed_rounds });
        }

        world::apply(&mut self.world, Command::CompleteRound, out);
        let counts = query::faction_counts(&self.world);
        let completed_rounds = query::completed_rounds(&self.world);
        debug!(
            round = completed_rounds,
            elves = counts.elves,
            goblins = counts.goblins,
            "round completed"
        );

        if let Some(outcome) = query::outcome(&self.world) {
            return Ok(RoundResult::Decided(self.conclude(outcome)));
        }

        Ok(RoundResult::Continuing { completed_rounds })
    }

    fn take_turn(&mut self, id: UnitId, out: &mut Vec<Event>) -> Turn {
        let Some(actor) = query::unit(&self.world, id).filter(|unit| unit.is_alive()) else {
            return Turn::Skipped;
        };

        if query::faction_counts(&self.world).of(actor.faction.opponent()) == 0 {
            return Turn::NoEnemiesLeft;
        }

        if let Some(target) = select_target(&self.world, &actor) {
            trace!(unit = id.get(), target = target.id.get(), "attacking in place");
            if !self.strike(id, target.id, out) {
                return Turn::Held;
            }
            return Turn::Attacked;
        }

        let targets = movement_targets(&self.world, actor.faction);
        let route = self.pathfinder.route(
            query::grid(&self.world),
            query::occupancy_view(&self.world),
            actor.cell,
            &targets,
        );

        let Route::Step {
            destination,
            next,
            direction,
            distance,
        } = route
        else {
            return Turn::Held;
        };

        trace!(
            unit = id.get(),
            %destination,
            %next,
            distance,
            "stepping toward nearest target"
        );
        if !self.submit(Command::MoveUnit { unit: id, direction }, out) {
            return Turn::Held;
        }

        let Some(moved) = query::unit(&self.world, id) else {
            return Turn::Moved;
        };

        let Some(target) = select_target(&self.world, &moved) else {
            return Turn::Moved;
        };

        trace!(unit = id.get(), target = target.id.get(), "attacking after step");
        if self.strike(id, target.id, out) {
            Turn::MovedAndAttacked
        } else {
            Turn::Moved
        }
    }

    fn strike(&mut self, attacker: UnitId, target: UnitId, out: &mut Vec<Event>) -> bool {
        self.submit(Command::Attack { attacker, target }, out)
    }

    /// Applies the command and reports whether the world accepted it.
    fn submit(&mut self, command: Command, out: &mut Vec<Event>) -> bool {
        let first_new = out.len();
        world::apply(&mut self.world, command, out);

        let mut accepted = true;
        for event in &out[first_new..] {
            if matches!(
                event,
                Event::MoveRejected { .. } | Event::AttackRejected { .. }
            ) {
                warn!(?command, ?event, "world rejected command");
                accepted = false;
            }
        }
        accepted
    }

    fn conclude(&mut self, outcome: Outcome) -> Outcome {
        info!(
            rounds = outcome.completed_rounds,
            remaining_health = outcome.remaining_health,
            winner = %outcome.winner,
            score = outcome.score(),
            "combat ended"
        );
        self.outcome = Some(outcome);
        outcome
    }
}
