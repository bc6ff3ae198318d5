//! Search for the weakest elf attack power that wins without losses.

use std::ops::ControlFlow;

use skirmish_core::{
    AttackPower, CombatError, CombatRules, Event, Faction, Grid, Outcome, Placement,
};
use skirmish_world::World;
use tracing::{debug, info};

use crate::CombatEngine;

/// Elf attack power that wins without a single elf falling, with the outcome
/// of that run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FlawlessVictory {
    /// Lowest elf attack power found to win without losses.
    pub elf_attack: AttackPower,
    /// Outcome of the run at that attack power.
    pub outcome: Outcome,
}

/// Highest elf attack power the search tries: enough to fell any unit in a
/// single blow, and never below the first power tried.
#[must_use]
pub fn elf_power_ceiling(rules: &CombatRules) -> AttackPower {
    let first = rules.attack_power(Faction::Elf).get().saturating_add(1);
    AttackPower::new(rules.initial_health().get().max(first))
}

/// Finds the lowest elf attack power above the configured one with which the
/// elves win without losing anyone.
///
/// Every trial aborts at the end of the first round in which an elf falls.
/// The search gives up with `Ok(None)` once elves already kill any goblin in a
/// single blow and still suffer losses.
pub fn minimum_flawless_elf_power(
    grid: &Grid,
    placements: &[Placement],
    rules: CombatRules,
) -> Result<Option<FlawlessVictory>, CombatError> {
    let base = rules.attack_power(Faction::Elf).get();
    let ceiling = elf_power_ceiling(&rules).get();

    for power in base.saturating_add(1)..=ceiling {
        let elf_attack = AttackPower::new(power);
        let trial = rules.with_attack(Faction::Elf, elf_attack);
        let mut engine = CombatEngine::new(World::new(grid.clone(), placements, trial)?);

        let outcome = engine.run_with(|events| {
            if events.iter().any(|event| {
                matches!(
                    event,
                    Event::UnitSlain {
                        faction: Faction::Elf,
                        ..
                    }
                )
            }) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })?;

        match outcome {
            Some(outcome) if outcome.winner == Faction::Elf => {
                info!(power, score = outcome.score(), "elves win without losses");
                return Ok(Some(FlawlessVictory {
                    elf_attack,
                    outcome,
                }));
            }
            _ => debug!(power, "elves suffer losses"),
        }
    }

    Ok(None)
}
