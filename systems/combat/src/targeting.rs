//! Target and destination selection for a unit's turn.

use skirmish_core::{CellCoord, Faction, UnitSnapshot};
use skirmish_world::{query, World};

/// Adjacent living enemy the unit should strike, if any.
///
/// The enemy with the lowest current health is chosen; ties go to the enemy
/// that comes first in reading order.
#[must_use]
pub fn select_target(world: &World, actor: &UnitSnapshot) -> Option<UnitSnapshot> {
    query::unit_view(world)
        .living()
        .filter(|unit| unit.faction != actor.faction && unit.cell.is_adjacent(actor.cell))
        .min_by_key(|unit| (unit.health, unit.cell))
        .copied()
}

/// Open, unoccupied cells orthogonally adjacent to any living enemy of
/// `faction`, sorted in reading order without duplicates.
#[must_use]
pub fn movement_targets(world: &World, faction: Faction) -> Vec<CellCoord> {
    let grid = query::grid(world);
    let occupancy = query::occupancy_view(world);
    let units = query::unit_view(world);

    let mut cells: Vec<CellCoord> = units
        .living()
        .filter(|unit| unit.faction != faction)
        .flat_map(|enemy| grid.neighbors(enemy.cell))
        .filter(|cell| grid.is_open_and_unoccupied(*cell, occupancy))
        .collect();
    cells.sort();
    cells.dedup();
    cells
}
