#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Cavern Skirmish.
//!
//! The world owns the live unit set and the occupancy grid. It changes only
//! through [`apply`], which validates each [`Command`] and reports the outcome
//! as [`Event`] values. Read access goes through the [`query`] module.

use skirmish_core::{
    AttackError, AttackPower, CellCoord, CombatError, CombatRules, Command, CorpsePolicy,
    Direction, Event, Faction, Grid, Health, MoveError, Placement, Terrain, UnitId, UnitSnapshot,
};

/// Represents the authoritative Cavern Skirmish world state.
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    rules: CombatRules,
    units: Vec<Unit>,
    occupancy: OccupancyGrid,
    completed_rounds: u32,
    slain_this_round: u32,
}

impl World {
    /// Creates a world from a terrain grid and the initial unit placements.
    ///
    /// Units receive identifiers in placement order. Every structural problem
    /// is reported here, before any round runs, as are rules under which
    /// units start dead or deal no damage.
    pub fn new(
        grid: Grid,
        placements: &[Placement],
        rules: CombatRules,
    ) -> Result<Self, CombatError> {
        rules.validate()?;
        let mut occupancy = OccupancyGrid::new(grid.columns(), grid.rows());
        let mut units = Vec::with_capacity(placements.len());
        let mut elves = 0;
        let mut goblins = 0;

        for (index, placement) in placements.iter().enumerate() {
            let cell = placement.cell;
            if grid.kind_at(cell)? == Terrain::Wall {
                return Err(CombatError::StartOnWall { cell });
            }
            if !occupancy.is_free(cell) {
                return Err(CombatError::StartOccupied { cell });
            }

            let id = UnitId::new(u32::try_from(index).unwrap_or(u32::MAX));
            occupancy.occupy(id, cell);
            units.push(Unit {
                id,
                faction: placement.faction,
                cell,
                health: rules.initial_health(),
                attack: rules.attack_power(placement.faction),
            });

            match placement.faction {
                Faction::Elf => elves += 1,
                Faction::Goblin => goblins += 1,
            }
        }

        if elves == 0 || goblins == 0 {
            return Err(CombatError::MalformedScenario { elves, goblins });
        }

        Ok(Self {
            grid,
            rules,
            units,
            occupancy,
            completed_rounds: 0,
            slain_this_round: 0,
        })
    }

    fn unit_index(&self, id: UnitId) -> Option<usize> {
        self.units.iter().position(|unit| unit.id == id)
    }

    fn move_unit(&mut self, id: UnitId, direction: Direction, out_events: &mut Vec<Event>) {
        let reject = |reason| Event::MoveRejected {
            unit: id,
            direction,
            reason,
        };

        let Some(index) = self.unit_index(id) else {
            out_events.push(reject(MoveError::MissingUnit));
            return;
        };

        let from = self.units[index].cell;
        if !self.units[index].is_alive() {
            out_events.push(reject(MoveError::UnitDown));
            return;
        }

        let Some(to) = from.step(direction).filter(|cell| self.grid.contains(*cell)) else {
            out_events.push(reject(MoveError::OutOfBounds));
            return;
        };

        if !self.grid.is_open(to) {
            out_events.push(reject(MoveError::Blocked));
            return;
        }

        if !self.occupancy.is_free(to) {
            out_events.push(reject(MoveError::Occupied));
            return;
        }

        self.occupancy.vacate(from);
        self.occupancy.occupy(id, to);
        self.units[index].cell = to;
        out_events.push(Event::UnitMoved { unit: id, from, to });
    }

    fn attack(&mut self, attacker: UnitId, target: UnitId, out_events: &mut Vec<Event>) {
        let reject = |reason| Event::AttackRejected {
            attacker,
            target,
            reason,
        };

        let (Some(attacker_index), Some(target_index)) =
            (self.unit_index(attacker), self.unit_index(target))
        else {
            out_events.push(reject(AttackError::MissingUnit));
            return;
        };

        let striker = self.units[attacker_index];
        let victim = self.units[target_index];

        if !striker.is_alive() {
            out_events.push(reject(AttackError::AttackerDown));
            return;
        }
        if !victim.is_alive() {
            out_events.push(reject(AttackError::TargetDown));
            return;
        }
        if striker.faction == victim.faction {
            out_events.push(reject(AttackError::SameFaction));
            return;
        }
        if !striker.cell.is_adjacent(victim.cell) {
            out_events.push(reject(AttackError::NotAdjacent));
            return;
        }

        let remaining = victim.health.after_hit(striker.attack);
        self.units[target_index].health = remaining;
        out_events.push(Event::UnitAttacked {
            attacker,
            target,
            damage: striker.attack,
            remaining,
        });

        if !remaining.is_depleted() {
            return;
        }

        self.slain_this_round += 1;
        out_events.push(Event::UnitSlain {
            unit: target,
            faction: victim.faction,
            cell: victim.cell,
        });

        if self.rules.corpses() == CorpsePolicy::ClearImmediately {
            self.occupancy.vacate(victim.cell);
            let _ = self.units.remove(target_index);
        }
    }

    fn complete_round(&mut self, out_events: &mut Vec<Event>) {
        let fallen: Vec<CellCoord> = self
            .units
            .iter()
            .filter(|unit| !unit.is_alive())
            .map(|unit| unit.cell)
            .collect();
        for cell in fallen {
            self.occupancy.vacate(cell);
        }
        self.units.retain(Unit::is_alive);

        self.completed_rounds = self.completed_rounds.saturating_add(1);
        out_events.push(Event::RoundCompleted {
            round: self.completed_rounds,
            casualties: self.slain_this_round,
        });
        self.slain_this_round = 0;
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MoveUnit { unit, direction } => world.move_unit(unit, direction, out_events),
        Command::Attack { attacker, target } => world.attack(attacker, target, out_events),
        Command::CompleteRound => world.complete_round(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use skirmish_core::{
        CombatRules, Faction, FactionCounts, Grid, OccupancyView, Outcome, UnitId, UnitSnapshot,
        UnitView,
    };

    use super::World;

    /// Provides read-only access to the terrain grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Rules the world was created with.
    #[must_use]
    pub fn rules(world: &World) -> CombatRules {
        world.rules
    }

    /// Captures a read-only view of every unit still in the live set.
    ///
    /// Units slain this round stay in the view, with depleted health, until the
    /// round completes.
    #[must_use]
    pub fn unit_view(world: &World) -> UnitView {
        UnitView::from_snapshots(world.units.iter().map(|unit| unit.snapshot()).collect())
    }

    /// Snapshot of a single unit, if it is still in the live set.
    #[must_use]
    pub fn unit(world: &World, id: UnitId) -> Option<UnitSnapshot> {
        world
            .units
            .iter()
            .find(|unit| unit.id == id)
            .map(|unit| unit.snapshot())
    }

    /// Exposes a read-only view of the dense occupancy grid.
    #[must_use]
    pub fn occupancy_view(world: &World) -> OccupancyView<'_> {
        let (columns, rows) = world.occupancy.dimensions();
        OccupancyView::new(world.occupancy.cells(), columns, rows)
    }

    /// Counts the units of each faction that still have hit points.
    #[must_use]
    pub fn faction_counts(world: &World) -> FactionCounts {
        let mut counts = FactionCounts::default();
        for unit in world.units.iter().filter(|unit| unit.is_alive()) {
            match unit.faction {
                Faction::Elf => counts.elves += 1,
                Faction::Goblin => counts.goblins += 1,
            }
        }
        counts
    }

    /// Number of full rounds completed so far.
    #[must_use]
    pub fn completed_rounds(world: &World) -> u32 {
        world.completed_rounds
    }

    /// Sum of the hit points of every unit that is still alive.
    #[must_use]
    pub fn remaining_health(world: &World) -> u32 {
        world
            .units
            .iter()
            .map(|unit| unit.health.get())
            .fold(0_u32, u32::saturating_add)
    }

    /// Final outcome, once only one faction has living units.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        let winner = faction_counts(world).sole_survivor()?;
        Some(Outcome {
            completed_rounds: completed_rounds(world),
            remaining_health: remaining_health(world),
            winner,
        })
    }
}

#[derive(Clone, Copy, Debug)]
struct Unit {
    id: UnitId,
    faction: Faction,
    cell: CellCoord,
    health: Health,
    attack: AttackPower,
}

impl Unit {
    fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }

    fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            id: self.id,
            faction: self.faction,
            cell: self.cell,
            health: self.health,
            attack: self.attack,
        }
    }
}

#[derive(Clone, Debug)]
struct OccupancyGrid {
    columns: u32,
    rows: u32,
    cells: Vec<Option<UnitId>>,
}

impl OccupancyGrid {
    fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![None; capacity],
        }
    }

    fn is_free(&self, cell: CellCoord) -> bool {
        self.index(cell).map_or(false, |index| {
            self.cells.get(index).copied().unwrap_or(None).is_none()
        })
    }

    fn occupy(&mut self, unit: UnitId, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = Some(unit);
            }
        }
    }

    fn vacate(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = None;
            }
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    fn cells(&self) -> &[Option<UnitId>] {
        &self.cells
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }
}
