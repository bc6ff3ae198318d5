#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Cavern Skirmish engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The combat engine submits
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then reports [`Event`] values the
//! engine and any observers react to deterministically. Every ordering decision
//! in the simulation goes through [`CellCoord`]'s reading order or
//! [`Direction::READING_ORDER`], never through container iteration order.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Health every unit starts with unless the rules say otherwise.
pub const DEFAULT_INITIAL_HEALTH: Health = Health::new(200);

/// Attack power every unit starts with unless the rules say otherwise.
pub const DEFAULT_ATTACK_POWER: AttackPower = AttackPower::new(3);

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Requests that a unit advance a single step in the specified direction.
    MoveUnit {
        /// Identifier of the unit attempting to move.
        unit: UnitId,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that one unit strike an adjacent enemy.
    Attack {
        /// Unit delivering the blow.
        attacker: UnitId,
        /// Unit receiving the blow.
        target: UnitId,
    },
    /// Closes the current round, removing fallen units from the live set.
    CompleteRound,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that a unit moved between two cells.
    UnitMoved {
        /// Identifier of the unit that moved.
        unit: UnitId,
        /// Cell the unit occupied before moving.
        from: CellCoord,
        /// Cell the unit occupies after completing the move.
        to: CellCoord,
    },
    /// Confirms that an attack landed.
    UnitAttacked {
        /// Unit that delivered the blow.
        attacker: UnitId,
        /// Unit that received the blow.
        target: UnitId,
        /// Damage dealt by the blow.
        damage: AttackPower,
        /// Health the target has left after the blow.
        remaining: Health,
    },
    /// Reports that an attack brought a unit's health to zero.
    UnitSlain {
        /// Identifier of the fallen unit.
        unit: UnitId,
        /// Faction the fallen unit fought for.
        faction: Faction,
        /// Cell the unit fell on.
        cell: CellCoord,
    },
    /// Announces that a round finished and fallen units were cleared.
    RoundCompleted {
        /// Number of full rounds completed so far, including this one.
        round: u32,
        /// Number of units removed from the live set during cleanup.
        casualties: u32,
    },
    /// Reports that a move request was rejected.
    MoveRejected {
        /// Identifier of the unit that attempted to move.
        unit: UnitId,
        /// Direction requested for the step.
        direction: Direction,
        /// Specific reason the move failed.
        reason: MoveError,
    },
    /// Reports that an attack request was rejected.
    AttackRejected {
        /// Unit that attempted the attack.
        attacker: UnitId,
        /// Unit named as the target.
        target: UnitId,
        /// Specific reason the attack failed.
        reason: AttackError,
    },
}

/// Reasons a move request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveError {
    /// No unit with the provided identifier exists.
    MissingUnit,
    /// The unit has fallen and can no longer act.
    UnitDown,
    /// The destination lies outside the grid.
    OutOfBounds,
    /// The destination is a wall.
    Blocked,
    /// Another unit stands on the destination.
    Occupied,
}

/// Reasons an attack request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackError {
    /// Either unit is unknown to the world.
    MissingUnit,
    /// The attacker has fallen and can no longer act.
    AttackerDown,
    /// The target has already fallen.
    TargetDown,
    /// The target is not orthogonally adjacent to the attacker.
    NotAdjacent,
    /// Both units fight for the same faction.
    SameFaction,
}

/// Errors raised while setting up or addressing the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CombatError {
    /// A coordinate falls outside the grid dimensions.
    #[error("cell {cell} lies outside the {columns}x{rows} grid")]
    OutOfBounds {
        /// Offending coordinate.
        cell: CellCoord,
        /// Number of columns in the grid.
        columns: u32,
        /// Number of rows in the grid.
        rows: u32,
    },
    /// The terrain cell count does not match the grid dimensions.
    #[error("a {columns}x{rows} grid needs {expected} cells but {found} were supplied")]
    DimensionMismatch {
        /// Number of columns requested.
        columns: u32,
        /// Number of rows requested.
        rows: u32,
        /// Cell count implied by the dimensions.
        expected: usize,
        /// Cell count actually supplied.
        found: usize,
    },
    /// A unit was placed on a wall.
    #[error("a unit cannot start on the wall at {cell}")]
    StartOnWall {
        /// Wall cell named by the placement.
        cell: CellCoord,
    },
    /// Two units were placed on the same cell.
    #[error("more than one unit starts at {cell}")]
    StartOccupied {
        /// Cell named by both placements.
        cell: CellCoord,
    },
    /// One or both factions have no units at start.
    #[error("combat needs both factions present but found {elves} elves and {goblins} goblins")]
    MalformedScenario {
        /// Number of elves placed.
        elves: u32,
        /// Number of goblins placed.
        goblins: u32,
    },
    /// Units would start with no hit points.
    #[error("units must start with at least one hit point")]
    ZeroInitialHealth,
    /// A faction would deal no damage, so its enemies could never fall.
    #[error("{faction} attack power must be at least one")]
    ZeroAttackPower {
        /// Faction whose blows deal no damage.
        faction: Faction,
    },
    /// A full round passed without a single move or attack, so no later
    /// round can change anything either.
    #[error("combat stalled after {completed_rounds} rounds with both factions unable to engage")]
    Stalemate {
        /// Full rounds completed when the stall was detected.
        completed_rounds: u32,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Cells compare in reading order: top-to-bottom, then left-to-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Reports whether the two cells share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: CellCoord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Cell one step away in the provided direction, if it has non-negative coordinates.
    ///
    /// Upper bounds are the grid's concern; see [`Grid::neighbors`].
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::Left => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
            Direction::Right => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Direction::Down => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
        }
    }
}

impl Ord for CellCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for CellCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Orthogonal movement directions available to units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
}

impl Direction {
    /// Canonical neighbour enumeration order used for every tie-break.
    ///
    /// The cells reached by these directions from any origin are themselves in
    /// reading order.
    pub const READING_ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Right,
        Direction::Down,
    ];

    /// Direction leading from `from` to the adjacent cell `to`.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Direction> {
        let column_diff = from.column().abs_diff(to.column());
        let row_diff = from.row().abs_diff(to.row());

        if column_diff + row_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if to.column() > from.column() {
                Some(Direction::Right)
            } else {
                Some(Direction::Left)
            }
        } else if to.row() > from.row() {
            Some(Direction::Down)
        } else {
            Some(Direction::Up)
        }
    }
}

/// Terrain classification of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Impassable rock.
    Wall,
    /// Floor that units may stand on.
    Open,
}

impl Terrain {
    /// Map symbol used for this terrain.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Open => '.',
        }
    }

    /// Terrain denoted by the provided map symbol, if any.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '#' => Some(Self::Wall),
            '.' => Some(Self::Open),
            _ => None,
        }
    }
}

/// Immutable terrain map of the cavern.
///
/// Cells are stored in row-major order. The grid never changes after
/// construction; units occupy cells logically through the world's occupancy
/// grid rather than by rewriting terrain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Terrain>,
}

impl Grid {
    /// Creates a grid from row-major terrain cells.
    pub fn from_cells(columns: u32, rows: u32, cells: Vec<Terrain>) -> Result<Self, CombatError> {
        let expected = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(usize::MAX);
        if cells.len() != expected {
            return Err(CombatError::DimensionMismatch {
                columns,
                rows,
                expected,
                found: cells.len(),
            });
        }

        Ok(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Creates a grid in which every cell is open floor.
    #[must_use]
    pub fn open(columns: u32, rows: u32) -> Self {
        let capacity = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![Terrain::Open; capacity],
        }
    }

    /// Returns a copy of the grid with the provided cell turned into wall.
    pub fn with_wall(mut self, cell: CellCoord) -> Result<Self, CombatError> {
        let index = self.checked_index(cell)?;
        self.cells[index] = Terrain::Wall;
        Ok(self)
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the coordinate addresses a cell of this grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Terrain at the provided cell.
    pub fn kind_at(&self, cell: CellCoord) -> Result<Terrain, CombatError> {
        let index = self.checked_index(cell)?;
        Ok(self.cells[index])
    }

    /// Reports whether the cell lies inside the grid and is open floor.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        matches!(self.kind_at(cell), Ok(Terrain::Open))
    }

    /// Reports whether the cell is open floor with no unit standing on it.
    #[must_use]
    pub fn is_open_and_unoccupied(&self, cell: CellCoord, occupancy: OccupancyView<'_>) -> bool {
        self.is_open(cell) && occupancy.is_free(cell)
    }

    /// In-bounds orthogonal neighbours in [`Direction::READING_ORDER`].
    #[must_use]
    pub fn neighbors(&self, cell: CellCoord) -> Neighbors {
        let mut neighbors = Neighbors::default();
        for direction in Direction::READING_ORDER {
            if let Some(next) = cell.step(direction) {
                if self.contains(next) {
                    neighbors.push(next);
                }
            }
        }
        neighbors
    }

    /// Iterates over every cell with its terrain, in reading order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Terrain)> + '_ {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, terrain)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            (CellCoord::new(index % columns, index / columns), *terrain)
        })
    }

    fn checked_index(&self, cell: CellCoord) -> Result<usize, CombatError> {
        if !self.contains(cell) {
            return Err(CombatError::OutOfBounds {
                cell,
                columns: self.columns,
                rows: self.rows,
            });
        }

        let row = cell.row() as usize;
        let column = cell.column() as usize;
        Ok(row * self.columns as usize + column)
    }
}

/// Fixed-capacity iterator over up to four neighbouring cells.
#[derive(Clone, Debug, Default)]
pub struct Neighbors {
    buffer: [Option<CellCoord>; 4],
    len: usize,
    cursor: usize,
}

impl Neighbors {
    fn push(&mut self, cell: CellCoord) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(cell);
            self.len += 1;
        }
    }
}

impl Iterator for Neighbors {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }
}

/// One of the two opposing unit categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    /// Elves, marked `E` on the map.
    Elf,
    /// Goblins, marked `G` on the map.
    Goblin,
}

impl Faction {
    /// Both factions in a fixed order.
    pub const ALL: [Faction; 2] = [Faction::Elf, Faction::Goblin];

    /// Map symbol marking a unit of this faction.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Elf => 'E',
            Self::Goblin => 'G',
        }
    }

    /// Faction denoted by the provided map symbol, if any.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'E' => Some(Self::Elf),
            'G' => Some(Self::Goblin),
            _ => None,
        }
    }

    /// The opposing faction.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Elf => Self::Goblin,
            Self::Goblin => Self::Elf,
        }
    }

    /// Plural name used in reports.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Elf => "Elves",
            Self::Goblin => "Goblins",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Elf => f.write_str("Elf"),
            Self::Goblin => f.write_str("Goblin"),
        }
    }
}

/// Unique identifier assigned to a unit at creation.
///
/// Identifiers are compared for equality only. Nothing orders units by
/// identifier; turn order and targeting go through positions and health.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Remaining hit points of a unit. Zero means the unit has fallen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Health(u32);

impl Health {
    /// Creates a health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the raw hit points.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }

    /// Health left after taking a blow of the provided power.
    #[must_use]
    pub const fn after_hit(self, power: AttackPower) -> Self {
        Self(self.0.saturating_sub(power.get()))
    }
}

/// Damage a unit deals with each blow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttackPower(u32);

impl AttackPower {
    /// Creates an attack power value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the raw damage per blow.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// What happens to the cell of a unit the moment it falls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpsePolicy {
    /// The fallen unit keeps blocking its cell until the round completes.
    #[default]
    BlockUntilRoundEnd,
    /// The fallen unit is removed and its cell freed immediately.
    ClearImmediately,
}

/// Tunable combat parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CombatRules {
    initial_health: Health,
    elf_attack: AttackPower,
    goblin_attack: AttackPower,
    corpses: CorpsePolicy,
}

impl CombatRules {
    /// Standard rules: 200 health and 3 attack power on both sides.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_health: DEFAULT_INITIAL_HEALTH,
            elf_attack: DEFAULT_ATTACK_POWER,
            goblin_attack: DEFAULT_ATTACK_POWER,
            corpses: CorpsePolicy::BlockUntilRoundEnd,
        }
    }

    /// Overrides the health every unit starts with.
    #[must_use]
    pub const fn with_initial_health(mut self, health: Health) -> Self {
        self.initial_health = health;
        self
    }

    /// Overrides the attack power of the provided faction.
    #[must_use]
    pub const fn with_attack(mut self, faction: Faction, power: AttackPower) -> Self {
        match faction {
            Faction::Elf => self.elf_attack = power,
            Faction::Goblin => self.goblin_attack = power,
        }
        self
    }

    /// Overrides the corpse policy.
    #[must_use]
    pub const fn with_corpses(mut self, corpses: CorpsePolicy) -> Self {
        self.corpses = corpses;
        self
    }

    /// Health every unit starts with.
    #[must_use]
    pub const fn initial_health(&self) -> Health {
        self.initial_health
    }

    /// Attack power of units of the provided faction.
    #[must_use]
    pub const fn attack_power(&self, faction: Faction) -> AttackPower {
        match faction {
            Faction::Elf => self.elf_attack,
            Faction::Goblin => self.goblin_attack,
        }
    }

    /// Policy applied to the cells of fallen units.
    #[must_use]
    pub const fn corpses(&self) -> CorpsePolicy {
        self.corpses
    }

    /// Checks that every unit can both survive the start and wound an enemy.
    pub fn validate(&self) -> Result<(), CombatError> {
        if self.initial_health.is_depleted() {
            return Err(CombatError::ZeroInitialHealth);
        }
        match Faction::ALL
            .into_iter()
            .find(|&faction| self.attack_power(faction).get() == 0)
        {
            Some(faction) => Err(CombatError::ZeroAttackPower { faction }),
            None => Ok(()),
        }
    }
}

impl Default for CombatRules {
    fn default() -> Self {
        Self::new()
    }
}

/// Initial position of a unit handed over by the scenario parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Faction the unit fights for.
    pub faction: Faction,
    /// Cell the unit starts on.
    pub cell: CellCoord,
}

impl Placement {
    /// Creates a placement for a unit of `faction` at `cell`.
    #[must_use]
    pub const fn new(faction: Faction, cell: CellCoord) -> Self {
        Self { faction, cell }
    }
}

/// Immutable representation of a single unit's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UnitSnapshot {
    /// Unique identifier assigned to the unit.
    pub id: UnitId,
    /// Faction the unit fights for.
    pub faction: Faction,
    /// Grid cell currently occupied by the unit.
    pub cell: CellCoord,
    /// Hit points the unit has left.
    pub health: Health,
    /// Damage the unit deals per blow.
    pub attack: AttackPower,
}

impl UnitSnapshot {
    /// Reports whether the unit still has hit points.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }
}

/// Read-only snapshot describing all units in the cavern.
#[derive(Clone, Debug, Default)]
pub struct UnitView {
    snapshots: Vec<UnitSnapshot>,
}

impl UnitView {
    /// Creates a new unit view, ordering the snapshots by reading order of cell.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<UnitSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.cell);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in reading order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitSnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over the snapshots of units that still have hit points.
    pub fn living(&self) -> impl Iterator<Item = &UnitSnapshot> {
        self.snapshots.iter().filter(|snapshot| snapshot.is_alive())
    }

    /// Snapshot of the unit with the provided identifier.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&UnitSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<UnitSnapshot> {
        self.snapshots
    }
}

/// Read-only view into the dense occupancy grid.
#[derive(Clone, Copy, Debug)]
pub struct OccupancyView<'a> {
    cells: &'a [Option<UnitId>],
    columns: u32,
    rows: u32,
}

impl<'a> OccupancyView<'a> {
    /// Captures a new occupancy view backed by the provided cell slice.
    #[must_use]
    pub fn new(cells: &'a [Option<UnitId>], columns: u32, rows: u32) -> Self {
        Self {
            cells,
            columns,
            rows,
        }
    }

    /// Returns the unit occupying the provided cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<UnitId> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    /// Reports whether no unit stands on the cell.
    #[must_use]
    pub fn is_free(&self, cell: CellCoord) -> bool {
        self.occupant(cell).is_none()
    }

    /// Provides the dimensions of the underlying occupancy grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
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
}

/// Number of living units per faction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FactionCounts {
    /// Living elves.
    pub elves: u32,
    /// Living goblins.
    pub goblins: u32,
}

impl FactionCounts {
    /// Living units of the provided faction.
    #[must_use]
    pub const fn of(&self, faction: Faction) -> u32 {
        match faction {
            Faction::Elf => self.elves,
            Faction::Goblin => self.goblins,
        }
    }

    /// Living units across both factions.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.elves + self.goblins
    }

    /// The only faction with living units, if exactly one remains.
    #[must_use]
    pub const fn sole_survivor(&self) -> Option<Faction> {
        match (self.elves > 0, self.goblins > 0) {
            (true, false) => Some(Faction::Elf),
            (false, true) => Some(Faction::Goblin),
            _ => None,
        }
    }
}

/// Final result of a combat run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    /// Full rounds completed before combat ended.
    pub completed_rounds: u32,
    /// Sum of the health of every surviving unit.
    pub remaining_health: u32,
    /// Faction left standing.
    pub winner: Faction,
}

impl Outcome {
    /// Completed rounds multiplied by remaining health.
    #[must_use]
    pub fn score(&self) -> u64 {
        u64::from(self.completed_rounds) * u64::from(self.remaining_health)
    }
}
