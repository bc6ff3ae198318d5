#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text map parser that turns a cavern drawing into a grid and unit placements.
//!
//! Maps are rectangular blocks of `#` (wall), `.` (open floor), `E` (elf) and
//! `G` (goblin). Unit symbols stand on open floor.

use std::str::FromStr;

use skirmish_core::{CellCoord, CombatError, CombatRules, Faction, Grid, Placement, Terrain};
use skirmish_world::World;
use thiserror::Error;
use tracing::info;

/// Errors reported while reading a map.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScenarioError {
    /// The text contained no map rows.
    #[error("scenario contains no map rows")]
    Empty,
    /// A row differs in width from the first row.
    #[error("line {line} is {found} cells wide but the map is {expected} cells wide")]
    RaggedRow {
        /// One-based line number of the offending row.
        line: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A character is neither terrain nor a faction marker.
    #[error("unexpected symbol {symbol:?} at line {line}, column {column}")]
    InvalidSymbol {
        /// Offending character.
        symbol: char,
        /// One-based line number.
        line: usize,
        /// One-based column number.
        column: usize,
    },
    /// The map does not fit the coordinate range.
    #[error("map of {columns}x{rows} cells is too large")]
    TooLarge {
        /// Number of columns in the map.
        columns: usize,
        /// Number of rows in the map.
        rows: usize,
    },
    /// The parsed terrain could not form a grid.
    #[error(transparent)]
    Grid(#[from] CombatError),
}

/// Parsed map: terrain plus initial unit placements in reading order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    grid: Grid,
    placements: Vec<Placement>,
}

impl Scenario {
    /// Parses a map drawing.
    ///
    /// Blank lines before and after the drawing are ignored, as is trailing
    /// whitespace on each row.
    pub fn parse(text: &str) -> Result<Self, ScenarioError> {
        let rows: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim_end()))
            .skip_while(|(_, line)| line.is_empty())
            .collect();
        let last_drawn = rows
            .iter()
            .rposition(|(_, line)| !line.is_empty())
            .ok_or(ScenarioError::Empty)?;
        let rows = &rows[..=last_drawn];

        let width = rows[0].1.chars().count();
        let columns = u32::try_from(width);
        let row_count = u32::try_from(rows.len());
        let (Ok(columns), Ok(row_count)) = (columns, row_count) else {
            return Err(ScenarioError::TooLarge {
                columns: width,
                rows: rows.len(),
            });
        };

        let mut cells = Vec::with_capacity(width * rows.len());
        let mut placements = Vec::new();

        for (row, (line_number, line)) in (0_u32..).zip(rows.iter()) {
            let found = line.chars().count();
            if found != width {
                return Err(ScenarioError::RaggedRow {
                    line: *line_number,
                    expected: width,
                    found,
                });
            }

            for (column, symbol) in (0_u32..).zip(line.chars()) {
                if let Some(terrain) = Terrain::from_symbol(symbol) {
                    cells.push(terrain);
                } else if let Some(faction) = Faction::from_symbol(symbol) {
                    cells.push(Terrain::Open);
                    placements.push(Placement::new(faction, CellCoord::new(column, row)));
                } else {
                    return Err(ScenarioError::InvalidSymbol {
                        symbol,
                        line: *line_number,
                        column: column as usize + 1,
                    });
                }
            }
        }

        let scenario = Self {
            grid: Grid::from_cells(columns, row_count, cells)?,
            placements,
        };
        info!(
            columns,
            rows = row_count,
            elves = scenario.count(Faction::Elf),
            goblins = scenario.count(Faction::Goblin),
            "scenario parsed"
        );
        Ok(scenario)
    }

    /// Terrain of the map.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Unit placements in reading order of their start cell.
    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of units placed for the provided faction.
    #[must_use]
    pub fn count(&self, faction: Faction) -> usize {
        self.placements
            .iter()
            .filter(|placement| placement.faction == faction)
            .count()
    }

    /// Builds a world populated with this scenario's units.
    pub fn build_world(&self, rules: CombatRules) -> Result<World, CombatError> {
        World::new(self.grid.clone(), &self.placements, rules)
    }
}

impl FromStr for Scenario {
    type Err = ScenarioError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}
