#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Plain-text presentation of cavern layouts and combat outcomes.

use std::fmt;

use skirmish_core::{CellCoord, Grid, Outcome, UnitSnapshot, UnitView};

/// Renders the cavern with living units drawn over the terrain.
///
/// Every row that holds units is followed by three spaces and the units of
/// that row in reading order, as `G(200), E(131)`.
#[must_use]
pub fn render_layout(grid: &Grid, units: &UnitView) -> String {
    LayoutDisplay { grid, units }.to_string()
}

/// Renders the three-line summary of a finished combat.
#[must_use]
pub fn render_outcome(outcome: &Outcome) -> String {
    OutcomeDisplay(outcome).to_string()
}

struct LayoutDisplay<'a> {
    grid: &'a Grid,
    units: &'a UnitView,
}

impl LayoutDisplay<'_> {
    fn unit_at(&self, cell: CellCoord) -> Option<&UnitSnapshot> {
        self.units.living().find(|unit| unit.cell == cell)
    }
}

impl fmt::Display for LayoutDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.grid.rows() {
            let mut annotations = Vec::new();
            for column in 0..self.grid.columns() {
                let cell = CellCoord::new(column, row);
                if let Some(unit) = self.unit_at(cell) {
                    write!(f, "{}", unit.faction.symbol())?;
                    annotations.push(format!(
                        "{}({})",
                        unit.faction.symbol(),
                        unit.health.get()
                    ));
                } else {
                    let terrain = self.grid.kind_at(cell).map_err(|_| fmt::Error)?;
                    write!(f, "{}", terrain.symbol())?;
                }
            }

            if !annotations.is_empty() {
                write!(f, "   {}", annotations.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

struct OutcomeDisplay<'a>(&'a Outcome);

impl fmt::Display for OutcomeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.0;
        writeln!(
            f,
            "Combat ends after {} full rounds",
            outcome.completed_rounds
        )?;
        writeln!(
            f,
            "{} win with {} total hit points left",
            outcome.winner.plural(),
            outcome.remaining_health
        )?;
        writeln!(
            f,
            "Outcome: {} * {} = {}",
            outcome.completed_rounds,
            outcome.remaining_health,
            outcome.score()
        )
    }
}
