//! Breadth-first distance fields over the cavern grid.

use std::collections::VecDeque;

use skirmish_core::{CellCoord, Grid};

/// Dense step-count grid produced by a single-source breadth-first search.
///
/// Distances are stored in row-major order and default to `u32::MAX` for
/// cells the search never reached, so callers can tell walls and sealed-off
/// pockets apart from traversable floor. Fields are built for one decision and
/// then dropped.
#[derive(Clone, Debug)]
pub struct DistanceField {
    width: u32,
    height: u32,
    distances: Vec<u32>,
}

impl DistanceField {
    /// Floods the grid outward from `seed`, entering only cells for which
    /// `is_passable` holds.
    ///
    /// The seed itself is always at distance zero, even when it would not be
    /// passable; the acting unit stands on its own start cell.
    pub fn flood<F>(grid: &Grid, seed: CellCoord, mut is_passable: F) -> Self
    where
        F: FnMut(CellCoord) -> bool,
    {
        let width = grid.columns();
        let height = grid.rows();
        let width_usize = usize::try_from(width).unwrap_or(0);
        let height_usize = usize::try_from(height).unwrap_or(0);
        let cell_count = width_usize.checked_mul(height_usize).unwrap_or(0);

        let mut field = Self {
            width,
            height,
            distances: vec![u32::MAX; cell_count],
        };

        let Some(seed_index) = field.index(seed) else {
            return field;
        };
        field.distances[seed_index] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(seed);

        while let Some(cell) = queue.pop_front() {
            let Some(current_index) = field.index(cell) else {
                continue;
            };
            let next_distance = field.distances[current_index].saturating_add(1);

            for neighbor in grid.neighbors(cell) {
                let Some(neighbor_index) = field.index(neighbor) else {
                    continue;
                };

                if field.distances[neighbor_index] <= next_distance {
                    continue;
                }

                if !is_passable(neighbor) {
                    continue;
                }

                field.distances[neighbor_index] = next_distance;
                queue.push_back(neighbor);
            }
        }

        field
    }

    /// Minimum step count from the seed to the cell, if the cell was reached.
    #[must_use]
    pub fn distance(&self, cell: CellCoord) -> Option<u32> {
        self.index(cell)
            .and_then(|index| self.distances.get(index).copied())
            .filter(|distance| *distance != u32::MAX)
    }

    /// Iterates over every reached cell with its distance, in reading order.
    pub fn reached(&self) -> impl Iterator<Item = (CellCoord, u32)> + '_ {
        let width = self.width.max(1);
        self.distances
            .iter()
            .enumerate()
            .filter(|(_, distance)| **distance != u32::MAX)
            .map(move |(index, distance)| {
                let index = u32::try_from(index).unwrap_or(u32::MAX);
                (CellCoord::new(index % width, index / width), *distance)
            })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() >= self.width || cell.row() >= self.height {
            return None;
        }

        let width = usize::try_from(self.width).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}
