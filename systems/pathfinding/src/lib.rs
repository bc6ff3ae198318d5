#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic path finder that decides a unit's next step toward the
//! nearest reachable target cell.
//!
//! A decision runs in two phases. An outward search from the unit picks the
//! destination: the nearest reachable target, ties broken by reading order.
//! A reverse search from that destination then ranks the unit's open
//! neighbours by their remaining distance, ties again broken by reading order.
//! Only the first step is ever produced; the full path is never stored.

mod field;

pub use field::DistanceField;

use skirmish_core::{CellCoord, Direction, Grid, OccupancyView};

/// Result of a single movement decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// The unit already stands on the selected target cell.
    Arrived,
    /// The unit should take one step toward the selected destination.
    Step {
        /// Target cell the unit is heading for.
        destination: CellCoord,
        /// Cell the unit should enter this turn.
        next: CellCoord,
        /// Direction leading from the unit to `next`.
        direction: Direction,
        /// Steps between the unit's current cell and the destination.
        distance: u32,
    },
    /// None of the target cells can be reached this turn.
    NoReachableTarget,
}

/// Stateless path finder; every decision floods fresh distance fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathFinder;

impl PathFinder {
    /// Creates a new path finder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Decides how the unit standing on `origin` should move toward `targets`.
    ///
    /// Cells are passable when they are open floor and unoccupied; the origin
    /// is exempt because the deciding unit stands on it.
    #[must_use]
    pub fn route(
        &self,
        grid: &Grid,
        occupancy: OccupancyView<'_>,
        origin: CellCoord,
        targets: &[CellCoord],
    ) -> Route {
        let is_passable = |cell: CellCoord| grid.is_open_and_unoccupied(cell, occupancy);

        let outward = DistanceField::flood(grid, origin, is_passable);
        let Some(destination) = select_destination(&outward, targets) else {
            return Route::NoReachableTarget;
        };

        if destination.cell == origin {
            return Route::Arrived;
        }

        let inward = DistanceField::flood(grid, destination.cell, |cell| {
            cell != origin && is_passable(cell)
        });
        let Some(step) = select_step(grid, &inward, origin, is_passable) else {
            return Route::NoReachableTarget;
        };

        let Some(direction) = Direction::between(origin, step.cell) else {
            return Route::NoReachableTarget;
        };

        Route::Step {
            destination: destination.cell,
            next: step.cell,
            direction,
            distance: destination.distance,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    cell: CellCoord,
    distance: u32,
}

impl Candidate {
    fn is_better_than(self, other: Candidate) -> bool {
        (self.distance, self.cell) < (other.distance, other.cell)
    }
}

fn select_destination(field: &DistanceField, targets: &[CellCoord]) -> Option<Candidate> {
    best_candidate(targets.iter().filter_map(|cell| {
        field.distance(*cell).map(|distance| Candidate {
            cell: *cell,
            distance,
        })
    }))
}

fn select_step<F>(
    grid: &Grid,
    field: &DistanceField,
    origin: CellCoord,
    is_passable: F,
) -> Option<Candidate>
where
    F: Fn(CellCoord) -> bool,
{
    best_candidate(
        grid.neighbors(origin)
            .filter(|cell| is_passable(*cell))
            .filter_map(|cell| {
                field
                    .distance(cell)
                    .map(|distance| Candidate { cell, distance })
            }),
    )
}

fn best_candidate(candidates: impl Iterator<Item = Candidate>) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for candidate in candidates {
        best = Some(match best {
            Some(existing) if !candidate.is_better_than(existing) => existing,
            _ => candidate,
        });
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_rank_by_distance_then_reading_order() {
        let near = Candidate {
            cell: CellCoord::new(5, 5),
            distance: 2,
        };
        let far = Candidate {
            cell: CellCoord::new(0, 0),
            distance: 3,
        };
        let upper = Candidate {
            cell: CellCoord::new(9, 4),
            distance: 2,
        };

        assert!(near.is_better_than(far));
        assert!(upper.is_better_than(near));
        assert!(!near.is_better_than(near));
    }

    #[test]
    fn best_candidate_keeps_first_of_equals() {
        let cell = CellCoord::new(1, 1);
        let best = best_candidate(
            [
                Candidate { cell, distance: 4 },
                Candidate { cell, distance: 4 },
            ]
            .into_iter(),
        );
        assert_eq!(best.map(|candidate| candidate.distance), Some(4));
        assert!(best_candidate(std::iter::empty()).is_none());
    }
}
