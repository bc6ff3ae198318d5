use proptest::prelude::*;

use skirmish_core::{CellCoord, Direction, Grid, OccupancyView, Terrain, UnitId};
use skirmish_system_pathfinding::{DistanceField, PathFinder, Route};

/// Terrain plus unit cells read from a map drawing. Any letter marks a unit.
struct Layout {
    grid: Grid,
    occupants: Vec<Option<UnitId>>,
}

impl Layout {
    fn parse(map: &str) -> Self {
        let rows: Vec<&str> = map.lines().filter(|line| !line.is_empty()).collect();
        let columns = rows[0].len() as u32;
        let mut cells = Vec::new();
        let mut occupants = Vec::new();
        let mut next_id = 0;

        for row in &rows {
            for symbol in row.chars() {
                if symbol == '#' {
                    cells.push(Terrain::Wall);
                    occupants.push(None);
                } else if symbol == '.' {
                    cells.push(Terrain::Open);
                    occupants.push(None);
                } else {
                    cells.push(Terrain::Open);
                    occupants.push(Some(UnitId::new(next_id)));
                    next_id += 1;
                }
            }
        }

        Self {
            grid: Grid::from_cells(columns, rows.len() as u32, cells).expect("rectangular map"),
            occupants,
        }
    }

    fn occupancy(&self) -> OccupancyView<'_> {
        OccupancyView::new(&self.occupants, self.grid.columns(), self.grid.rows())
    }

    fn route(&self, origin: CellCoord, targets: &[CellCoord]) -> Route {
        PathFinder::new().route(&self.grid, self.occupancy(), origin, targets)
    }
}

#[test]
fn nearest_target_wins_by_reading_order() {
    let layout = Layout::parse(
        "\
#######
#E..G.#
#...#.#
#.G.#G#
#######
",
    );
    let targets = [
        CellCoord::new(3, 1),
        CellCoord::new(5, 1),
        CellCoord::new(2, 2),
        CellCoord::new(5, 2),
        CellCoord::new(1, 3),
        CellCoord::new(3, 3),
    ];

    assert_eq!(
        layout.route(CellCoord::new(1, 1), &targets),
        Route::Step {
            destination: CellCoord::new(3, 1),
            next: CellCoord::new(2, 1),
            direction: Direction::Right,
            distance: 2,
        }
    );
}

#[test]
fn first_step_breaks_ties_by_reading_order() {
    let layout = Layout::parse(
        "\
#######
#.E...#
#.....#
#...G.#
#######
",
    );
    let targets = [
        CellCoord::new(4, 2),
        CellCoord::new(3, 3),
        CellCoord::new(5, 3),
    ];

    assert_eq!(
        layout.route(CellCoord::new(2, 1), &targets),
        Route::Step {
            destination: CellCoord::new(4, 2),
            next: CellCoord::new(3, 1),
            direction: Direction::Right,
            distance: 3,
        }
    );
}

#[test]
fn allies_force_a_detour() {
    let layout = Layout::parse(
        "\
######
#EE.G#
#....#
######
",
    );

    assert_eq!(
        layout.route(
            CellCoord::new(1, 1),
            &[CellCoord::new(3, 1), CellCoord::new(4, 2)]
        ),
        Route::Step {
            destination: CellCoord::new(3, 1),
            next: CellCoord::new(1, 2),
            direction: Direction::Down,
            distance: 4,
        }
    );
}

#[test]
fn unreachable_targets_hold_the_unit() {
    let layout = Layout::parse(
        "\
######
#E#.G#
######
",
    );

    assert_eq!(
        layout.route(CellCoord::new(1, 1), &[CellCoord::new(3, 1)]),
        Route::NoReachableTarget
    );
    assert_eq!(layout.route(CellCoord::new(1, 1), &[]), Route::NoReachableTarget);
}

#[test]
fn standing_on_a_target_reports_arrival() {
    let layout = Layout::parse("#####\n#E.G#\n#####\n");

    assert_eq!(
        layout.route(CellCoord::new(1, 1), &[CellCoord::new(1, 1)]),
        Route::Arrived
    );
}

/// Distances by repeated relaxation until nothing changes.
fn relaxed_distances(grid: &Grid, seed: CellCoord, blocked: &[bool]) -> Vec<Option<u32>> {
    let columns = grid.columns();
    let index = |cell: CellCoord| (cell.row() * columns + cell.column()) as usize;
    let mut distances: Vec<Option<u32>> = vec![None; blocked.len()];
    distances[index(seed)] = Some(0);

    let mut changed = true;
    while changed {
        changed = false;
        for (cell, _) in grid.iter() {
            if blocked[index(cell)] {
                continue;
            }
            let best = grid
                .neighbors(cell)
                .filter_map(|neighbor| distances[index(neighbor)])
                .min()
                .map(|distance| distance + 1);
            if let Some(candidate) = best {
                if distances[index(cell)].map_or(true, |current| candidate < current) {
                    distances[index(cell)] = Some(candidate);
                    changed = true;
                }
            }
        }
    }
    distances
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Breadth-first distances equal the fixed point of edge relaxation.
    #[test]
    fn prop_flood_distances_are_minimal(
        columns in 1_u32..9,
        rows in 1_u32..9,
        blocked in prop::collection::vec(prop::bool::weighted(0.3), 64),
        seed_column in 0_u32..9,
        seed_row in 0_u32..9,
    ) {
        let grid = Grid::open(columns, rows);
        let seed = CellCoord::new(seed_column % columns, seed_row % rows);
        let count = (columns * rows) as usize;
        let mut blocked = blocked[..count].to_vec();
        blocked[(seed.row() * columns + seed.column()) as usize] = false;

        let field = DistanceField::flood(&grid, seed, |cell| {
            !blocked[(cell.row() * columns + cell.column()) as usize]
        });
        let expected = relaxed_distances(&grid, seed, &blocked);

        for (cell, _) in grid.iter() {
            prop_assert_eq!(
                field.distance(cell),
                expected[(cell.row() * columns + cell.column()) as usize],
                "cell {}", cell
            );
        }
    }
}
