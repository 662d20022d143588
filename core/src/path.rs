//! Fixed route followed by every enemy.

use serde::{Deserialize, Serialize};

use crate::{GridCell, WorldPoint};

/// Corners of the standard route in travel order.
///
/// Consecutive corners share either a column or a row, so the route is made of
/// axis-aligned segments.
pub const STANDARD_WAYPOINTS: [GridCell; 6] = [
    GridCell::new(0, 2),
    GridCell::new(12, 2),
    GridCell::new(12, 6),
    GridCell::new(3, 6),
    GridCell::new(3, 10),
    GridCell::new(15, 10),
];

/// Ordered sequence of waypoints enemies walk through.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    corners: Vec<GridCell>,
    waypoints: Vec<WorldPoint>,
}

impl Path {
    /// Builds a path whose waypoints sit at the centres of the provided cells.
    #[must_use]
    pub fn from_cells(corners: &[GridCell]) -> Self {
        Self {
            corners: corners.to_vec(),
            waypoints: corners.iter().map(|cell| cell.center()).collect(),
        }
    }

    /// Route used by regular games.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_cells(&STANDARD_WAYPOINTS)
    }

    /// Number of waypoints on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Reports whether the path has no waypoints at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Waypoint at the provided index, if the index lies on the path.
    #[must_use]
    pub fn waypoint(&self, index: usize) -> Option<WorldPoint> {
        self.waypoints.get(index).copied()
    }

    /// All waypoints in travel order.
    #[must_use]
    pub fn waypoints(&self) -> &[WorldPoint] {
        &self.waypoints
    }

    /// Position at which enemies enter the field.
    #[must_use]
    pub fn start(&self) -> WorldPoint {
        self.waypoints.first().copied().unwrap_or_default()
    }

    /// Reports whether the cell lies on one of the path segments.
    #[must_use]
    pub fn covers(&self, cell: GridCell) -> bool {
        corners_cover(&self.corners, cell)
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::standard()
    }
}

/// Reports whether the cell lies on the standard route.
#[must_use]
pub fn is_path_cell(cell: GridCell) -> bool {
    corners_cover(&STANDARD_WAYPOINTS, cell)
}

fn corners_cover(corners: &[GridCell], cell: GridCell) -> bool {
    match corners {
        [] => false,
        [only] => *only == cell,
        _ => corners
            .windows(2)
            .any(|pair| segment_covers(pair[0], pair[1], cell)),
    }
}

fn segment_covers(from: GridCell, to: GridCell, cell: GridCell) -> bool {
    if from.column() != to.column() && from.row() != to.row() {
        return cell == from || cell == to;
    }

    let columns = from.column().min(to.column())..=from.column().max(to.column());
    let rows = from.row().min(to.row())..=from.row().max(to.row());
    columns.contains(&cell.column()) && rows.contains(&cell.row())
}
