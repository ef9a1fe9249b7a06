//! Grid snapping.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default grid pitch in millimetres (50 mil).
pub const DEFAULT_GRID_SIZE: f64 = 1.27;

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// The active grid: its pitch and whether points snap to it.
///
/// The pitch is authoritative for every routing tolerance, which are all
/// expressed as multiples of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Grid pitch in world units.
    pub size: f64,
    /// Whether points are quantized to the grid.
    pub enabled: bool,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            enabled: true,
        }
    }
}

impl Grid {
    /// Create an enabled grid with the given pitch.
    pub fn new(size: f64) -> Self {
        Self { size, enabled: true }
    }

    /// Snap a point to this grid (identity when snapping is disabled).
    pub fn snap(&self, point: Point) -> Point {
        if self.enabled {
            snap_to_grid(point, self.size)
        } else {
            point
        }
    }
}
