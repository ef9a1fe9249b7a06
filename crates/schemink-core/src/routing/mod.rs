//! Interactive orthogonal wire routing.
//!
//! A [`RoutingSession`] lives for the duration of one wire drawing gesture.
//! It is fed pointer positions in world coordinates and maintains the list of
//! committed waypoints, the axis the current leg is locked to, an optional
//! auto-inserted corner and the live endpoint under the pointer. All tolerances
//! are multiples of the active grid pitch, so the router behaves the same at
//! any grid setting.
//!
//! The engine assumes finite coordinates; validation happens where pointer
//! events enter the core (see [`crate::tools::WireTool`]).

mod preview;
mod session;

pub use preview::RoutePreview;
pub use session::RoutingSession;

use crate::component::Component;
use crate::pins::{PIN_DETECTION_RADIUS, PinRef};
use crate::shapes::Wire;
use crate::snap::Grid;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Direction the current leg is locked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One vertex of a route, optionally anchored to a component terminal.
///
/// Anchored waypoints are never moved by the retroactive alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Point,
    pub pin: Option<PinRef>,
}

impl Waypoint {
    /// An unanchored waypoint.
    pub fn free(position: Point) -> Self {
        Self { position, pin: None }
    }

    /// A waypoint sitting on a pin.
    pub fn on_pin(pin: PinRef) -> Self {
        Self {
            position: pin.position,
            pin: Some(pin),
        }
    }

    pub fn is_anchored(&self) -> bool {
        self.pin.is_some()
    }
}

/// Router tolerances.
///
/// The first four are multipliers of the grid pitch. `corner_epsilon` and
/// `pin_detection_radius` are in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingTolerances {
    /// Below this distance from the last waypoint the axis is undecided.
    pub axis_deadzone: f64,
    /// Cross-axis jogs smaller than this are flattened.
    pub orthogonal_clamp: f64,
    /// Per-axis distance within which the target snaps onto a pin.
    pub pin_snap: f64,
    /// Largest retroactive shift of the previous waypoint toward a pin.
    pub waypoint_nudge: f64,
    /// Minimum per-axis difference that calls for a corner.
    pub corner_epsilon: f64,
    /// Hover radius for pin detection.
    pub pin_detection_radius: f64,
}

impl Default for RoutingTolerances {
    fn default() -> Self {
        Self {
            axis_deadzone: 0.15,
            orthogonal_clamp: 0.45,
            pin_snap: 0.75,
            waypoint_nudge: 0.8,
            corner_epsilon: 0.05,
            pin_detection_radius: PIN_DETECTION_RADIUS,
        }
    }
}

/// Everything outside the session that a routing step reads.
#[derive(Debug, Clone, Copy)]
pub struct RoutingContext<'a> {
    /// Placed components, in lookup order.
    pub components: &'a [Component],
    /// Active grid; its pitch scales every tolerance.
    pub grid: Grid,
    pub tolerances: RoutingTolerances,
}

impl<'a> RoutingContext<'a> {
    pub fn new(components: &'a [Component], grid: Grid) -> Self {
        Self {
            components,
            grid,
            tolerances: RoutingTolerances::default(),
        }
    }

    pub fn with_tolerances(mut self, tolerances: RoutingTolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// A grid-relative tolerance in world units.
    pub(crate) fn scaled(&self, multiplier: f64) -> f64 {
        self.grid.size * multiplier
    }
}

/// How a routing session ended.
#[derive(Debug, Clone)]
pub enum RouteOutcome {
    /// A wire with at least two points was produced.
    Committed(Wire),
    /// Nothing is drawn.
    Cancelled,
}

impl RouteOutcome {
    pub fn wire(self) -> Option<Wire> {
        match self {
            RouteOutcome::Committed(w) => Some(w),
            RouteOutcome::Cancelled => None,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, RouteOutcome::Committed(_))
    }
}

/// Router state: idle, or drawing with a live session.
#[derive(Debug, Clone, Default)]
pub enum RouterState {
    #[default]
    Idle,
    Drawing(RoutingSession),
}
