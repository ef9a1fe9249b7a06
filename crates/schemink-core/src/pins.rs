//! Pin lookup: find the connection point nearest to a world position.

use crate::component::{Component, ComponentId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Detection radius for live hover feedback, in world units.
pub const PIN_DETECTION_RADIUS: f64 = 2.0;

/// A resolved connection point.
///
/// Derived from live component transforms on every lookup; never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinRef {
    pub component_id: ComponentId,
    pub pin_number: String,
    pub position: Point,
}

impl PinRef {
    /// Whether two refs name the same terminal, regardless of position.
    pub fn same_terminal(&self, other: &PinRef) -> bool {
        self.component_id == other.component_id && self.pin_number == other.pin_number
    }
}

/// Find the pin nearest to `point` whose distance is strictly below `tolerance`.
///
/// Ties keep the first pin encountered in component order, then pin order.
/// Pins with non-finite offsets are skipped.
pub fn find_nearest_pin(components: &[Component], point: Point, tolerance: f64) -> Option<PinRef> {
    find_nearest_pin_excluding(components, point, tolerance, None)
}

/// Like [`find_nearest_pin`], ignoring the terminal named by `exclude`.
pub fn find_nearest_pin_excluding(
    components: &[Component],
    point: Point,
    tolerance: f64,
    exclude: Option<&PinRef>,
) -> Option<PinRef> {
    let mut best: Option<PinRef> = None;
    let mut best_dist = tolerance;

    for component in components {
        for pin in component.pins.iter().filter(|p| p.is_well_formed()) {
            let excluded = exclude
                .is_some_and(|ex| ex.component_id == component.id() && ex.pin_number == pin.number);
            if excluded {
                continue;
            }
            let position = component.pin_world_position(pin);
            let dist = position.distance(point);
            if dist < best_dist {
                best_dist = dist;
                best = Some(PinRef {
                    component_id: component.id(),
                    pin_number: pin.number.clone(),
                    position,
                });
            }
        }
    }

    best
}
