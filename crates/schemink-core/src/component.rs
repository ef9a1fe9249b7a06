//! Placed components and the pins they expose.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for placed components.
pub type ComponentId = Uuid;

/// A named connection point in component-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    /// Pin number as printed on the symbol ("1", "A3", ...).
    pub number: String,
    /// Pin name ("VCC", "OUT", ...).
    #[serde(default)]
    pub name: String,
    /// Offset from the component origin.
    pub offset: Vec2,
}

impl Pin {
    pub fn new(number: impl Into<String>, offset: Vec2) -> Self {
        Self {
            number: number.into(),
            name: String::new(),
            offset,
        }
    }

    /// A pin whose offset is not finite cannot be located.
    pub fn is_well_formed(&self) -> bool {
        self.offset.x.is_finite() && self.offset.y.is_finite()
    }
}

/// A component instance placed on the sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub(crate) id: ComponentId,
    /// Reference designator ("R1", "U3", ...).
    pub reference: String,
    /// Placement origin in world coordinates.
    pub origin: Point,
    /// Rotation in radians. Not applied to pin offsets.
    #[serde(default)]
    pub rotation: f64,
    /// Horizontal mirror flag. Not applied to pin offsets.
    #[serde(default)]
    pub mirrored: bool,
    /// Exposed pins.
    #[serde(default)]
    pub pins: Vec<Pin>,
}

impl Component {
    /// Create a new component at `origin`.
    pub fn new(reference: impl Into<String>, origin: Point, pins: Vec<Pin>) -> Self {
        Self {
            id: Uuid::new_v4(),
            reference: reference.into(),
            origin,
            rotation: 0.0,
            mirrored: false,
            pins,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// World position of one of this component's pins.
    ///
    /// Pins are treated as axis-aligned relative to an unrotated component:
    /// rotation and mirroring are deliberately ignored here so that snap
    /// coordinates match those of existing documents.
    pub fn pin_world_position(&self, pin: &Pin) -> Point {
        self.origin + pin.offset
    }

    /// Look up a pin by number.
    pub fn pin(&self, number: &str) -> Option<&Pin> {
        self.pins.iter().find(|p| p.number == number)
    }

    /// Move the component by a world-space delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }
}
