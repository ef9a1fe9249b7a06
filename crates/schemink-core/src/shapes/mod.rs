//! Shape definitions for schematics and boards.

mod arc;
mod circle;
mod line;
mod pad;
mod polygon;
mod rectangle;
mod text;
mod via;
mod wire;

pub use arc::Arc;
pub use circle::Circle;
pub use line::Line;
pub use pad::{Pad, PadShape};
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use text::Text;
pub use via::Via;
pub use wire::{Wire, WireConnections};

use crate::geometry;
use kurbo::{Affine, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// Default schematic wire color.
    pub fn wire_green() -> Self {
        Self::new(0, 132, 0, 255)
    }

    /// Default copper color for pads and vias.
    pub fn copper() -> Self {
        Self::new(200, 117, 51, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Default stroke width in millimetres (10 mil).
pub const DEFAULT_LINE_WIDTH: f64 = 0.254;

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width in world units.
    pub line_width: f64,
    /// Fill color (None = outline only).
    #[serde(default)]
    pub fill_color: Option<SerializableColor>,
}

impl ShapeStyle {
    /// Style for schematic wires.
    pub fn wire() -> Self {
        Self {
            stroke_color: SerializableColor::wire_green(),
            ..Self::default()
        }
    }

    /// Filled copper style for pads and vias.
    pub fn copper() -> Self {
        Self {
            stroke_color: SerializableColor::copper(),
            line_width: 0.0,
            fill_color: Some(SerializableColor::copper()),
        }
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }

    /// Set the stroke color from a peniko Color.
    pub fn set_stroke(&mut self, color: Color) {
        self.stroke_color = color.into();
    }

    /// Half the stroke width, the margin a stroke adds around its geometry.
    pub fn half_width(&self) -> f64 {
        self.line_width / 2.0
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            line_width: DEFAULT_LINE_WIDTH,
            fill_color: None,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in world coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in world coordinates) hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Apply a transform to this shape.
    fn transform(&mut self, affine: Affine);
}

/// Closed set of drawable shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    Line(Line),
    Wire(Wire),
    Circle(Circle),
    Rect(Rectangle),
    Arc(Arc),
    Pad(Pad),
    Via(Via),
    Polygon(Polygon),
    Text(Text),
}

macro_rules! dispatch {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            Shape::Line($s) => $body,
            Shape::Wire($s) => $body,
            Shape::Circle($s) => $body,
            Shape::Rect($s) => $body,
            Shape::Arc($s) => $body,
            Shape::Pad($s) => $body,
            Shape::Via($s) => $body,
            Shape::Polygon($s) => $body,
            Shape::Text($s) => $body,
        }
    };
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        dispatch!(self, s => s.id())
    }

    pub fn bounds(&self) -> Rect {
        dispatch!(self, s => s.bounds())
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        dispatch!(self, s => s.hit_test(point, tolerance))
    }

    pub fn style(&self) -> &ShapeStyle {
        dispatch!(self, s => s.style())
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        dispatch!(self, s => s.style_mut())
    }

    pub fn transform(&mut self, affine: Affine) {
        dispatch!(self, s => s.transform(affine))
    }

    /// Short lowercase name of the shape kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Line(_) => "line",
            Shape::Wire(_) => "wire",
            Shape::Circle(_) => "circle",
            Shape::Rect(_) => "rect",
            Shape::Arc(_) => "arc",
            Shape::Pad(_) => "pad",
            Shape::Via(_) => "via",
            Shape::Polygon(_) => "polygon",
            Shape::Text(_) => "text",
        }
    }

    /// Test if this shape intersects a selection rectangle.
    /// Lines and wires test their segments; other shapes their bounds.
    pub fn intersects_rect(&self, rect: Rect) -> bool {
        match self {
            Shape::Line(l) => geometry::polyline_intersects_rect(&[l.start, l.end], rect),
            Shape::Wire(w) => geometry::polyline_intersects_rect(&w.points, rect),
            _ => {
                let bounds = self.bounds();
                rect.intersect(bounds).area() > 0.0 || rect.contains(bounds.center())
            }
        }
    }

    /// Get the wire if this shape is a wire.
    pub fn as_wire(&self) -> Option<&Wire> {
        match self {
            Shape::Wire(w) => Some(w),
            _ => None,
        }
    }

    /// Regenerate the shape's ID, e.g. when duplicating.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        dispatch!(self, s => s.id = new_id)
    }
}

impl From<Wire> for Shape {
    fn from(wire: Wire) -> Self {
        Shape::Wire(wire)
    }
}
