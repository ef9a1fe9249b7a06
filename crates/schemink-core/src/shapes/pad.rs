//! Component pad shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::point_to_segment_dist;
use kurbo::{Affine, Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Copper outline of a pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PadShape {
    Circle,
    #[default]
    Rect,
    /// Stadium: a rectangle with fully rounded short ends.
    Oval,
}

/// A pad centred on `position`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pad {
    pub(crate) id: ShapeId,
    /// Pad number, matching the component pin it lands.
    pub number: String,
    /// Center position.
    pub position: Point,
    /// Copper size.
    pub size: Size,
    pub shape: PadShape,
    /// Drill diameter for through-hole pads.
    #[serde(default)]
    pub drill: Option<f64>,
    pub style: ShapeStyle,
}

impl Pad {
    pub fn new(number: impl Into<String>, position: Point, size: Size, shape: PadShape) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.into(),
            position,
            size,
            shape,
            drill: None,
            style: ShapeStyle::copper(),
        }
    }

    /// Copper extent without stroke.
    pub fn copper_rect(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }

    pub fn is_through_hole(&self) -> bool {
        self.drill.is_some_and(|d| d > 0.0)
    }
}

impl ShapeTrait for Pad {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let hw = self.style.half_width();
        self.copper_rect().inflate(hw, hw)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let margin = tolerance + self.style.half_width();
        match self.shape {
            PadShape::Rect => self.copper_rect().inflate(margin, margin).contains(point),
            PadShape::Circle => {
                let r = self.size.width.min(self.size.height) / 2.0;
                self.position.distance(point) <= r + margin
            }
            PadShape::Oval => {
                // Distance to the stadium's spine
                let r = self.size.width.min(self.size.height) / 2.0;
                let half_spine = (self.size.width.max(self.size.height) / 2.0 - r).max(0.0);
                let (a, b) = if self.size.width >= self.size.height {
                    (
                        Point::new(self.position.x - half_spine, self.position.y),
                        Point::new(self.position.x + half_spine, self.position.y),
                    )
                } else {
                    (
                        Point::new(self.position.x, self.position.y - half_spine),
                        Point::new(self.position.x, self.position.y + half_spine),
                    )
                };
                point_to_segment_dist(point, a, b) <= r + margin
            }
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        self.position = affine * self.position;
    }
}
