//! Via shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A plated through-hole connecting copper layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Via {
    pub(crate) id: ShapeId,
    pub position: Point,
    /// Outer copper diameter.
    pub diameter: f64,
    /// Drill diameter.
    pub drill: f64,
    /// Net the via belongs to.
    #[serde(default)]
    pub net: String,
    pub style: ShapeStyle,
}

impl Via {
    pub fn new(position: Point, diameter: f64, drill: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            diameter,
            drill,
            net: String::new(),
            style: ShapeStyle::copper(),
        }
    }

    /// Copper left around the drill on each side.
    pub fn annular_ring(&self) -> f64 {
        (self.diameter - self.drill) / 2.0
    }
}

impl ShapeTrait for Via {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let r = self.diameter / 2.0;
        Rect::from_center_size(self.position, (2.0 * r, 2.0 * r))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.position.distance(point) <= self.diameter / 2.0 + tolerance
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_via_hit_and_ring() {
        let via = Via::new(Point::new(1.0, 1.0), 0.6, 0.3);
        assert!(via.hit_test(Point::new(1.25, 1.0), 0.0));
        assert!(!via.hit_test(Point::new(1.5, 1.0), 0.1));
        assert!((via.annular_ring() - 0.15).abs() < 1e-12);
    }
}
