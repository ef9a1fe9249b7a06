//! Circle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle, outlined or filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Radius in world units.
    pub radius: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            style: ShapeStyle::default(),
        }
    }

    /// Create a circle from its center and a point on its rim.
    pub fn from_center_and_rim(center: Point, rim: Point) -> Self {
        Self::new(center, center.distance(rim))
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let r = self.radius + self.style.half_width();
        Rect::new(self.center.x - r, self.center.y - r, self.center.x + r, self.center.y + r)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dist = self.center.distance(point);
        let margin = tolerance + self.style.half_width();
        if self.style.fill_color.is_some() {
            dist <= self.radius + margin
        } else {
            (dist - self.radius).abs() <= margin
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        let rim = affine * Point::new(self.center.x + self.radius, self.center.y);
        self.center = affine * self.center;
        self.radius = self.center.distance(rim);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::SerializableColor;

    #[test]
    fn test_outline_hit_only_near_rim() {
        let mut c = Circle::new(Point::ZERO, 5.0);
        c.style.line_width = 0.0;
        assert!(c.hit_test(Point::new(5.2, 0.0), 0.5));
        assert!(!c.hit_test(Point::new(1.0, 1.0), 0.5));
    }

    #[test]
    fn test_filled_hit_inside() {
        let mut c = Circle::new(Point::ZERO, 5.0);
        c.style.fill_color = Some(SerializableColor::black());
        assert!(c.hit_test(Point::new(1.0, 1.0), 0.0));
        assert!(!c.hit_test(Point::new(7.0, 0.0), 0.5));
    }

    #[test]
    fn test_from_center_and_rim() {
        let c = Circle::from_center_and_rim(Point::ZERO, Point::new(3.0, 4.0));
        assert!((c.radius - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_transform_scales_radius() {
        let mut c = Circle::new(Point::new(1.0, 1.0), 2.0);
        c.transform(Affine::scale(2.0));
        assert_eq!(c.center, Point::new(2.0, 2.0));
        assert!((c.radius - 4.0).abs() < 1e-12);
    }
}
