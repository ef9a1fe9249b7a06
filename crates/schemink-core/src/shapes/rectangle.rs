//! Rectangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            style: ShapeStyle::default(),
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let r = Rect::from_points(p1, p2);
        Self::new(r.origin(), r.width(), r.height())
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let hw = self.style.half_width();
        self.as_rect().inflate(hw, hw)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rect = self.as_rect();
        let margin = tolerance + self.style.half_width();
        if self.style.fill_color.is_some() {
            // Filled: hit anywhere inside
            rect.inflate(margin, margin).contains(point)
        } else {
            // Outline only: hit on the border
            let outer = rect.inflate(margin, margin);
            let inner = rect.inflate(-margin, -margin);
            outer.contains(point) && !inner.contains(point)
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        let p0 = affine * self.position;
        let p1 = affine * Point::new(self.position.x + self.width, self.position.y + self.height);
        let r = Rect::from_points(p0, p1);
        self.position = r.origin();
        self.width = r.width();
        self.height = r.height();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::SerializableColor;

    #[test]
    fn test_from_corners_normalizes() {
        let r = Rectangle::from_corners(Point::new(10.0, 8.0), Point::new(2.0, 3.0));
        assert_eq!(r.position, Point::new(2.0, 3.0));
        assert!((r.width - 8.0).abs() < f64::EPSILON);
        assert!((r.height - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_outline_hit() {
        let r = Rectangle::new(Point::ZERO, 10.0, 10.0);
        assert!(r.hit_test(Point::new(0.1, 5.0), 0.5));
        assert!(!r.hit_test(Point::new(5.0, 5.0), 0.5));
    }

    #[test]
    fn test_filled_hit() {
        let mut r = Rectangle::new(Point::ZERO, 10.0, 10.0);
        r.style.fill_color = Some(SerializableColor::black());
        assert!(r.hit_test(Point::new(5.0, 5.0), 0.0));
        assert!(!r.hit_test(Point::new(12.0, 5.0), 0.5));
    }

    #[test]
    fn test_mirror_transform_keeps_positive_size() {
        let mut r = Rectangle::new(Point::new(1.0, 1.0), 2.0, 3.0);
        r.transform(Affine::FLIP_X);
        assert_eq!(r.position, Point::new(-3.0, 1.0));
        assert!((r.width - 2.0).abs() < f64::EPSILON);
    }
}
