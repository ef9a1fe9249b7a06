//! Text label shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Average glyph advance relative to the font size.
const GLYPH_ASPECT: f64 = 0.6;

/// A single-line text label anchored at its baseline start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Baseline origin.
    pub position: Point,
    pub content: String,
    /// Cap height in world units.
    pub font_size: f64,
    /// Rotation angle in radians (around the baseline origin).
    #[serde(default)]
    pub rotation: f64,
    pub style: ShapeStyle,
}

impl Text {
    pub const DEFAULT_FONT_SIZE: f64 = 1.27;

    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            font_size: Self::DEFAULT_FONT_SIZE,
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }

    fn unrotated_bounds(&self) -> Rect {
        let width = self.content.chars().count() as f64 * self.font_size * GLYPH_ASPECT;
        Rect::new(
            self.position.x,
            self.position.y - self.font_size,
            self.position.x + width,
            self.position.y,
        )
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let rect = self.unrotated_bounds();
        if self.rotation.abs() < 0.001 {
            return rect;
        }
        let rot = Affine::rotate_about(self.rotation, self.position);
        let corners = [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ];
        let first = rot * corners[0];
        corners[1..]
            .iter()
            .fold(Rect::from_points(first, first), |r, &c| r.union_pt(rot * c))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        // Test in the text's own frame
        let local = Affine::rotate_about(-self.rotation, self.position) * point;
        self.unrotated_bounds().inflate(tolerance, tolerance).contains(local)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        self.position = affine * self.position;
        let coeffs = affine.as_coeffs();
        let rotation = coeffs[1].atan2(coeffs[0]);
        if rotation.abs() > 0.001 {
            self.rotation += rotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_bounds_estimate() {
        let mut text = Text::new(Point::new(0.0, 10.0), "GND".to_string());
        text.font_size = 2.0;
        let b = text.bounds();
        assert!((b.width() - 3.6).abs() < 1e-12);
        assert!((b.y0 - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotated_hit() {
        let mut text = Text::new(Point::ZERO, "CLK".to_string());
        text.font_size = 1.0;
        text.rotation = FRAC_PI_2;
        // Rotated a quarter turn the label runs down the +y axis
        assert!(text.hit_test(Point::new(0.5, 1.0), 0.0));
        assert!(!text.hit_test(Point::new(1.5, 0.5), 0.0));
    }
}
