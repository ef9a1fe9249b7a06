//! Closed polygon shape (copper pours, graphic outlines).

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::{point_in_polygon, point_to_segment_dist, polyline_bounds};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    /// Vertices; the closing edge is implicit.
    pub points: Vec<Point>,
    pub style: ShapeStyle,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style: ShapeStyle::default(),
        }
    }

    /// Distance from `point` to the closed outline.
    pub fn outline_distance(&self, point: Point) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| point_to_segment_dist(point, self.points[i], self.points[(i + 1) % n]))
            .fold(f64::INFINITY, f64::min)
    }

    /// Signed-area magnitude (shoelace formula).
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let (a, b) = (self.points[i], self.points[(i + 1) % n]);
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice.abs() / 2.0
    }
}

impl ShapeTrait for Polygon {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let hw = self.style.half_width();
        polyline_bounds(&self.points).unwrap_or_default().inflate(hw, hw)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.style.fill_color.is_some() && point_in_polygon(point, &self.points) {
            return true;
        }
        self.outline_distance(point) <= tolerance + self.style.half_width()
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        for p in &mut self.points {
            *p = affine * *p;
        }
    }
}
