//! Circular arc shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};
use uuid::Uuid;

/// A circular arc from `start_angle` sweeping by `sweep_angle` (radians).
///
/// Positive sweeps run in the direction of increasing angle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arc {
    pub(crate) id: ShapeId,
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub style: ShapeStyle,
}

impl Arc {
    pub fn new(center: Point, radius: f64, start_angle: f64, sweep_angle: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            start_angle,
            sweep_angle,
            style: ShapeStyle::default(),
        }
    }

    fn point_at(&self, angle: f64) -> Point {
        self.center + Vec2::from_angle(angle) * self.radius
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.start_angle + self.sweep_angle)
    }

    /// Whether the direction `angle` falls within the swept range.
    pub fn contains_angle(&self, angle: f64) -> bool {
        if self.sweep_angle.abs() >= TAU {
            return true;
        }
        let rel = if self.sweep_angle >= 0.0 {
            (angle - self.start_angle).rem_euclid(TAU)
        } else {
            (self.start_angle - angle).rem_euclid(TAU)
        };
        rel <= self.sweep_angle.abs()
    }
}

impl ShapeTrait for Arc {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let mut rect = Rect::from_points(self.start_point(), self.end_point());
        // Axis extremes at 0, 90, 180, 270 degrees
        for i in 0..4 {
            let angle = i as f64 * FRAC_PI_2;
            if self.contains_angle(angle) {
                rect = rect.union_pt(self.point_at(angle));
            }
        }
        let hw = self.style.half_width();
        rect.inflate(hw, hw)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let margin = tolerance + self.style.half_width();
        let offset = point - self.center;
        if self.contains_angle(offset.atan2()) {
            (offset.hypot() - self.radius).abs() <= margin
        } else {
            self.start_point().distance(point) <= margin
                || self.end_point().distance(point) <= margin
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        // Similarity transforms only: rigid motion plus uniform scale
        let start = affine * self.start_point();
        self.center = affine * self.center;
        let rel = start - self.center;
        let coeffs = affine.as_coeffs();
        let mirrored = coeffs[0] * coeffs[3] - coeffs[1] * coeffs[2] < 0.0;
        self.radius = rel.hypot();
        self.start_angle = rel.atan2();
        if mirrored {
            self.sweep_angle = -self.sweep_angle;
        }
    }
}
