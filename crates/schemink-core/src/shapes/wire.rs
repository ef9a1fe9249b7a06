//! Wire shape: an electrically meaningful polyline between pins.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::error::EditorError;
use crate::geometry::{self, point_to_polyline_dist};
use crate::pins::PinRef;
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pin snapshot taken when the wire was committed.
///
/// These are not live references: if a connected component moves later,
/// neither the wire geometry nor these snapshots follow it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireConnections {
    pub start: Option<PinRef>,
    pub end: Option<PinRef>,
}

/// A committed wire route. Always has at least two points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "WireData")]
pub struct Wire {
    pub(crate) id: ShapeId,
    /// Route vertices, in order.
    pub points: Vec<Point>,
    /// Terminals at the two ends.
    #[serde(default)]
    pub connections: WireConnections,
    /// Net label (empty when unnamed).
    #[serde(default)]
    pub net: String,
    /// Style properties.
    pub style: ShapeStyle,
}

/// Wire fields as read from JSON, before the point count is checked.
#[derive(Deserialize)]
struct WireData {
    id: ShapeId,
    points: Vec<Point>,
    #[serde(default)]
    connections: WireConnections,
    #[serde(default)]
    net: String,
    style: ShapeStyle,
}

impl TryFrom<WireData> for Wire {
    type Error = EditorError;

    fn try_from(data: WireData) -> Result<Self, Self::Error> {
        if data.points.len() < 2 {
            return Err(EditorError::InvalidShape(format!(
                "wire {} has {} point(s), needs at least 2",
                data.id,
                data.points.len()
            )));
        }
        Ok(Self {
            id: data.id,
            points: data.points,
            connections: data.connections,
            net: data.net,
            style: data.style,
        })
    }
}

impl Wire {
    /// Build a wire from route vertices. Fewer than two points is not a wire.
    pub fn from_points(points: Vec<Point>) -> Option<Self> {
        Self::with_connections(points, WireConnections::default())
    }

    /// Build a wire carrying pin snapshots for its ends.
    pub fn with_connections(points: Vec<Point>, connections: WireConnections) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            points,
            connections,
            net: String::new(),
            style: ShapeStyle::wire(),
        })
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Iterate over the route's segments as point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total route length.
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    /// Whether every segment is horizontal or vertical.
    pub fn is_orthogonal(&self) -> bool {
        self.segments()
            .all(|(a, b)| (a.x - b.x).abs() < f64::EPSILON || (a.y - b.y).abs() < f64::EPSILON)
    }

    /// Minimum distance from `point` to any segment of the route.
    pub fn distance_to(&self, point: Point) -> f64 {
        point_to_polyline_dist(point, &self.points)
    }
}

impl ShapeTrait for Wire {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let hw = self.style.half_width();
        geometry::polyline_bounds(&self.points)
            .unwrap_or_default()
            .inflate(hw, hw)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.distance_to(point) <= tolerance + self.style.half_width()
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
