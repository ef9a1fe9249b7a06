use super::Axis;
use crate::pins::PinRef;
use kurbo::Point;

/// What a renderer needs to draw an in-progress route.
///
/// `committed` already reflects a staged waypoint alignment, so the preview
/// shows the route as it will be after the next commit.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePreview {
    pub committed: Vec<Point>,
    pub pending_corner: Option<Point>,
    pub live_endpoint: Option<Point>,
    /// Pin to highlight under the pointer.
    pub hover_pin: Option<PinRef>,
    pub active_axis: Option<Axis>,
}

impl RoutePreview {
    /// Full polyline: committed waypoints, then the corner and live endpoint.
    /// Repeated vertices are dropped.
    pub fn polyline(&self) -> Vec<Point> {
        let mut points = self.committed.clone();
        for p in [self.pending_corner, self.live_endpoint].into_iter().flatten() {
            if points.last() != Some(&p) {
                points.push(p);
            }
        }
        points
    }

    /// Whether the live part adds anything to the committed route.
    pub fn has_live_segment(&self) -> bool {
        self.polyline().len() > self.committed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_with_corner() {
        let preview = RoutePreview {
            committed: vec![Point::new(0.0, 0.0)],
            pending_corner: Some(Point::new(5.0, 0.0)),
            live_endpoint: Some(Point::new(5.0, 5.0)),
            hover_pin: None,
            active_axis: Some(Axis::Horizontal),
        };
        assert_eq!(
            preview.polyline(),
            vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(5.0, 5.0)]
        );
        assert!(preview.has_live_segment());
    }

    #[test]
    fn test_polyline_skips_repeated_vertex() {
        let preview = RoutePreview {
            committed: vec![Point::new(0.0, 0.0)],
            pending_corner: None,
            live_endpoint: Some(Point::new(0.0, 0.0)),
            hover_pin: None,
            active_axis: None,
        };
        assert_eq!(preview.polyline(), vec![Point::new(0.0, 0.0)]);
        assert!(!preview.has_live_segment());
    }
}
