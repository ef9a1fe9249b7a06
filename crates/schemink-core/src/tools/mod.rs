//! Tool system for the editor.

mod wire;

pub use wire::WireTool;

use crate::document::Document;
use crate::error::{EditorResult, ensure_finite};
use crate::routing::RouteOutcome;
use crate::selection::Selection;
use crate::settings::EditorSettings;
use crate::shapes::{Circle, Line, Rectangle, Shape, ShapeId, ShapeStyle, Via};
use crate::viewport::Viewport;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Wire,
    Line,
    Rectangle,
    Circle,
    Via,
}

impl ToolKind {
    /// Whether the tool creates a shape by dragging from one point to another.
    pub fn is_drag_tool(self) -> bool {
        matches!(
            self,
            ToolKind::Line | ToolKind::Rectangle | ToolKind::Circle | ToolKind::Via
        )
    }
}

/// State of a drag interaction.
#[derive(Debug, Clone, Copy, Default)]
pub enum ToolState {
    #[default]
    Idle,
    Active {
        start: Point,
        current: Point,
    },
}

/// Manages the current tool and its state.
///
/// Points passed to `begin`/`update`/`end` are world coordinates, already
/// snapped by the host if snapping is wanted. The wire tool has its own
/// event entry points on [`WireTool`].
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current drag state.
    pub state: ToolState,
    /// Wire routing tool.
    pub wire: WireTool,
    /// Style for new graphic shapes.
    pub current_style: ShapeStyle,
    /// Select click tolerance in screen pixels.
    pub hit_tolerance_px: f64,
    pub via_diameter: f64,
    pub via_drill: f64,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new(&EditorSettings::default())
    }
}

impl ToolManager {
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::Idle,
            wire: WireTool::new(settings),
            current_style: ShapeStyle::default(),
            hit_tolerance_px: settings.hit_tolerance_px,
            via_diameter: settings.via_diameter,
            via_drill: settings.via_drill,
        }
    }

    /// Switch tools. Leaving the wire tool mid-route cancels the route.
    pub fn set_tool(&mut self, tool: ToolKind) -> Option<RouteOutcome> {
        let cancelled = if tool != ToolKind::Wire {
            self.wire.on_escape()
        } else {
            None
        };
        if cancelled.is_some() {
            log::debug!("route cancelled by switch to {tool:?}");
        }
        self.current_tool = tool;
        self.state = ToolState::Idle;
        cancelled
    }

    /// Select the shape under a screen position.
    ///
    /// The pixel tolerance is converted to world units at the current zoom.
    pub fn select_click(
        &self,
        selection: &mut Selection,
        document: &Document,
        viewport: &Viewport,
        screen: Point,
        additive: bool,
    ) -> EditorResult<Option<ShapeId>> {
        let screen = ensure_finite(screen)?;
        let world = viewport.screen_to_world(screen);
        let tolerance = viewport.screen_to_world_distance(self.hit_tolerance_px);
        Ok(selection.select_at(document, world, tolerance, additive))
    }

    /// Begin a drag interaction.
    pub fn begin(&mut self, point: Point) {
        if self.current_tool.is_drag_tool() {
            self.state = ToolState::Active {
                start: point,
                current: point,
            };
        }
    }

    /// Update the current drag interaction.
    pub fn update(&mut self, point: Point) {
        if let ToolState::Active { current, .. } = &mut self.state {
            *current = point;
        }
    }

    /// End the current drag and return any created shape.
    pub fn end(&mut self, point: Point) -> Option<Shape> {
        let ToolState::Active { start, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        self.create_shape(start, point)
    }

    /// Cancel the current interaction, including any route in progress.
    pub fn cancel(&mut self) -> Option<RouteOutcome> {
        self.state = ToolState::Idle;
        self.wire.on_escape()
    }

    /// Check if a drag interaction or a route is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active { .. }) || self.wire.is_drawing()
    }

    /// Get the preview shape for the current drag.
    pub fn preview_shape(&self) -> Option<Shape> {
        match self.state {
            ToolState::Active { start, current } => self.create_shape(start, current),
            ToolState::Idle => None,
        }
    }

    fn create_shape(&self, start: Point, end: Point) -> Option<Shape> {
        let mut shape = match self.current_tool {
            ToolKind::Line => {
                if start.distance(end) < f64::EPSILON {
                    return None;
                }
                Shape::Line(Line::new(start, end))
            }
            ToolKind::Rectangle => {
                let rect = Rectangle::from_corners(start, end);
                if rect.width <= 0.0 || rect.height <= 0.0 {
                    return None;
                }
                Shape::Rect(rect)
            }
            ToolKind::Circle => {
                let circle = Circle::from_center_and_rim(start, end);
                if circle.radius <= 0.0 {
                    return None;
                }
                Shape::Circle(circle)
            }
            // Vias are placed where the drag ends.
            ToolKind::Via => {
                return Some(Shape::Via(Via::new(end, self.via_diameter, self.via_drill)));
            }
            ToolKind::Select | ToolKind::Pan | ToolKind::Wire => return None,
        };
        *shape.style_mut() = self.current_style.clone();
        Some(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::Viewport;
    use kurbo::Size;

    #[test]
    fn test_tool_manager_creation() {
        let manager = ToolManager::default();
        assert_eq!(manager.current_tool, ToolKind::Select);
        assert!(!manager.is_active());
    }

    #[test]
    fn test_rectangle_drag() {
        let mut manager = ToolManager::default();
        manager.set_tool(ToolKind::Rectangle);
        manager.begin(Point::new(10.0, 10.0));
        manager.update(Point::new(4.0, 2.0));
        assert!(manager.preview_shape().is_some());

        let shape = manager.end(Point::new(4.0, 2.0)).unwrap();
        match shape {
            Shape::Rect(r) => {
                assert_eq!(r.position, Point::new(4.0, 2.0));
                assert!((r.width - 6.0).abs() < f64::EPSILON);
                assert!((r.height - 8.0).abs() < f64::EPSILON);
            }
            other => panic!("expected rectangle, got {}", other.kind_name()),
        }
        assert!(!manager.is_active());
    }

    #[test]
    fn test_degenerate_drag_creates_nothing() {
        let mut manager = ToolManager::default();
        manager.set_tool(ToolKind::Line);
        manager.begin(Point::new(1.0, 1.0));
        assert!(manager.end(Point::new(1.0, 1.0)).is_none());

        manager.set_tool(ToolKind::Circle);
        manager.begin(Point::new(1.0, 1.0));
        assert!(manager.end(Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_circle_and_line_use_current_style() {
        let mut manager = ToolManager::default();
        manager.current_style.line_width = 0.5;
        manager.set_tool(ToolKind::Circle);
        manager.begin(Point::ZERO);
        let shape = manager.end(Point::new(3.0, 4.0)).unwrap();
        assert!((shape.style().line_width - 0.5).abs() < f64::EPSILON);
        match shape {
            Shape::Circle(c) => assert!((c.radius - 5.0).abs() < 1e-12),
            other => panic!("expected circle, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_via_placed_at_release() {
        let mut manager = ToolManager::default();
        manager.set_tool(ToolKind::Via);
        manager.begin(Point::ZERO);
        match manager.end(Point::new(2.0, 3.0)) {
            Some(Shape::Via(v)) => assert_eq!(v.position, Point::new(2.0, 3.0)),
            other => panic!("expected via, got {other:?}"),
        }
    }

    #[test]
    fn test_select_tool_does_not_drag() {
        let mut manager = ToolManager::default();
        manager.begin(Point::ZERO);
        assert!(!manager.is_active());
        assert!(manager.end(Point::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_select_click_tolerance_follows_zoom() {
        let mut doc = Document::new();
        let id = doc.add_shape(Shape::Line(Line::new(Point::ZERO, Point::new(10.0, 0.0))));
        let mut viewport = Viewport::new(Size::new(100.0, 100.0));
        viewport.offset = Point::new(5.0, 0.0);
        viewport.scale = 10.0;

        let mut settings = EditorSettings::default();
        settings.hit_tolerance_px = 5.0;
        let manager = ToolManager::new(&settings);
        let mut selection = Selection::new();

        // 4 px below the line is 0.4 world units at this zoom.
        let hit = manager
            .select_click(&mut selection, &doc, &viewport, Point::new(50.0, 54.0), false)
            .unwrap();
        assert_eq!(hit, Some(id));

        // 40 px off at 1 px per unit misses.
        viewport.scale = 1.0;
        let miss = manager
            .select_click(&mut selection, &doc, &viewport, Point::new(50.0, 90.0), false)
            .unwrap();
        assert_eq!(miss, None);
        assert!(selection.is_empty());

        let nan = Point::new(f64::NAN, 0.0);
        assert!(manager.select_click(&mut selection, &doc, &viewport, nan, false).is_err());
    }

    #[test]
    fn test_tool_switch_cancels_route() {
        let viewport = Viewport::new(Size::new(100.0, 100.0));
        let mut manager = ToolManager::default();
        assert!(manager.set_tool(ToolKind::Wire).is_none());

        manager.wire.on_draw_start(Point::new(50.0, 50.0), &viewport, &[]).unwrap();
        assert!(manager.is_active());
        // Staying on the wire tool keeps the route.
        assert!(manager.set_tool(ToolKind::Wire).is_none());
        assert!(manager.wire.is_drawing());

        let outcome = manager.set_tool(ToolKind::Select);
        assert!(matches!(outcome, Some(RouteOutcome::Cancelled)));
        assert!(!manager.wire.is_drawing());
    }
}
