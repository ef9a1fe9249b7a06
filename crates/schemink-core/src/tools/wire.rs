//! The wire tool: host-facing entry points around a [`RoutingSession`].
//!
//! Events arrive in screen coordinates and are mapped through the viewport.
//! This is the only place non-finite input is rejected; past here the router
//! assumes clean numbers.

use crate::component::Component;
use crate::error::{EditorResult, ensure_finite};
use crate::input::{Key, MouseButton, PointerEvent};
use crate::pins::find_nearest_pin;
use crate::routing::{
    RouteOutcome, RoutePreview, RouterState, RoutingContext, RoutingSession, RoutingTolerances,
};
use crate::settings::EditorSettings;
use crate::shapes::ShapeStyle;
use crate::viewport::Viewport;
use kurbo::Point;

/// Drives a routing session from pointer and keyboard events.
#[derive(Debug, Clone)]
pub struct WireTool {
    state: RouterState,
    pub tolerances: RoutingTolerances,
    /// Style given to committed wires.
    pub style: ShapeStyle,
    pub finish_on_pin: bool,
}

impl Default for WireTool {
    fn default() -> Self {
        Self::new(&EditorSettings::default())
    }
}

impl WireTool {
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            state: RouterState::Idle,
            tolerances: settings.routing,
            style: settings.wire_style.clone(),
            finish_on_pin: settings.finish_on_pin,
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, RouterState::Drawing(_))
    }

    pub fn session(&self) -> Option<&RoutingSession> {
        match &self.state {
            RouterState::Drawing(session) => Some(session),
            RouterState::Idle => None,
        }
    }

    /// Render data for the route in progress.
    pub fn preview(&self) -> Option<RoutePreview> {
        self.session().map(RoutingSession::preview)
    }

    /// Start a route at a screen position.
    ///
    /// A click within `pin_snap` grid pitches of a pin starts on that pin.
    /// Ignored while a route is already being drawn.
    pub fn on_draw_start(
        &mut self,
        screen: Point,
        viewport: &Viewport,
        components: &[Component],
    ) -> EditorResult<()> {
        let world = self.to_world(screen, viewport)?;
        if self.is_drawing() {
            log::debug!("draw start ignored: route already in progress");
            return Ok(());
        }
        let tight = viewport.grid().size * self.tolerances.pin_snap;
        let pin = find_nearest_pin(components, world, tight);
        self.state = RouterState::Drawing(RoutingSession::start(world, pin, viewport.grid()));
        Ok(())
    }

    /// Track the pointer. Does nothing when idle.
    pub fn on_draw_move(
        &mut self,
        screen: Point,
        viewport: &Viewport,
        components: &[Component],
    ) -> EditorResult<()> {
        let world = self.to_world(screen, viewport)?;
        let ctx = self.context(viewport, components);
        if let RouterState::Drawing(session) = &mut self.state {
            session.update(world, &ctx);
        }
        Ok(())
    }

    /// Commit the live segment at a click position.
    ///
    /// Returns the finished wire when `finish_on_pin` is set and the click
    /// landed on a pin.
    pub fn on_draw_commit_click(
        &mut self,
        screen: Point,
        viewport: &Viewport,
        components: &[Component],
    ) -> EditorResult<Option<RouteOutcome>> {
        let world = self.to_world(screen, viewport)?;
        let ctx = self.context(viewport, components);
        let RouterState::Drawing(session) = &mut self.state else {
            return Ok(None);
        };
        session.update(world, &ctx);
        let added = session.commit_waypoint();

        let ends_on_pin =
            added && session.waypoints().len() >= 2 && session.last_waypoint().is_anchored();
        if self.finish_on_pin && ends_on_pin {
            return Ok(Some(self.finish_session(None, &ctx)));
        }
        Ok(None)
    }

    /// Finish the route, optionally at a final screen position.
    pub fn on_draw_finish(
        &mut self,
        screen: Option<Point>,
        viewport: &Viewport,
        components: &[Component],
    ) -> EditorResult<Option<RouteOutcome>> {
        let world = screen.map(|s| self.to_world(s, viewport)).transpose()?;
        if !self.is_drawing() {
            return Ok(None);
        }
        let ctx = self.context(viewport, components);
        Ok(Some(self.finish_session(world, &ctx)))
    }

    /// Abandon the route.
    pub fn on_escape(&mut self) -> Option<RouteOutcome> {
        match std::mem::take(&mut self.state) {
            RouterState::Drawing(session) => Some(session.cancel()),
            RouterState::Idle => None,
        }
    }

    /// Drop the last committed waypoint.
    pub fn on_backspace(&mut self) -> bool {
        match &mut self.state {
            RouterState::Drawing(session) => session.undo_waypoint(),
            RouterState::Idle => false,
        }
    }

    /// Left click starts or commits, right click finishes, move tracks.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        viewport: &Viewport,
        components: &[Component],
    ) -> EditorResult<Option<RouteOutcome>> {
        match *event {
            PointerEvent::Down { position, button: MouseButton::Left } => {
                if self.is_drawing() {
                    self.on_draw_commit_click(position, viewport, components)
                } else {
                    self.on_draw_start(position, viewport, components).map(|()| None)
                }
            }
            PointerEvent::Down { position, button: MouseButton::Right } => {
                self.on_draw_finish(Some(position), viewport, components)
            }
            PointerEvent::Move { position } => {
                self.on_draw_move(position, viewport, components).map(|()| None)
            }
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => Ok(None),
        }
    }

    /// Enter finishes, Escape cancels, Backspace removes a waypoint.
    pub fn handle_key(
        &mut self,
        key: &Key,
        viewport: &Viewport,
        components: &[Component],
    ) -> EditorResult<Option<RouteOutcome>> {
        match key {
            Key::Enter => self.on_draw_finish(None, viewport, components),
            Key::Escape => Ok(self.on_escape()),
            Key::Backspace => {
                self.on_backspace();
                Ok(None)
            }
            Key::Other(_) => Ok(None),
        }
    }

    fn finish_session(
        &mut self,
        final_point: Option<Point>,
        ctx: &RoutingContext<'_>,
    ) -> RouteOutcome {
        let RouterState::Drawing(session) = std::mem::take(&mut self.state) else {
            return RouteOutcome::Cancelled;
        };
        match session.finish(final_point, ctx) {
            RouteOutcome::Committed(mut wire) => {
                wire.style = self.style.clone();
                RouteOutcome::Committed(wire)
            }
            RouteOutcome::Cancelled => RouteOutcome::Cancelled,
        }
    }

    fn context<'a>(&self, viewport: &Viewport, components: &'a [Component]) -> RoutingContext<'a> {
        RoutingContext::new(components, viewport.grid()).with_tolerances(self.tolerances)
    }

    fn to_world(&self, screen: Point, viewport: &Viewport) -> EditorResult<Point> {
        let screen = ensure_finite(screen)
            .inspect_err(|e| log::warn!("wire tool rejected input: {e}"))?;
        Ok(viewport.screen_to_world(screen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Pin;
    use crate::error::EditorError;
    use crate::snap::Grid;
    use kurbo::{Size, Vec2};

    /// 1 px per world unit with the world origin at the top-left corner.
    fn identity_viewport() -> Viewport {
        let mut viewport = Viewport::new(Size::new(200.0, 200.0));
        viewport.scale = 1.0;
        viewport.offset = Point::new(100.0, 100.0);
        viewport.set_grid(Grid::new(1.0)).unwrap();
        viewport
    }

    fn header(position: Point) -> Component {
        Component::new("J1", position, vec![Pin::new("1", Vec2::ZERO)])
    }

    #[test]
    fn test_identity_viewport_maps_through() {
        let viewport = identity_viewport();
        assert_eq!(viewport.screen_to_world(Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_click_route_finish_with_enter() {
        let viewport = identity_viewport();
        let mut tool = WireTool::default();

        tool.on_draw_start(Point::new(0.0, 0.0), &viewport, &[]).unwrap();
        assert!(tool.is_drawing());
        tool.on_draw_move(Point::new(5.0, 5.0), &viewport, &[]).unwrap();
        assert_eq!(
            tool.preview().unwrap().polyline(),
            vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(5.0, 5.0)]
        );
        assert!(tool.on_draw_commit_click(Point::new(5.0, 5.0), &viewport, &[]).unwrap().is_none());

        let wire = tool
            .handle_key(&Key::Enter, &viewport, &[])
            .unwrap()
            .and_then(RouteOutcome::wire)
            .unwrap();
        assert_eq!(wire.points.len(), 3);
        assert_eq!(wire.style, tool.style);
        assert!(!tool.is_drawing());
    }

    #[test]
    fn test_start_on_pin_uses_tight_tolerance() {
        let viewport = identity_viewport();
        let comps = vec![header(Point::new(2.0, 2.0))];
        let mut tool = WireTool::default();

        tool.on_draw_start(Point::new(2.5, 2.0), &viewport, &comps).unwrap();
        let session = tool.session().unwrap();
        assert!(session.start_pin().is_some());
        assert_eq!(session.last_waypoint().position, Point::new(2.0, 2.0));

        // Inside the hover radius but outside 0.75 grid: no start pin.
        tool.on_escape();
        tool.on_draw_start(Point::new(3.5, 2.0), &viewport, &comps).unwrap();
        assert!(tool.session().unwrap().start_pin().is_none());
    }

    #[test]
    fn test_commit_on_pin_finishes() {
        let viewport = identity_viewport();
        let comps = vec![header(Point::new(10.0, 0.0))];
        let mut tool = WireTool::default();

        tool.on_draw_start(Point::ZERO, &viewport, &comps).unwrap();
        let outcome = tool
            .on_draw_commit_click(Point::new(9.6, 0.1), &viewport, &comps)
            .unwrap()
            .unwrap();
        let wire = outcome.wire().unwrap();
        assert_eq!(wire.end(), Point::new(10.0, 0.0));
        assert!(wire.connections.end.is_some());
        assert!(!tool.is_drawing());
    }

    #[test]
    fn test_commit_on_pin_continues_when_disabled() {
        let viewport = identity_viewport();
        let comps = vec![header(Point::new(10.0, 0.0))];
        let mut tool = WireTool::default();
        tool.finish_on_pin = false;

        tool.on_draw_start(Point::ZERO, &viewport, &comps).unwrap();
        let outcome = tool.on_draw_commit_click(Point::new(9.6, 0.1), &viewport, &comps);
        assert!(outcome.unwrap().is_none());
        assert!(tool.is_drawing());
        assert_eq!(tool.session().unwrap().waypoints().len(), 2);
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let viewport = identity_viewport();
        let mut tool = WireTool::default();

        let err = tool.on_draw_start(Point::new(f64::NAN, 0.0), &viewport, &[]).unwrap_err();
        assert!(matches!(err, EditorError::NonFiniteCoordinate { .. }));
        assert!(!tool.is_drawing());

        tool.on_draw_start(Point::ZERO, &viewport, &[]).unwrap();
        tool.on_draw_move(Point::new(4.0, 0.0), &viewport, &[]).unwrap();
        assert!(tool.on_draw_move(Point::new(f64::INFINITY, 0.0), &viewport, &[]).is_err());
        // Session untouched by the rejected move.
        assert_eq!(tool.session().unwrap().live_endpoint(), Some(Point::new(4.0, 0.0)));
    }

    #[test]
    fn test_escape_cancels() {
        let viewport = identity_viewport();
        let mut tool = WireTool::default();
        assert!(tool.on_escape().is_none());

        tool.on_draw_start(Point::ZERO, &viewport, &[]).unwrap();
        tool.on_draw_commit_click(Point::new(4.0, 0.0), &viewport, &[]).unwrap();
        let outcome = tool.handle_key(&Key::Escape, &viewport, &[]).unwrap();
        assert!(matches!(outcome, Some(RouteOutcome::Cancelled)));
        assert!(!tool.is_drawing());
    }

    #[test]
    fn test_backspace_removes_waypoint() {
        let viewport = identity_viewport();
        let mut tool = WireTool::default();
        tool.on_draw_start(Point::ZERO, &viewport, &[]).unwrap();
        tool.on_draw_commit_click(Point::new(4.0, 0.0), &viewport, &[]).unwrap();
        assert_eq!(tool.session().unwrap().waypoints().len(), 2);

        tool.handle_key(&Key::Backspace, &viewport, &[]).unwrap();
        assert_eq!(tool.session().unwrap().waypoints().len(), 1);
        assert!(!tool.on_backspace());
    }

    #[test]
    fn test_pointer_dispatch() {
        let viewport = identity_viewport();
        let mut tool = WireTool::default();
        let down = |x: f64, y: f64, button| PointerEvent::Down {
            position: Point::new(x, y),
            button,
        };

        tool.handle_pointer(&down(0.0, 0.0, MouseButton::Left), &viewport, &[]).unwrap();
        tool.handle_pointer(&PointerEvent::Move { position: Point::new(0.0, 3.0) }, &viewport, &[])
            .unwrap();
        tool.handle_pointer(&down(0.0, 3.0, MouseButton::Left), &viewport, &[]).unwrap();
        let outcome = tool
            .handle_pointer(&down(4.0, 3.0, MouseButton::Right), &viewport, &[])
            .unwrap()
            .unwrap();

        let wire = outcome.wire().unwrap();
        assert_eq!(
            wire.points,
            vec![Point::new(0.0, 0.0), Point::new(0.0, 3.0), Point::new(4.0, 3.0)]
        );
    }

    #[test]
    fn test_finish_without_segment_cancels() {
        let viewport = identity_viewport();
        let mut tool = WireTool::default();
        assert!(tool.on_draw_finish(None, &viewport, &[]).unwrap().is_none());

        tool.on_draw_start(Point::ZERO, &viewport, &[]).unwrap();
        let outcome = tool.on_draw_finish(None, &viewport, &[]).unwrap();
        assert!(matches!(outcome, Some(RouteOutcome::Cancelled)));
    }
}
