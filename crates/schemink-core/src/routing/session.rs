//! The per-gesture routing state machine.

use super::{Axis, RouteOutcome, RoutePreview, RoutingContext, Waypoint};
use crate::geometry::approx_eq;
use crate::pins::{PinRef, find_nearest_pin_excluding};
use crate::shapes::{Wire, WireConnections};
use crate::snap::Grid;
use kurbo::{Point, Vec2};

/// Points closer than this are the same vertex.
const COINCIDENT_EPSILON: f64 = 1e-9;

/// State of one wire being drawn.
///
/// `update` is pure with respect to its inputs: calling it twice with the same
/// pointer and context leaves the session unchanged the second time.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingSession {
    /// Committed vertices. Never empty; the first is the origin.
    waypoints: Vec<Waypoint>,
    active_axis: Option<Axis>,
    pending_corner: Option<Point>,
    live_endpoint: Option<Point>,
    start_pin: Option<PinRef>,
    hover_pin: Option<PinRef>,
    /// Staged shift of the last committed waypoint, applied on commit.
    last_adjusted_waypoint: Option<Point>,
}

impl RoutingSession {
    /// Begin a route. An origin on a pin keeps the pin's exact position,
    /// anything else is snapped to the grid.
    pub fn start(origin: Point, origin_pin: Option<PinRef>, grid: Grid) -> Self {
        let first = match origin_pin.clone() {
            Some(pin) => Waypoint::on_pin(pin),
            None => Waypoint::free(grid.snap(origin)),
        };
        log::debug!(
            "route started at ({:.3}, {:.3}){}",
            first.position.x,
            first.position.y,
            if first.is_anchored() { " on pin" } else { "" }
        );
        Self {
            waypoints: vec![first],
            active_axis: None,
            pending_corner: None,
            live_endpoint: None,
            start_pin: origin_pin,
            hover_pin: None,
            last_adjusted_waypoint: None,
        }
    }

    /// Recompute the live segment for a pointer position in world coordinates.
    pub fn update(&mut self, pointer: Point, ctx: &RoutingContext<'_>) {
        let tol = ctx.tolerances;
        let last = self.last_waypoint().position;

        // The origin pin is not a destination while the first leg is drawn.
        let exclude = if self.waypoints.len() == 1 {
            self.start_pin.as_ref()
        } else {
            None
        };
        let hover_pin =
            find_nearest_pin_excluding(ctx.components, pointer, tol.pin_detection_radius, exclude);

        let delta = pointer - last;
        if delta.hypot() < ctx.scaled(tol.axis_deadzone) {
            self.active_axis = None;
        } else if self.active_axis.is_none() {
            self.active_axis = Some(if delta.x.abs() >= delta.y.abs() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            });
        }
        let axis = self.active_axis;

        let mut target = ctx.grid.snap(pointer);
        target = match &hover_pin {
            Some(pin) => {
                snap_toward_pin(target, pointer, pin.position, axis, ctx.scaled(tol.pin_snap))
            }
            None => clamp_orthogonal(target, last, delta, axis, ctx.scaled(tol.orthogonal_clamp)),
        };

        self.last_adjusted_waypoint = match (&hover_pin, axis) {
            (Some(pin), Some(axis)) => self.stage_alignment(
                pin.position,
                axis,
                ctx.scaled(tol.waypoint_nudge),
                tol.corner_epsilon,
            ),
            _ => None,
        };
        let anchor = self.last_adjusted_waypoint.unwrap_or(last);

        // A pin's coordinates are exact, so any offset toward one needs an elbow.
        let corner_eps = if hover_pin.is_some() {
            COINCIDENT_EPSILON
        } else {
            target = straighten(target, anchor, tol.corner_epsilon);
            tol.corner_epsilon
        };
        self.pending_corner = corner_between(anchor, target, axis, corner_eps);

        log::trace!(
            "route update: pointer=({:.3}, {:.3}) axis={:?} target=({:.3}, {:.3}) \
             corner={:?} pin={:?}",
            pointer.x,
            pointer.y,
            axis,
            target.x,
            target.y,
            self.pending_corner,
            hover_pin.as_ref().map(|p| p.pin_number.as_str())
        );

        self.live_endpoint = Some(target);
        self.hover_pin = hover_pin;
    }

    /// Turn the live segment into committed waypoints.
    ///
    /// Applies any staged alignment, then appends the corner and the endpoint.
    /// Zero-length additions are skipped. Returns whether anything was added.
    pub fn commit_waypoint(&mut self) -> bool {
        let Some(endpoint) = self.live_endpoint.take() else {
            return false;
        };

        if let Some(aligned) = self.last_adjusted_waypoint.take() {
            if self.waypoints.len() >= 2 {
                if let Some(last) = self.waypoints.last_mut().filter(|w| !w.is_anchored()) {
                    last.position = aligned;
                }
            }
        }

        let before = self.waypoints.len();
        if let Some(corner) = self.pending_corner.take() {
            self.push_distinct(Waypoint::free(corner));
        }
        let pin = self
            .hover_pin
            .take()
            .filter(|p| approx_eq(p.position, endpoint, COINCIDENT_EPSILON));
        self.push_distinct(Waypoint { position: endpoint, pin });
        self.active_axis = None;

        let added = self.waypoints.len() - before;
        log::debug!(
            "committed {added} waypoint(s), route has {}",
            self.waypoints.len()
        );
        added > 0
    }

    /// Commit the live segment (after one last update at `final_point`, if
    /// given) and produce the wire. Fewer than two waypoints cancels.
    pub fn finish(mut self, final_point: Option<Point>, ctx: &RoutingContext<'_>) -> RouteOutcome {
        if let Some(point) = final_point {
            self.update(point, ctx);
        }
        self.commit_waypoint();
        self.into_outcome()
    }

    /// Discard the route.
    pub fn cancel(self) -> RouteOutcome {
        log::debug!("route cancelled with {} waypoint(s)", self.waypoints.len());
        RouteOutcome::Cancelled
    }

    /// Remove the most recent committed waypoint. The origin is never removed.
    pub fn undo_waypoint(&mut self) -> bool {
        if self.waypoints.len() <= 1 {
            return false;
        }
        self.waypoints.pop();
        self.active_axis = None;
        self.pending_corner = None;
        self.live_endpoint = None;
        self.hover_pin = None;
        self.last_adjusted_waypoint = None;
        true
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn last_waypoint(&self) -> &Waypoint {
        &self.waypoints[self.waypoints.len() - 1]
    }

    pub fn active_axis(&self) -> Option<Axis> {
        self.active_axis
    }

    pub fn pending_corner(&self) -> Option<Point> {
        self.pending_corner
    }

    pub fn live_endpoint(&self) -> Option<Point> {
        self.live_endpoint
    }

    pub fn start_pin(&self) -> Option<&PinRef> {
        self.start_pin.as_ref()
    }

    pub fn hover_pin(&self) -> Option<&PinRef> {
        self.hover_pin.as_ref()
    }

    pub fn last_adjusted_waypoint(&self) -> Option<Point> {
        self.last_adjusted_waypoint
    }

    /// Where the leg along the locked axis ends: the corner if one is
    /// pending, otherwise the live endpoint.
    pub fn segment_end(&self) -> Option<Point> {
        self.pending_corner.or(self.live_endpoint)
    }

    /// Snapshot for rendering.
    pub fn preview(&self) -> RoutePreview {
        let mut committed: Vec<Point> = self.waypoints.iter().map(|w| w.position).collect();
        if let (Some(aligned), true) = (self.last_adjusted_waypoint, committed.len() >= 2) {
            if let Some(last) = committed.last_mut() {
                *last = aligned;
            }
        }
        RoutePreview {
            committed,
            pending_corner: self.pending_corner,
            live_endpoint: self.live_endpoint,
            hover_pin: self.hover_pin.clone(),
            active_axis: self.active_axis,
        }
    }

    fn push_distinct(&mut self, waypoint: Waypoint) {
        if let Some(last) = self.waypoints.last_mut() {
            if approx_eq(last.position, waypoint.position, COINCIDENT_EPSILON) {
                if last.pin.is_none() {
                    last.pin = waypoint.pin;
                }
                return;
            }
        }
        self.waypoints.push(waypoint);
    }

    fn into_outcome(self) -> RouteOutcome {
        if self.waypoints.len() < 2 {
            log::debug!("route dropped: fewer than two waypoints");
            return RouteOutcome::Cancelled;
        }
        let connections = WireConnections {
            start: self.waypoints[0].pin.clone(),
            end: self.last_waypoint().pin.clone(),
        };
        let points = self.waypoints.iter().map(|w| w.position).collect();
        match Wire::with_connections(points, connections) {
            Some(wire) => {
                log::debug!("route finished with {} points", wire.points.len());
                RouteOutcome::Committed(wire)
            }
            None => RouteOutcome::Cancelled,
        }
    }

    /// Shift of the last committed waypoint that lines it up with `pin` along
    /// the cross axis of the current leg.
    ///
    /// Only free, non-origin waypoints move, and only when the leg leading into
    /// them is perpendicular to `axis` so that it stays straight.
    fn stage_alignment(&self, pin: Point, axis: Axis, limit: f64, eps: f64) -> Option<Point> {
        let [.., before, last] = self.waypoints.as_slice() else {
            return None;
        };
        if last.is_anchored() {
            return None;
        }
        let (prev, cur) = (before.position, last.position);
        let aligned = match axis {
            Axis::Vertical => {
                if (prev.y - cur.y).abs() > eps {
                    return None;
                }
                Point::new(pin.x, cur.y)
            }
            Axis::Horizontal => {
                if (prev.x - cur.x).abs() > eps {
                    return None;
                }
                Point::new(cur.x, pin.y)
            }
        };
        let shift = aligned.distance(cur);
        (shift > COINCIDENT_EPSILON && shift < limit).then_some(aligned)
    }
}

/// Pull `target` onto a nearby pin.
///
/// With an axis locked the cross-axis coordinate snaps first, and the in-axis
/// coordinate only when the cross axis did too. Without an axis the pin is
/// taken whole or not at all. Distances are measured from the raw pointer.
fn snap_toward_pin(
    mut target: Point,
    pointer: Point,
    pin: Point,
    axis: Option<Axis>,
    threshold: f64,
) -> Point {
    let near_x = (pointer.x - pin.x).abs() < threshold;
    let near_y = (pointer.y - pin.y).abs() < threshold;
    match axis {
        Some(Axis::Horizontal) => {
            if near_y {
                target.y = pin.y;
                if near_x {
                    target.x = pin.x;
                }
            }
        }
        Some(Axis::Vertical) => {
            if near_x {
                target.x = pin.x;
                if near_y {
                    target.y = pin.y;
                }
            }
        }
        None => {
            if near_x && near_y {
                target = pin;
            }
        }
    }
    target
}

/// Flatten a small cross-axis jog relative to the last waypoint.
fn clamp_orthogonal(
    mut target: Point,
    last: Point,
    delta: Vec2,
    axis: Option<Axis>,
    limit: f64,
) -> Point {
    match axis {
        Some(Axis::Horizontal) if delta.y.abs() < limit => target.y = last.y,
        Some(Axis::Vertical) if delta.x.abs() < limit => target.x = last.x,
        _ => {}
    }
    target
}

/// Remove a sub-epsilon offset so a single leg is exactly horizontal or vertical.
fn straighten(mut target: Point, anchor: Point, eps: f64) -> Point {
    let dx = (target.x - anchor.x).abs();
    let dy = (target.y - anchor.y).abs();
    if dx <= eps && dy > eps {
        target.x = anchor.x;
    } else if dy <= eps && dx > eps {
        target.y = anchor.y;
    }
    target
}

/// The elbow between `anchor` and `target` when they differ on both axes.
fn corner_between(anchor: Point, target: Point, axis: Option<Axis>, eps: f64) -> Option<Point> {
    if (target.x - anchor.x).abs() <= eps || (target.y - anchor.y).abs() <= eps {
        return None;
    }
    Some(match axis {
        Some(Axis::Vertical) => Point::new(anchor.x, target.y),
        Some(Axis::Horizontal) | None => Point::new(target.x, anchor.y),
    })
}
