//! Sheet document: shapes, placed components and undo history.

use crate::component::{Component, ComponentId};
use crate::error::EditorResult;
use crate::routing::RouteOutcome;
use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Maximum number of undo states to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// A snapshot of document state for undo/redo.
#[derive(Debug, Clone)]
struct DocumentSnapshot {
    shapes: HashMap<ShapeId, Shape>,
    z_order: Vec<ShapeId>,
    components: Vec<Component>,
}

/// A schematic or board sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    /// All shapes, keyed by ID.
    pub shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    pub z_order: Vec<ShapeId>,
    /// Placed components, in pin lookup order.
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(skip)]
    dirty: bool,
    #[serde(skip)]
    undo_stack: Vec<DocumentSnapshot>,
    #[serde(skip)]
    redo_stack: Vec<DocumentSnapshot>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            shapes: HashMap::new(),
            z_order: Vec::new(),
            components: Vec::new(),
            dirty: false,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            shapes: self.shapes.clone(),
            z_order: self.z_order.clone(),
            components: self.components.clone(),
        }
    }

    fn restore(&mut self, snapshot: DocumentSnapshot) {
        self.shapes = snapshot.shapes;
        self.z_order = snapshot.z_order;
        self.components = snapshot.components;
        self.dirty = true;
    }

    /// Push current state to the undo stack. Call before making changes.
    pub fn push_undo(&mut self) {
        let snapshot = self.snapshot();
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last change. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        let current = self.snapshot();
        self.redo_stack.push(current);
        self.restore(snapshot);
        true
    }

    /// Redo the last undone change. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        let current = self.snapshot();
        self.undo_stack.push(current);
        self.restore(snapshot);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Add a shape on top of the z-order as one undoable step.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        self.push_undo();
        let id = shape.id();
        log::debug!("adding {} {id}", shape.kind_name());
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        self.dirty = true;
        id
    }

    /// Hand a finished route to the document. Cancelled routes add nothing.
    pub fn commit_route(&mut self, outcome: RouteOutcome) -> Option<ShapeId> {
        outcome.wire().map(|wire| self.add_shape(wire.into()))
    }

    /// Remove a shape as one undoable step.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        if !self.shapes.contains_key(&id) {
            return None;
        }
        self.push_undo();
        self.z_order.retain(|&shape_id| shape_id != id);
        self.dirty = true;
        self.shapes.remove(&id)
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Shapes hit at a world point, front to back.
    pub fn shapes_at_point(&self, point: Point, tolerance: f64) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .filter(|id| self.shapes.get(id).is_some_and(|s| s.hit_test(point, tolerance)))
            .copied()
            .collect()
    }

    /// Shapes touching a rectangle, back to front.
    pub fn shapes_in_rect(&self, rect: Rect) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .filter(|id| self.shapes.get(id).is_some_and(|s| s.intersects_rect(rect)))
            .copied()
            .collect()
    }

    /// Bounding box of all shapes.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .values()
            .map(Shape::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    /// Place a component as one undoable step.
    pub fn add_component(&mut self, component: Component) -> ComponentId {
        self.push_undo();
        let id = component.id();
        log::debug!("placing {} ({id})", component.reference);
        self.components.push(component);
        self.dirty = true;
        id
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id() == id)
    }

    /// Move a component. Wires attached to its pins keep their geometry.
    pub fn move_component(&mut self, id: ComponentId, delta: Vec2) -> bool {
        if self.component(id).is_none() {
            return false;
        }
        self.push_undo();
        if let Some(component) = self.components.iter_mut().find(|c| c.id() == id) {
            component.translate(delta);
        }
        self.dirty = true;
        true
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether there are changes since the last save or load.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a document. Z-order entries without a shape are dropped.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let mut doc: Self = serde_json::from_str(json)?;
        let shapes = &doc.shapes;
        doc.z_order.retain(|id| shapes.contains_key(id));
        Ok(doc)
    }
}
