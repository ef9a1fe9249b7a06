//! Shape selection.

use crate::document::Document;
use crate::shapes::ShapeId;
use kurbo::{Point, Rect};

/// Ordered set of selected shape ids (first selected first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ShapeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a single shape.
    pub fn select(&mut self, id: ShapeId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Add a shape, keeping the existing selection.
    pub fn add(&mut self, id: ShapeId) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    /// Flip a shape's membership. Returns whether it is now selected.
    pub fn toggle(&mut self, id: ShapeId) -> bool {
        if let Some(pos) = self.ids.iter().position(|&s| s == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[ShapeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Click selection: the topmost shape under `point` wins.
    ///
    /// Additive clicks toggle the hit shape. A plain click on empty space
    /// clears the selection.
    pub fn select_at(
        &mut self,
        document: &Document,
        point: Point,
        tolerance: f64,
        additive: bool,
    ) -> Option<ShapeId> {
        let hit = document.shapes_at_point(point, tolerance).first().copied();
        match (hit, additive) {
            (Some(id), true) => {
                self.toggle(id);
            }
            (Some(id), false) => self.select(id),
            (None, false) => self.clear(),
            (None, true) => {}
        }
        hit
    }

    /// Marquee selection of every shape touching `rect`.
    pub fn select_in_rect(&mut self, document: &Document, rect: Rect, additive: bool) {
        if !additive {
            self.ids.clear();
        }
        for id in document.shapes_in_rect(rect) {
            self.add(id);
        }
    }

    /// Drop ids whose shapes no longer exist, e.g. after undo.
    pub fn retain_existing(&mut self, document: &Document) {
        self.ids.retain(|id| document.get_shape(*id).is_some());
    }

    /// Combined bounds of the selected shapes.
    pub fn bounds(&self, document: &Document) -> Option<Rect> {
        self.ids
            .iter()
            .filter_map(|id| document.get_shape(*id))
            .map(|s| s.bounds())
            .reduce(|acc, b| acc.union(b))
    }
}
