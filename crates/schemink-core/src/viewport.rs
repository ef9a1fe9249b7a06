//! Viewport module for world/screen transforms, zoom, pan and the grid.

use crate::error::{EditorError, EditorResult};
use crate::settings::EditorSettings;
use crate::snap::Grid;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Screen pixels per millimetre at "100%" in the UI.
pub const DEFAULT_SCALE: f64 = 4.0;

/// Viewport manages the view transform for the drawing.
///
/// `offset` is the world point shown at the centre of the screen and `scale`
/// is the number of screen pixels per world unit. Screen y grows downwards,
/// as does world y.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// World point at the screen centre.
    pub offset: Point,
    /// Screen pixels per world unit.
    pub scale: f64,
    /// Screen size in pixels.
    pub size: Size,
    /// Active grid. Private so its pitch stays positive.
    grid: Grid,
    /// Minimum allowed scale.
    pub min_scale: f64,
    /// Maximum allowed scale.
    pub max_scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Point::ZERO,
            scale: DEFAULT_SCALE,
            size: Size::new(800.0, 600.0),
            grid: Grid::default(),
            min_scale: 0.1,
            max_scale: 200.0,
        }
    }
}

impl Viewport {
    /// Create a viewport for a screen of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Create a viewport using the grid from editor settings.
    pub fn with_settings(size: Size, settings: &EditorSettings) -> EditorResult<Self> {
        let mut viewport = Self::new(size);
        viewport.set_grid(settings.grid)?;
        Ok(viewport)
    }

    fn screen_center(&self) -> Vec2 {
        Vec2::new(self.size.width / 2.0, self.size.height / 2.0)
    }

    /// Get the affine transform for rendering (world to screen).
    pub fn transform(&self) -> Affine {
        Affine::translate(self.screen_center())
            * Affine::scale(self.scale)
            * Affine::translate(-self.offset.to_vec2())
    }

    /// Get the inverse transform for input handling (screen to world).
    pub fn inverse_transform(&self) -> Affine {
        Affine::translate(self.offset.to_vec2())
            * Affine::scale(1.0 / self.scale)
            * Affine::translate(-self.screen_center())
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Convert a distance in screen pixels to world units at the current scale.
    pub fn screen_to_world_distance(&self, pixels: f64) -> f64 {
        pixels / self.scale
    }

    /// Translate the view by a delta in world units.
    pub fn pan_world(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Pan by a pointer drag in screen pixels; content follows the pointer.
    pub fn pan_screen(&mut self, delta: Vec2) {
        self.offset -= delta / self.scale;
    }

    /// Multiply the scale by `factor`, keeping `pivot` (world) fixed on screen.
    pub fn zoom_at(&mut self, pivot: Point, factor: f64) {
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        let pivot_screen = self.world_to_screen(pivot);
        self.scale = new_scale;

        // Re-centre so the pivot lands on the same pixel
        let from_center = pivot_screen.to_vec2() - self.screen_center();
        self.offset = pivot - from_center / self.scale;
    }

    /// Update the screen size (e.g. on window resize).
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Reset to default position and scale.
    pub fn reset(&mut self) {
        self.offset = Point::ZERO;
        self.scale = DEFAULT_SCALE;
    }

    /// Fit the view to show the given bounding box.
    pub fn fit_to_bounds(&mut self, bounds: Rect, padding: f64) {
        if bounds.is_zero_area() {
            self.offset = bounds.center();
            return;
        }

        let padded = Size::new(
            (self.size.width - padding * 2.0).max(1.0),
            (self.size.height - padding * 2.0).max(1.0),
        );

        let scale_x = padded.width / bounds.width();
        let scale_y = padded.height / bounds.height();
        self.scale = scale_x.min(scale_y).clamp(self.min_scale, self.max_scale);
        self.offset = bounds.center();
    }

    /// The active grid.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Replace the grid. The pitch must be finite and positive.
    pub fn set_grid(&mut self, grid: Grid) -> EditorResult<()> {
        if !grid.size.is_finite() || grid.size <= 0.0 {
            return Err(EditorError::InvalidGridSize(grid.size));
        }
        self.grid = grid;
        Ok(())
    }

    /// Change the grid pitch.
    pub fn set_grid_size(&mut self, size: f64) -> EditorResult<()> {
        self.set_grid(Grid {
            size,
            ..self.grid
        })
    }

    pub fn set_grid_enabled(&mut self, enabled: bool) {
        self.grid.enabled = enabled;
    }

    /// Current grid pitch.
    pub fn grid_size(&self) -> f64 {
        self.grid.size
    }

    /// Quantize a world point to the grid when snapping is enabled.
    pub fn snapped_position(&self, world_point: Point) -> Point {
        self.grid.snap(world_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snap::DEFAULT_GRID_SIZE;

    fn viewport() -> Viewport {
        Viewport::new(Size::new(200.0, 100.0))
    }

    #[test]
    fn test_default_viewport() {
        let vp = Viewport::default();
        assert_eq!(vp.offset, Point::ZERO);
        assert!((vp.scale - DEFAULT_SCALE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_offset_is_screen_center() {
        let mut vp = viewport();
        vp.offset = Point::new(10.0, -5.0);
        let screen = vp.world_to_screen(Point::new(10.0, -5.0));
        assert!((screen.x - 100.0).abs() < 1e-10);
        assert!((screen.y - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_screen_to_world_with_scale() {
        let mut vp = viewport();
        vp.scale = 2.0;
        let world = vp.screen_to_world(Point::new(120.0, 50.0));
        assert!((world.x - 10.0).abs() < 1e-10);
        assert!(world.y.abs() < 1e-10);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut vp = viewport();
        vp.offset = Point::new(30.0, -20.0);
        vp.scale = 1.5;

        let original = Point::new(123.0, 456.0);
        let world = vp.screen_to_world(original);
        let back = vp.world_to_screen(world);

        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_keeps_pivot_fixed() {
        let mut vp = viewport();
        let pivot = Point::new(7.0, 3.0);
        let before = vp.world_to_screen(pivot);
        vp.zoom_at(pivot, 2.5);
        let after = vp.world_to_screen(pivot);
        assert!((vp.scale - DEFAULT_SCALE * 2.5).abs() < 1e-10);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut vp = viewport();
        vp.zoom_at(Point::ZERO, 0.0001);
        assert!((vp.scale - vp.min_scale).abs() < f64::EPSILON);

        vp.zoom_at(Point::ZERO, 1.0e6);
        assert!((vp.scale - vp.max_scale).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan() {
        let mut vp = viewport();
        vp.pan_world(Vec2::new(10.0, 20.0));
        assert_eq!(vp.offset, Point::new(10.0, 20.0));

        vp.scale = 2.0;
        vp.pan_screen(Vec2::new(4.0, -8.0));
        assert_eq!(vp.offset, Point::new(8.0, 24.0));
    }

    #[test]
    fn test_screen_tolerance_in_world_units() {
        let mut vp = viewport();
        vp.scale = 8.0;
        assert!((vp.screen_to_world_distance(4.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_grid_size_validation() {
        let mut vp = viewport();
        assert!(vp.set_grid_size(2.54).is_ok());
        assert!((vp.grid_size() - 2.54).abs() < f64::EPSILON);
        assert!(matches!(vp.set_grid_size(0.0), Err(EditorError::InvalidGridSize(_))));
        assert!(vp.set_grid_size(f64::NAN).is_err());
        assert!((vp.grid_size() - 2.54).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_grid_rejects_zero_pitch() {
        let mut vp = viewport();
        assert!(vp.set_grid(Grid::new(0.0)).is_err());
        assert!((vp.grid().size - DEFAULT_GRID_SIZE).abs() < f64::EPSILON);
        assert!(vp.snapped_position(Point::new(0.5, 0.5)).x.is_finite());

        vp.set_grid_enabled(false);
        assert_eq!(vp.snapped_position(Point::new(0.5, 0.5)), Point::new(0.5, 0.5));
    }

    #[test]
    fn test_with_settings_takes_grid() {
        let mut settings = EditorSettings::default();
        settings.grid = Grid::new(2.54);
        let vp = Viewport::with_settings(Size::new(100.0, 100.0), &settings).unwrap();
        assert_eq!(vp.grid(), Grid::new(2.54));

        settings.grid.size = -1.0;
        assert!(Viewport::with_settings(Size::new(100.0, 100.0), &settings).is_err());
    }

    #[test]
    fn test_snapped_position() {
        let mut vp = viewport();
        vp.set_grid_size(1.0).unwrap();
        assert_eq!(vp.snapped_position(Point::new(5.3, 0.2)), Point::new(5.0, 0.0));
    }

    #[test]
    fn test_fit_to_bounds() {
        let mut vp = viewport();
        vp.fit_to_bounds(Rect::new(0.0, 0.0, 50.0, 10.0), 0.0);
        assert!((vp.scale - 4.0).abs() < 1e-10);
        assert_eq!(vp.offset, Point::new(25.0, 5.0));
    }
}
