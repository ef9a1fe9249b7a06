//! Schemink Core Library
//!
//! Platform-agnostic data structures and interactive wire routing for the
//! Schemink schematic/PCB editor.

pub mod component;
pub mod document;
pub mod error;
pub mod geometry;
pub mod input;
pub mod pins;
pub mod routing;
pub mod selection;
pub mod settings;
pub mod shapes;
pub mod snap;
pub mod tools;
pub mod viewport;

pub use component::{Component, ComponentId, Pin};
pub use document::Document;
pub use error::{EditorError, EditorResult};
pub use pins::{PIN_DETECTION_RADIUS, PinRef, find_nearest_pin, find_nearest_pin_excluding};
pub use routing::{
    Axis, RouteOutcome, RoutePreview, RoutingContext, RoutingSession, RoutingTolerances, Waypoint,
};
pub use selection::Selection;
pub use settings::EditorSettings;
pub use shapes::{Shape, ShapeId, ShapeStyle, Wire, WireConnections};
pub use snap::{DEFAULT_GRID_SIZE, Grid, snap_to_grid};
pub use tools::{ToolKind, ToolManager, WireTool};
pub use viewport::Viewport;
