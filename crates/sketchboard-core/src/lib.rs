//! Sketchboard Core Library
//!
//! Platform-agnostic drawing engine for the sketchboard whiteboard: shapes,
//! the scene store, linear undo history and the pointer-driven interaction
//! state machine. Nothing in here touches a raster surface.

pub mod board;
pub mod camera;
pub mod config;
pub mod geometry;
pub mod history;
pub mod input;
pub mod scene;
pub mod selection;
pub mod session;
pub mod shapes;
pub mod tools;

pub use board::{NoPrompt, TextPrompt, Whiteboard};
pub use camera::Camera;
pub use config::{BoardConfig, ConfigError, ImagePlacement, ZoomConfig};
pub use history::History;
pub use input::PointerEvent;
pub use scene::Scene;
pub use selection::{DragOffset, Selection};
pub use session::{Action, Effect, InteractionSession, handle_event};
pub use shapes::{Bitmap, ColorParseError, Shape, ShapeColor, ShapeId, ShapeStyle};
pub use tools::{PALETTE, ToolKind, ToolManager};
