#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod element;
pub mod error;
pub mod file_handler;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod scene;
pub mod style;
pub mod surface;
pub mod texture_manager;

pub use app::PaintApp;
pub use config::{CanvasConfig, RedoPolicy};
pub use element::{Element, ElementId, ElementStyle, Shape};
pub use error::{CanvasError, CanvasResult};
pub use geometry::ViewTransform;
pub use input::{GestureOutcome, GestureState, PointerEvent, PointerPhase};
pub use renderer::Compositor;
pub use scene::Scene;
pub use style::{StyleConfig, Tool};
pub use surface::DrawingSurface;
