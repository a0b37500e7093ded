use egui::{Pos2, Rect};
use uuid::Uuid;

mod common;
mod stroke;

pub use common::ElementStyle;
pub use stroke::{FreehandPath, PathSegment};

/// Identity of a committed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A text label anchored at its baseline-left point.
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub text: String,
    pub anchor: Pos2,
    pub font_size: f32,
}

/// Kind-specific geometry of an element, in canvas space.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Freehand(FreehandPath),
    /// Normalized: `min <= max` on both axes.
    Rectangle(Rect),
    /// The ellipse inscribed in a normalized box.
    Ellipse(Rect),
    Triangle([Pos2; 3]),
    Text(TextShape),
}

impl Shape {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Freehand(_) => "freehand",
            Shape::Rectangle(_) => "rectangle",
            Shape::Ellipse(_) => "ellipse",
            Shape::Triangle(_) => "triangle",
            Shape::Text(_) => "text",
        }
    }

    /// Geometric bounds, ignoring stroke width. Text reports only its anchor.
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Freehand(path) => path.bounds(),
            Shape::Rectangle(rect) | Shape::Ellipse(rect) => *rect,
            Shape::Triangle(points) => Rect::from_points(points),
            Shape::Text(text) => Rect::from_min_max(text.anchor, text.anchor),
        }
    }
}

/// A committed drawable. Its geometry never changes after commit; fields are
/// private and only read accessors are offered.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    id: ElementId,
    style: ElementStyle,
    shape: Shape,
}

impl Element {
    pub fn new(style: ElementStyle, shape: Shape) -> Self {
        Self {
            id: ElementId::new(),
            style,
            shape,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn style(&self) -> &ElementStyle {
        &self.style
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn bounds(&self) -> Rect {
        self.shape.bounds()
    }
}
