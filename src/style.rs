use egui::Color32;
use serde::{Deserialize, Serialize};

/// The drawing tools offered by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    Rectangle,
    Ellipse,
    Triangle,
    Text,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::Pen,
        Tool::Eraser,
        Tool::Rectangle,
        Tool::Ellipse,
        Tool::Triangle,
        Tool::Text,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pen => "Pen",
            Tool::Eraser => "Eraser",
            Tool::Rectangle => "Rectangle",
            Tool::Ellipse => "Ellipse",
            Tool::Triangle => "Triangle",
            Tool::Text => "Text",
        }
    }

    /// Tools that build their element from a press-drag-release gesture.
    pub fn is_drag_tool(&self) -> bool {
        !matches!(self, Tool::Text)
    }

    /// Tools whose outline may be filled.
    pub fn supports_fill(&self) -> bool {
        matches!(self, Tool::Rectangle | Tool::Ellipse | Tool::Triangle)
    }
}

/// Current tool and pen settings chosen by the host UI.
///
/// The gesture machine snapshots this when a gesture starts, so changing it
/// mid-gesture never alters an element already being drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub tool: Tool,
    pub color: Color32,
    pub(crate) stroke_width: f32,
    pub fill: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            color: Color32::BLACK,
            stroke_width: 12.0,
            fill: false,
        }
    }
}

impl StyleConfig {
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Set the stroke width, never going below `min_width`.
    pub fn set_stroke_width(&mut self, width: f32, min_width: f32) {
        self.stroke_width = if width.is_finite() {
            width.max(min_width)
        } else {
            min_width
        };
    }
}
