use egui::Color32;

use crate::style::{StyleConfig, Tool};

/// Paint settings baked into an element when its gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    pub color: Color32,
    pub stroke_width: f32,
    pub anti_alias: bool,
    /// Fill the interior as well as stroking the outline.
    pub fill: bool,
    /// Remove pixels instead of painting them.
    pub erase: bool,
}

impl ElementStyle {
    /// Snapshot the host settings for an element drawn with `tool`.
    pub fn snapshot(config: &StyleConfig, tool: Tool) -> Self {
        Self {
            color: config.color,
            stroke_width: config.stroke_width(),
            anti_alias: true,
            fill: config.fill && tool.supports_fill(),
            erase: tool == Tool::Eraser,
        }
    }
}
