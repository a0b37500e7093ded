use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::CanvasResult;

/// What happens to undone elements when a new element is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RedoPolicy {
    /// Undone elements stay redoable after new drawing.
    #[default]
    Keep,
    /// Committing a new element discards the redo history.
    ClearOnCommit,
}

/// Tunables of the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old config
pub struct CanvasConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Flat fill used behind (and in place of) the background image.
    pub background_color: Color32,
    /// Minimum screen-space movement on either axis before a freehand point is accepted.
    pub thinning_threshold: f32,
    pub min_text_size: f32,
    pub text_size_per_width: f32,
    pub min_stroke_width: f32,
    pub redo_policy: RedoPolicy,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 4.0,
            background_color: Color32::WHITE,
            thinning_threshold: 2.0,
            min_text_size: 36.0,
            text_size_per_width: 4.0,
            min_stroke_width: 1.0,
            redo_policy: RedoPolicy::Keep,
        }
    }
}

impl CanvasConfig {
    /// Parse a JSON config. Missing fields fall back to defaults.
    pub fn from_json_str(json: &str) -> CanvasResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Repair values that would make the surface misbehave: swapped or
    /// non-positive zoom bounds and non-positive widths.
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            self.min_scale = defaults.min_scale;
        }
        if !(self.max_scale.is_finite() && self.max_scale > 0.0) {
            self.max_scale = defaults.max_scale;
        }
        if self.min_scale > self.max_scale {
            std::mem::swap(&mut self.min_scale, &mut self.max_scale);
        }
        if !(self.min_stroke_width.is_finite() && self.min_stroke_width > 0.0) {
            self.min_stroke_width = defaults.min_stroke_width;
        }
        if !self.thinning_threshold.is_finite() || self.thinning_threshold < 0.0 {
            self.thinning_threshold = defaults.thinning_threshold;
        }
        self
    }

    /// Font size for a text element drawn with the given stroke width.
    pub fn text_size_for(&self, stroke_width: f32) -> f32 {
        self.min_text_size.max(stroke_width * self.text_size_per_width)
    }
}
