use egui::emath::TSTransform;
use egui::{Pos2, Vec2};

/// The pan/zoom view: a uniform scale plus translation mapping canvas space
/// into screen space.
///
/// The inverse is derived from the live transform on every call; nothing is
/// cached across mutations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    transform: TSTransform,
    min_scale: f32,
    max_scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(0.5, 4.0)
    }
}

impl ViewTransform {
    /// Identity view whose zoom is kept within `[min_scale, max_scale]`.
    pub fn new(min_scale: f32, max_scale: f32) -> Self {
        Self {
            transform: TSTransform::IDENTITY,
            min_scale,
            max_scale,
        }
    }

    pub fn scale(&self) -> f32 {
        self.transform.scaling
    }

    pub fn translation(&self) -> Vec2 {
        self.transform.translation
    }

    pub fn scale_range(&self) -> (f32, f32) {
        (self.min_scale, self.max_scale)
    }

    pub fn screen_to_canvas(&self, screen: Pos2) -> Pos2 {
        self.transform.inverse().mul_pos(screen)
    }

    pub fn canvas_to_screen(&self, canvas: Pos2) -> Pos2 {
        self.transform.mul_pos(canvas)
    }

    /// Translate the view by a screen-space delta.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.transform = TSTransform::from_translation(Vec2::new(dx, dy)) * self.transform;
    }

    /// Scale the view by `factor` about a screen-space focus point.
    ///
    /// The resulting scale is clamped into the configured range and the
    /// canvas point under `focus` stays under it. Non-finite or non-positive
    /// factors are ignored.
    pub fn zoom(&mut self, factor: f32, focus: Pos2) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }

        let anchor = self.screen_to_canvas(focus);
        let scale = (self.scale() * factor).clamp(self.min_scale, self.max_scale);
        let translation = focus.to_vec2() - anchor.to_vec2() * scale;
        self.transform = TSTransform::new(translation, scale);
    }

    pub fn reset(&mut self) {
        self.transform = TSTransform::IDENTITY;
    }

    /// The same map expressed for the rasteriser.
    pub fn to_tiny_skia(&self) -> tiny_skia::Transform {
        let s = self.transform.scaling;
        let t = self.transform.translation;
        tiny_skia::Transform::from_row(s, 0.0, 0.0, s, t.x, t.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_identity_maps_points_unchanged() {
        let view = ViewTransform::default();
        let p = Pos2::new(12.5, -3.0);
        assert_eq!(view.screen_to_canvas(p), p);
        assert_eq!(view.canvas_to_screen(p), p);
    }

    #[test]
    fn test_zoom_keeps_focus_fixed() {
        let mut view = ViewTransform::default();
        let focus = Pos2::new(100.0, 50.0);
        let canvas_before = view.screen_to_canvas(focus);
        view.zoom(2.0, focus);
        let canvas_after = view.screen_to_canvas(focus);
        assert!(approx_eq(canvas_before.x, canvas_after.x));
        assert!(approx_eq(canvas_before.y, canvas_after.y));
        assert_eq!(view.scale(), 2.0);
    }

    #[test]
    fn test_zoom_clamps_to_min() {
        let mut view = ViewTransform::new(0.5, 4.0);
        view.zoom(0.1, Pos2::ZERO);
        assert_eq!(view.scale(), 0.5);
    }

    #[test]
    fn test_clamped_zoom_from_panned_view_keeps_focus_fixed() {
        let mut view = ViewTransform::new(0.5, 4.0);
        view.pan(-37.0, 11.0);
        view.zoom(3.0, Pos2::new(20.0, 30.0));

        let focus = Pos2::new(143.0, 71.0);
        let canvas_before = view.screen_to_canvas(focus);
        view.zoom(3.0, focus);
        let canvas_after = view.screen_to_canvas(focus);

        assert_eq!(view.scale(), 4.0);
        assert!(approx_eq(canvas_before.x, canvas_after.x));
        assert!(approx_eq(canvas_before.y, canvas_after.y));
    }

    #[test]
    fn test_invalid_factor_is_ignored() {
        let mut view = ViewTransform::default();
        view.zoom(f32::NAN, Pos2::ZERO);
        view.zoom(0.0, Pos2::ZERO);
        view.zoom(-2.0, Pos2::ZERO);
        assert_eq!(view.scale(), 1.0);
    }

    #[test]
    fn test_tiny_skia_transform_matches() {
        let mut view = ViewTransform::default();
        view.pan(10.0, 20.0);
        view.zoom(2.0, Pos2::new(5.0, 5.0));

        let canvas = Pos2::new(3.0, 7.0);
        let expected = view.canvas_to_screen(canvas);
        let mut pt = [tiny_skia::Point::from_xy(canvas.x, canvas.y)];
        view.to_tiny_skia().map_points(&mut pt);
        assert!(approx_eq(pt[0].x, expected.x));
        assert!(approx_eq(pt[0].y, expected.y));
    }
}
