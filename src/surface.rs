use egui::{Color32, Pos2};
use image::RgbaImage;
use tiny_skia::Pixmap;

use crate::config::CanvasConfig;
use crate::element::{Element, ElementId, ElementStyle, Shape, TextShape};
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::ViewTransform;
use crate::input::{Draft, GestureMachine, GestureOutcome, PointerEvent};
use crate::renderer::{Compositor, to_rgba_image};
use crate::scene::Scene;
use crate::style::{StyleConfig, Tool};

/// One editing session: the scene, the view, the current style and the
/// gesture in progress.
///
/// Every method runs to completion on the caller's thread. Whenever something
/// visible changes a redraw request is raised; the host polls it with
/// [`DrawingSurface::take_redraw_request`].
#[derive(Debug)]
pub struct DrawingSurface {
    config: CanvasConfig,
    style: StyleConfig,
    view: ViewTransform,
    scene: Scene,
    gestures: GestureMachine,
    compositor: Compositor,
    width: u32,
    height: u32,
    redraw_requested: bool,
}

impl DrawingSurface {
    /// New surface with an empty scene and an identity view of the given size.
    pub fn new(config: CanvasConfig, width: u32, height: u32) -> Self {
        let config = config.normalized();
        Self {
            style: StyleConfig::default(),
            view: ViewTransform::new(config.min_scale, config.max_scale),
            scene: Scene::new(config.redo_policy),
            gestures: GestureMachine::new(config.thinning_threshold),
            compositor: Compositor::new(config.background_color),
            config,
            width,
            height,
            redraw_requested: true,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The element being drawn right now, if any.
    pub fn draft(&self) -> Option<&Draft> {
        self.gestures.draft()
    }

    pub fn gestures(&self) -> &GestureMachine {
        &self.gestures
    }

    /// Current view size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Track the view size. Exports are rendered at this size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.request_redraw();
        }
    }

    /// Returns true once after every visible change.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Feed one pointer event through the gesture machine.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> GestureOutcome {
        let outcome = self
            .gestures
            .handle(event, &self.style, &mut self.view, &mut self.scene);
        if outcome.needs_redraw() {
            self.request_redraw();
        }
        outcome
    }

    /// Replace the whole style. Affects only gestures that start afterwards.
    pub fn set_style(&mut self, style: StyleConfig) {
        if style.tool != self.style.tool {
            self.set_tool(style.tool);
        }
        let width = style.stroke_width();
        self.style = style;
        self.set_stroke_width(width);
    }

    /// Switching tools abandons any unfinished draft.
    pub fn set_tool(&mut self, tool: Tool) {
        self.style.tool = tool;
        if self.gestures.cancel() {
            self.request_redraw();
        }
    }

    /// Colour for gestures that start afterwards.
    pub fn set_color(&mut self, color: Color32) {
        self.style.color = color;
    }

    /// Stroke width for later gestures, raised to the configured minimum.
    pub fn set_stroke_width(&mut self, width: f32) {
        self.style
            .set_stroke_width(width, self.config.min_stroke_width);
    }

    /// Fill closed shapes drawn afterwards. Ignored by freehand tools and text.
    pub fn set_fill(&mut self, fill: bool) {
        self.style.fill = fill;
    }

    /// Commit a text element at a screen position, bypassing the gesture
    /// machine. Blank text is ignored.
    pub fn add_text_at(&mut self, text: &str, screen_x: f32, screen_y: f32) -> Option<ElementId> {
        if text.trim().is_empty() {
            return None;
        }
        let anchor = self.view.screen_to_canvas(Pos2::new(screen_x, screen_y));
        let style = ElementStyle::snapshot(&self.style, Tool::Text);
        let shape = Shape::Text(TextShape {
            text: text.to_owned(),
            anchor,
            font_size: self.config.text_size_for(self.style.stroke_width()),
        });
        let element = Element::new(style, shape);
        let id = element.id();
        self.scene.add_item(element);
        self.request_redraw();
        Some(id)
    }

    /// Undo the most recent element. Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let changed = self.scene.undo().is_some();
        if changed {
            self.request_redraw();
        }
        changed
    }

    /// Restore the most recently undone element. Returns false when there was none.
    pub fn redo(&mut self) -> bool {
        let changed = self.scene.redo().is_some();
        if changed {
            self.request_redraw();
        }
        changed
    }

    /// Drop every element, the redo history and any unfinished draft.
    pub fn clear_all(&mut self) {
        self.gestures.cancel();
        self.scene.clear_all();
        self.request_redraw();
    }

    /// Back to the identity view.
    pub fn reset_zoom(&mut self) {
        self.view.reset();
        self.request_redraw();
    }

    /// Use a decoded image as the background, replacing any previous one.
    pub fn set_background(&mut self, image: &RgbaImage) -> CanvasResult<()> {
        self.compositor.set_background(image)?;
        self.request_redraw();
        Ok(())
    }

    /// Decode and use an encoded image as the background. On failure the
    /// previous background is kept.
    pub fn set_background_bytes(&mut self, bytes: &[u8]) -> CanvasResult<()> {
        self.compositor.set_background_bytes(bytes)?;
        self.request_redraw();
        Ok(())
    }

    pub fn has_background(&self) -> bool {
        self.compositor.has_background()
    }

    pub fn clear_background(&mut self) {
        self.compositor.clear_background();
        self.request_redraw();
    }

    /// Render the live view, draft included, into `target`.
    pub fn render_into(&self, target: &mut Pixmap) {
        self.compositor
            .render(target, &self.view, self.scene.items(), self.gestures.draft());
    }

    /// Render the live view into a new pixmap of the current view size.
    pub fn render_pixmap(&self) -> CanvasResult<Pixmap> {
        self.compositor.render_to_buffer(
            self.width,
            self.height,
            &self.view,
            self.scene.items(),
            self.gestures.draft(),
        )
    }

    /// Straight-alpha RGBA snapshot of the current view for export.
    pub fn render_to_bitmap(&self) -> CanvasResult<RgbaImage> {
        if self.width == 0 || self.height == 0 {
            return Err(CanvasError::InvalidSurfaceSize {
                width: self.width,
                height: self.height,
            });
        }
        let pixmap = self.render_pixmap()?;
        log::info!(
            "Rendered {}x{} export with {} elements",
            self.width,
            self.height,
            self.scene.len()
        );
        Ok(to_rgba_image(&pixmap))
    }
}
