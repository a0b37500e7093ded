use egui::Pos2;

use super::{PointerEvent, PointerPhase};
use crate::element::{Element, ElementId, ElementStyle, FreehandPath, Shape};
use crate::geometry::{ViewTransform, isosceles_triangle, normalized_bounds};
use crate::scene::Scene;
use crate::style::{StyleConfig, Tool};

/// What the host should do after an event has been handled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Nothing visible changed.
    Ignored,
    /// The view or the in-progress element changed.
    Redraw,
    /// An element was appended to the scene.
    Committed(ElementId),
    /// The text tool was tapped: the host should ask for a string and call
    /// [`DrawingSurface::add_text_at`](crate::DrawingSurface::add_text_at)
    /// with `screen`.
    TextRequested { screen: Pos2, canvas: Pos2 },
}

impl GestureOutcome {
    pub fn needs_redraw(&self) -> bool {
        matches!(self, Self::Redraw | Self::Committed(_))
    }
}

/// An element under construction. Owned exclusively by the gesture machine.
#[derive(Debug, Clone)]
pub struct Draft {
    tool: Tool,
    style: ElementStyle,
    start: Pos2,
    shape: Option<Shape>,
    // Last point accepted by the freehand thinning filter.
    last_canvas: Pos2,
    last_screen: Pos2,
}

impl Draft {
    fn new(tool: Tool, style: ElementStyle, screen: Pos2, canvas: Pos2) -> Self {
        let shape = match tool {
            Tool::Pen | Tool::Eraser => Some(Shape::Freehand(FreehandPath::new(canvas))),
            _ => None,
        };
        Self {
            tool,
            style,
            start: canvas,
            shape,
            last_canvas: canvas,
            last_screen: screen,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn style(&self) -> &ElementStyle {
        &self.style
    }

    /// `None` for a shape tool that has not seen a move yet.
    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_ref()
    }

    /// Returns true if the draft changed.
    fn update(&mut self, screen: Pos2, view: &ViewTransform, thinning_threshold: f32) -> bool {
        let cur = view.screen_to_canvas(screen);
        match (&mut self.shape, self.tool) {
            (Some(Shape::Freehand(path)), _) => {
                let delta = (screen - self.last_screen).abs();
                if delta.x < thinning_threshold && delta.y < thinning_threshold {
                    return false;
                }
                path.quad_smooth_to(self.last_canvas, cur);
                self.last_canvas = cur;
                self.last_screen = screen;
            }
            (shape, Tool::Rectangle) => {
                *shape = Some(Shape::Rectangle(normalized_bounds(self.start, cur)));
            }
            (shape, Tool::Ellipse) => {
                *shape = Some(Shape::Ellipse(normalized_bounds(self.start, cur)));
            }
            (shape, Tool::Triangle) => {
                *shape = Some(Shape::Triangle(isosceles_triangle(self.start, cur)));
            }
            _ => return false,
        }
        true
    }

    /// Turn the draft into a committed element, if it has any geometry.
    fn finish(self, release: Pos2) -> Option<Element> {
        let mut shape = self.shape?;
        if let Shape::Freehand(path) = &mut shape {
            path.line_to(release);
        }
        Some(Element::new(self.style, shape))
    }
}

#[derive(Debug, Clone, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing(Draft),
    /// Two or more pointers are down; `last` is the previous screen position.
    Panning { last: Pos2 },
}

impl GestureState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drawing(_) => "Drawing",
            Self::Panning { .. } => "Panning",
        }
    }
}

/// Turns a stream of pointer events into view changes and committed elements.
#[derive(Debug, Clone)]
pub struct GestureMachine {
    state: GestureState,
    last_pos: Option<Pos2>,
    thinning_threshold: f32,
}

impl Default for GestureMachine {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl GestureMachine {
    pub fn new(thinning_threshold: f32) -> Self {
        Self {
            state: GestureState::Idle,
            last_pos: None,
            thinning_threshold,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            GestureState::Drawing(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, GestureState::Panning { .. })
    }

    /// Abandon the current gesture. Returns true if a draft was dropped.
    pub fn cancel(&mut self) -> bool {
        let had_draft = matches!(self.state, GestureState::Drawing(_));
        self.state = GestureState::Idle;
        had_draft
    }

    pub fn handle(
        &mut self,
        event: &PointerEvent,
        style: &StyleConfig,
        view: &mut ViewTransform,
        scene: &mut Scene,
    ) -> GestureOutcome {
        let mut changed = false;

        if let Some(pinch) = event.pinch {
            let before = view.scale();
            view.zoom(pinch.scale, pinch.focus);
            changed |= view.scale() != before;
        }

        if event.pointer_count >= 2 && !self.is_panning() {
            changed |= self.start_panning(event);
        }

        let outcome = match event.phase {
            PointerPhase::Down => self.on_down(event, style, view),
            PointerPhase::Move => self.on_move(event, view),
            PointerPhase::Up | PointerPhase::SecondaryUp => self.on_up(event, view, scene),
        };

        if changed && outcome == GestureOutcome::Ignored {
            GestureOutcome::Redraw
        } else {
            outcome
        }
    }

    /// Returns true if a visible draft was discarded.
    fn start_panning(&mut self, event: &PointerEvent) -> bool {
        // A fresh multi-pointer press anchors the pan where it lands; a pointer
        // joining mid-gesture continues from the last tracked position.
        let last = match event.phase {
            PointerPhase::Down => event.pos,
            _ => self.last_pos.unwrap_or(event.pos),
        };
        let previous = std::mem::replace(&mut self.state, GestureState::Panning { last });
        log::debug!("{} -> Panning", previous.name());
        match previous {
            GestureState::Drawing(draft) => {
                log::debug!("Discarding unfinished {} draft", draft.tool.name());
                draft.shape.is_some()
            }
            _ => false,
        }
    }

    fn on_down(
        &mut self,
        event: &PointerEvent,
        style: &StyleConfig,
        view: &ViewTransform,
    ) -> GestureOutcome {
        self.last_pos = Some(event.pos);

        if event.pointer_count != 1 {
            return GestureOutcome::Ignored;
        }

        let canvas = view.screen_to_canvas(event.pos);
        if !style.tool.is_drag_tool() {
            self.state = GestureState::Idle;
            return GestureOutcome::TextRequested {
                screen: event.pos,
                canvas,
            };
        }

        if let GestureState::Drawing(draft) = &self.state {
            log::debug!("Replacing unfinished {} draft", draft.tool.name());
        }

        let element_style = ElementStyle::snapshot(style, style.tool);
        log::debug!("Idle -> Drawing ({})", style.tool.name());
        self.state = GestureState::Drawing(Draft::new(style.tool, element_style, event.pos, canvas));
        GestureOutcome::Redraw
    }

    fn on_move(&mut self, event: &PointerEvent, view: &mut ViewTransform) -> GestureOutcome {
        match &mut self.state {
            GestureState::Panning { last } if event.pointer_count >= 2 => {
                let delta = event.pos - *last;
                view.pan(delta.x, delta.y);
                *last = event.pos;
                self.last_pos = Some(event.pos);
                GestureOutcome::Redraw
            }
            GestureState::Drawing(draft) if event.pointer_count == 1 => {
                self.last_pos = Some(event.pos);
                if draft.update(event.pos, view, self.thinning_threshold) {
                    GestureOutcome::Redraw
                } else {
                    GestureOutcome::Ignored
                }
            }
            _ => GestureOutcome::Ignored,
        }
    }

    fn on_up(
        &mut self,
        event: &PointerEvent,
        view: &ViewTransform,
        scene: &mut Scene,
    ) -> GestureOutcome {
        match std::mem::take(&mut self.state) {
            GestureState::Drawing(draft) => {
                let release = view.screen_to_canvas(event.pos);
                match draft.finish(release) {
                    Some(element) => {
                        let id = element.id();
                        scene.add_item(element);
                        GestureOutcome::Committed(id)
                    }
                    None => {
                        log::debug!("Dropping shape draft without geometry");
                        GestureOutcome::Ignored
                    }
                }
            }
            GestureState::Panning { .. } => {
                log::debug!("Panning -> Idle");
                GestureOutcome::Redraw
            }
            GestureState::Idle => GestureOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (GestureMachine, StyleConfig, ViewTransform, Scene) {
        (
            GestureMachine::default(),
            StyleConfig::default(),
            ViewTransform::default(),
            Scene::default(),
        )
    }

    #[test]
    fn test_move_before_down_is_ignored() {
        let (mut machine, style, mut view, mut scene) = setup();
        let outcome = machine.handle(&PointerEvent::moved(Pos2::new(5.0, 5.0), 1), &style, &mut view, &mut scene);
        assert_eq!(outcome, GestureOutcome::Ignored);
        let outcome = machine.handle(&PointerEvent::up(Pos2::new(5.0, 5.0)), &style, &mut view, &mut scene);
        assert_eq!(outcome, GestureOutcome::Ignored);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_thinning_filter_drops_small_moves() {
        let (mut machine, style, mut view, mut scene) = setup();
        machine.handle(&PointerEvent::down(Pos2::new(0.0, 0.0)), &style, &mut view, &mut scene);
        let outcome = machine.handle(&PointerEvent::moved(Pos2::new(1.0, 1.5), 1), &style, &mut view, &mut scene);
        assert_eq!(outcome, GestureOutcome::Ignored);
        let outcome = machine.handle(&PointerEvent::moved(Pos2::new(2.0, 0.0), 1), &style, &mut view, &mut scene);
        assert_eq!(outcome, GestureOutcome::Redraw);

        let Some(Shape::Freehand(path)) = machine.draft().and_then(Draft::shape) else {
            panic!("expected a freehand draft");
        };
        assert_eq!(path.segments().len(), 1);
    }

    #[test]
    fn test_thinning_is_measured_in_screen_space() {
        let (mut machine, style, mut view, mut scene) = setup();
        view.zoom(4.0, Pos2::ZERO);
        machine.handle(&PointerEvent::down(Pos2::new(0.0, 0.0)), &style, &mut view, &mut scene);
        // 3 screen pixels are well under 2 canvas units at 4x, but still accepted.
        let outcome = machine.handle(&PointerEvent::moved(Pos2::new(3.0, 0.0), 1), &style, &mut view, &mut scene);
        assert_eq!(outcome, GestureOutcome::Redraw);
    }

    #[test]
    fn test_text_tool_requests_input() {
        let (mut machine, mut style, mut view, mut scene) = setup();
        style.tool = Tool::Text;
        view.pan(10.0, 0.0);
        let outcome = machine.handle(&PointerEvent::down(Pos2::new(30.0, 5.0)), &style, &mut view, &mut scene);
        assert_eq!(
            outcome,
            GestureOutcome::TextRequested {
                screen: Pos2::new(30.0, 5.0),
                canvas: Pos2::new(20.0, 5.0),
            }
        );
        assert!(matches!(machine.state(), GestureState::Idle));
    }

    #[test]
    fn test_shape_tap_commits_nothing() {
        let (mut machine, mut style, mut view, mut scene) = setup();
        style.tool = Tool::Ellipse;
        machine.handle(&PointerEvent::down(Pos2::new(4.0, 4.0)), &style, &mut view, &mut scene);
        let outcome = machine.handle(&PointerEvent::up(Pos2::new(4.0, 4.0)), &style, &mut view, &mut scene);
        assert_eq!(outcome, GestureOutcome::Ignored);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_style_is_snapshotted_at_gesture_start() {
        let (mut machine, mut style, mut view, mut scene) = setup();
        style.tool = Tool::Rectangle;
        style.color = egui::Color32::RED;
        machine.handle(&PointerEvent::down(Pos2::new(0.0, 0.0)), &style, &mut view, &mut scene);
        style.color = egui::Color32::GREEN;
        style.tool = Tool::Pen;
        machine.handle(&PointerEvent::moved(Pos2::new(10.0, 10.0), 1), &style, &mut view, &mut scene);
        machine.handle(&PointerEvent::up(Pos2::new(10.0, 10.0)), &style, &mut view, &mut scene);

        let element = &scene.items()[0];
        assert_eq!(element.style().color, egui::Color32::RED);
        assert!(matches!(element.shape(), Shape::Rectangle(_)));
    }

    #[test]
    fn test_cancel_drops_draft() {
        let (mut machine, style, mut view, mut scene) = setup();
        machine.handle(&PointerEvent::down(Pos2::new(0.0, 0.0)), &style, &mut view, &mut scene);
        assert!(machine.cancel());
        assert!(!machine.cancel());
        machine.handle(&PointerEvent::up(Pos2::new(5.0, 5.0)), &style, &mut view, &mut scene);
        assert!(scene.is_empty());
    }
}
