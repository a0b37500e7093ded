use egui::{Context, PointerButton, Pos2, Rect, TouchId, TouchPhase};

mod gestures;
pub use gestures::{Draft, GestureMachine, GestureOutcome, GestureState};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    /// The last pointer was lifted.
    Up,
    /// One of several pointers was lifted.
    SecondaryUp,
}

/// Pinch-zoom delta reported alongside a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pinch {
    /// Relative scale since the previous event.
    pub scale: f32,
    /// Screen-space focus point.
    pub focus: Pos2,
}

/// One input event in surface screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub pointer_count: usize,
    pub pos: Pos2,
    pub pinch: Option<Pinch>,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, pointer_count: usize, pos: Pos2) -> Self {
        Self {
            phase,
            pointer_count,
            pos,
            pinch: None,
        }
    }

    /// Single pointer press.
    pub fn down(pos: Pos2) -> Self {
        Self::new(PointerPhase::Down, 1, pos)
    }

    pub fn moved(pos: Pos2, pointer_count: usize) -> Self {
        Self::new(PointerPhase::Move, pointer_count, pos)
    }

    /// Last pointer released.
    pub fn up(pos: Pos2) -> Self {
        Self::new(PointerPhase::Up, 1, pos)
    }

    pub fn with_pinch(mut self, scale: f32, focus: Pos2) -> Self {
        self.pinch = Some(Pinch { scale, focus });
        self
    }
}

/// Converts raw egui touch and mouse input into [`PointerEvent`]s relative to
/// the canvas rectangle.
///
/// With a mouse, the secondary button drags like a two-finger pan and
/// ctrl+wheel (or a trackpad pinch) zooms.
#[derive(Debug, Default)]
pub struct InputHandler {
    touches: Vec<(TouchId, Pos2)>,
    mouse_gesture: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process raw egui input and generate our PointerEvents.
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect) -> Vec<PointerEvent> {
        let origin = canvas_rect.min.to_vec2();
        let mut events = Vec::new();

        ctx.input(|input| {
            let mut saw_touch = false;
            for event in &input.events {
                if let egui::Event::Touch { id, phase, pos, .. } = event {
                    saw_touch = true;
                    self.handle_touch(*id, *phase, *pos, canvas_rect, &mut events);
                }
            }

            if let Some(multi) = input.multi_touch() {
                if multi.num_touches >= 2 && multi.zoom_delta != 1.0 {
                    if let Some(primary) = self.primary_pos() {
                        let event = PointerEvent::moved(primary, self.touches.len())
                            .with_pinch(multi.zoom_delta, multi.center_pos - origin);
                        events.push(event);
                    }
                }
            }

            // egui mirrors touches onto the pointer, so only read the mouse
            // when no fingers are involved.
            if saw_touch || input.any_touches() || !self.touches.is_empty() {
                return;
            }

            let pointer = &input.pointer;
            let Some(pos) = pointer.latest_pos() else {
                return;
            };
            let local = pos - origin;

            if pointer.primary_pressed() && canvas_rect.contains(pos) {
                self.mouse_gesture = true;
                events.push(PointerEvent::down(local));
            } else if pointer.button_pressed(PointerButton::Secondary) && canvas_rect.contains(pos) {
                self.mouse_gesture = true;
                events.push(PointerEvent::new(PointerPhase::Down, 2, local));
            }

            if self.mouse_gesture && pointer.delta() != egui::Vec2::ZERO {
                if pointer.primary_down() {
                    events.push(PointerEvent::moved(local, 1));
                } else if pointer.button_down(PointerButton::Secondary) {
                    events.push(PointerEvent::moved(local, 2));
                }
            }

            if self.mouse_gesture && (pointer.primary_released() || pointer.button_released(PointerButton::Secondary)) {
                self.mouse_gesture = false;
                events.push(PointerEvent::up(local));
            }

            let zoom = input.zoom_delta();
            if zoom != 1.0 && canvas_rect.contains(pos) {
                events.push(PointerEvent::moved(local, 0).with_pinch(zoom, local));
            }
        });

        events
    }

    fn primary_pos(&self) -> Option<Pos2> {
        self.touches.first().map(|(_, pos)| *pos)
    }

    fn handle_touch(
        &mut self,
        id: TouchId,
        phase: TouchPhase,
        pos: Pos2,
        canvas_rect: Rect,
        events: &mut Vec<PointerEvent>,
    ) {
        let local = pos - canvas_rect.min.to_vec2();
        match phase {
            TouchPhase::Start => {
                if self.touches.is_empty() && !canvas_rect.contains(pos) {
                    return;
                }
                self.touches.push((id, local));
                let primary = self.primary_pos().unwrap_or(local);
                events.push(PointerEvent::new(PointerPhase::Down, self.touches.len(), primary));
            }
            TouchPhase::Move => {
                let Some(entry) = self.touches.iter_mut().find(|(touch, _)| *touch == id) else {
                    return;
                };
                entry.1 = local;
                let primary = self.primary_pos().unwrap_or(local);
                events.push(PointerEvent::moved(primary, self.touches.len()));
            }
            TouchPhase::End | TouchPhase::Cancel => {
                let Some(index) = self.touches.iter().position(|(touch, _)| *touch == id) else {
                    return;
                };
                self.touches.remove(index);
                if self.touches.is_empty() {
                    events.push(PointerEvent::up(local));
                } else {
                    let primary = self.primary_pos().unwrap_or(local);
                    events.push(PointerEvent::new(
                        PointerPhase::SecondaryUp,
                        self.touches.len(),
                        primary,
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Event, RawInput, TouchDeviceId};

    fn canvas_rect() -> Rect {
        Rect::from_min_size(Pos2::new(10.0, 20.0), egui::vec2(200.0, 200.0))
    }

    fn touch(id: u64, phase: TouchPhase, pos: Pos2) -> Event {
        Event::Touch {
            device_id: TouchDeviceId(0),
            id: TouchId(id),
            phase,
            pos,
            force: None,
        }
    }

    fn frame(ctx: &Context, handler: &mut InputHandler, events: Vec<Event>) -> Vec<PointerEvent> {
        let raw = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, egui::vec2(400.0, 400.0))),
            events,
            ..Default::default()
        };
        let mut out = Vec::new();
        let _ = ctx.run(raw, |ctx| out = handler.process_input(ctx, canvas_rect()));
        out
    }

    #[test]
    fn test_touch_positions_are_canvas_relative() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        let events = frame(&ctx, &mut handler, vec![touch(1, TouchPhase::Start, Pos2::new(60.0, 70.0))]);
        assert_eq!(events, vec![PointerEvent::down(Pos2::new(50.0, 50.0))]);
    }

    #[test]
    fn test_second_finger_reports_two_pointers() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        frame(&ctx, &mut handler, vec![touch(1, TouchPhase::Start, Pos2::new(60.0, 70.0))]);
        let events = frame(&ctx, &mut handler, vec![touch(2, TouchPhase::Start, Pos2::new(100.0, 70.0))]);
        assert_eq!(events[0].phase, PointerPhase::Down);
        assert_eq!(events[0].pointer_count, 2);

        let events = frame(&ctx, &mut handler, vec![touch(2, TouchPhase::End, Pos2::new(100.0, 70.0))]);
        assert_eq!(events[0].phase, PointerPhase::SecondaryUp);
        assert_eq!(events[0].pointer_count, 1);

        let events = frame(&ctx, &mut handler, vec![touch(1, TouchPhase::End, Pos2::new(60.0, 70.0))]);
        assert_eq!(events[0].phase, PointerPhase::Up);
    }

    #[test]
    fn test_lifted_finger_is_forgotten() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        frame(&ctx, &mut handler, vec![touch(1, TouchPhase::Start, Pos2::new(60.0, 70.0))]);
        frame(&ctx, &mut handler, vec![touch(1, TouchPhase::End, Pos2::new(60.0, 70.0))]);

        let events = frame(&ctx, &mut handler, vec![touch(2, TouchPhase::Start, Pos2::new(90.0, 90.0))]);
        assert_eq!(events[0].pointer_count, 1);
    }

    #[test]
    fn test_touch_starting_outside_canvas_is_ignored() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        let events = frame(&ctx, &mut handler, vec![touch(1, TouchPhase::Start, Pos2::new(5.0, 5.0))]);
        assert!(events.is_empty());

        let events = frame(&ctx, &mut handler, vec![touch(1, TouchPhase::End, Pos2::new(5.0, 5.0))]);
        assert!(events.is_empty());
    }
}
