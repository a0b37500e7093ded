use egui::{Color32, Pos2};
use touch_canvas::{CanvasConfig, CanvasError, DrawingSurface, PointerEvent, Tool};

fn drag(surface: &mut DrawingSurface, points: &[Pos2]) {
    surface.handle_pointer(&PointerEvent::down(points[0]));
    for point in &points[1..] {
        surface.handle_pointer(&PointerEvent::moved(*point, 1));
    }
    surface.handle_pointer(&PointerEvent::up(points[points.len() - 1]));
}

fn busy_surface() -> DrawingSurface {
    let mut surface = DrawingSurface::new(CanvasConfig::default(), 160, 120);
    surface.set_color(Color32::from_rgb(200, 30, 30));
    drag(
        &mut surface,
        &[Pos2::new(10.0, 10.0), Pos2::new(40.0, 30.0), Pos2::new(90.0, 35.0), Pos2::new(120.0, 90.0)],
    );

    surface.set_tool(Tool::Rectangle);
    surface.set_fill(true);
    surface.set_color(Color32::from_rgb(30, 30, 200));
    drag(&mut surface, &[Pos2::new(60.0, 60.0), Pos2::new(100.0, 100.0)]);

    surface.set_tool(Tool::Eraser);
    drag(&mut surface, &[Pos2::new(0.0, 80.0), Pos2::new(150.0, 80.0)]);

    surface.add_text_at("Hi", 20.0, 110.0);
    surface.handle_pointer(&PointerEvent::moved(Pos2::ZERO, 0).with_pinch(1.5, Pos2::new(80.0, 60.0)));
    surface
}

#[test]
fn test_export_has_view_size() {
    let surface = DrawingSurface::new(CanvasConfig::default(), 64, 48);
    let bitmap = surface.render_to_bitmap().unwrap();
    assert_eq!(bitmap.dimensions(), (64, 48));
    assert_eq!(bitmap.get_pixel(10, 10).0, [255, 255, 255, 255]);
}

#[test]
fn test_export_before_layout_fails() {
    let surface = DrawingSurface::new(CanvasConfig::default(), 0, 0);
    assert!(matches!(
        surface.render_to_bitmap(),
        Err(CanvasError::InvalidSurfaceSize { width: 0, height: 0 })
    ));
}

#[test]
fn test_export_matches_on_screen_frame() {
    let surface = busy_surface();
    let frame = surface.render_pixmap().unwrap();
    let bitmap = surface.render_to_bitmap().unwrap();

    assert_eq!(bitmap.dimensions(), (frame.width(), frame.height()));
    let on_screen = touch_canvas::renderer::to_rgba_image(&frame);
    assert_eq!(on_screen.as_raw(), bitmap.as_raw());
}

#[test]
fn test_export_includes_draft_in_progress() {
    let mut surface = DrawingSurface::new(CanvasConfig::default(), 100, 100);
    surface.set_tool(Tool::Rectangle);
    surface.set_fill(true);
    surface.set_color(Color32::BLACK);
    surface.handle_pointer(&PointerEvent::down(Pos2::new(20.0, 20.0)));
    surface.handle_pointer(&PointerEvent::moved(Pos2::new(80.0, 80.0), 1));

    let bitmap = surface.render_to_bitmap().unwrap();
    assert_eq!(bitmap.get_pixel(50, 50).0, [0, 0, 0, 255]);
    assert!(surface.scene().is_empty());
}

#[test]
fn test_background_image_appears_in_export() {
    let mut surface = DrawingSurface::new(CanvasConfig::default(), 40, 40);
    let background = image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 200, 0, 255]));
    surface.set_background(&background).unwrap();

    let bitmap = surface.render_to_bitmap().unwrap();
    assert_eq!(bitmap.get_pixel(20, 20).0, [0, 200, 0, 255]);

    surface.clear_background();
    let bitmap = surface.render_to_bitmap().unwrap();
    assert_eq!(bitmap.get_pixel(20, 20).0, [255, 255, 255, 255]);
}

#[test]
fn test_undo_removes_element_from_export() {
    let mut surface = DrawingSurface::new(CanvasConfig::default(), 100, 100);
    surface.set_tool(Tool::Rectangle);
    surface.set_fill(true);
    drag(&mut surface, &[Pos2::new(20.0, 20.0), Pos2::new(80.0, 80.0)]);
    assert_eq!(surface.render_to_bitmap().unwrap().get_pixel(50, 50).0, [0, 0, 0, 255]);

    surface.undo();
    assert_eq!(
        surface.render_to_bitmap().unwrap().get_pixel(50, 50).0,
        [255, 255, 255, 255]
    );
}
