use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let canvas_rect = ui.available_rect_before_wrap();
            // Claim the area so egui does not treat drags on it as window drags.
            ui.allocate_rect(canvas_rect, egui::Sense::click_and_drag());

            let painter = ui.painter_at(canvas_rect);
            app.handle_canvas(ctx, &painter, canvas_rect);

            if app.surface().draft().is_some() || app.surface().gestures().is_panning() {
                ctx.request_repaint();
            }
        });
}
