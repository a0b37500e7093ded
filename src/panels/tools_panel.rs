use crate::PaintApp;
use crate::style::Tool;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active_tool = app.surface().style().tool;
            for tool in Tool::ALL {
                if ui.selectable_label(active_tool == tool, tool.name()).clicked() {
                    log::info!("Tool selected from UI: {}", tool.name());
                    app.surface_mut().set_tool(tool);
                }
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color");
                let mut color = app.surface().style().color;
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::OnlyBlend,
                )
                .changed()
                {
                    app.surface_mut().set_color(color);
                }
            });

            let min_width = app.surface().config().min_stroke_width;
            let mut width = app.surface().style().stroke_width();
            if ui
                .add(egui::Slider::new(&mut width, min_width..=100.0).text("Width"))
                .changed()
            {
                app.surface_mut().set_stroke_width(width);
            }

            let mut fill = app.surface().style().fill;
            let fill_enabled = app.surface().style().tool.supports_fill();
            if ui
                .add_enabled(fill_enabled, egui::Checkbox::new(&mut fill, "Fill shapes"))
                .changed()
            {
                app.surface_mut().set_fill(fill);
            }
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.surface().scene().can_undo();
                let can_redo = app.surface().scene().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.surface_mut().undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.surface_mut().redo();
                }
            });

            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    log::info!("Clearing canvas from UI");
                    app.surface_mut().clear_all();
                }
                if ui.button("Reset zoom").clicked() {
                    app.surface_mut().reset_zoom();
                }
            });

            if app.surface().has_background() && ui.button("Remove background").clicked() {
                app.surface_mut().clear_background();
            }
            ui.separator();

            #[cfg(not(target_arch = "wasm32"))]
            {
                ui.label("Export to");
                ui.text_edit_singleline(app.export_path_mut());
                if ui.button("Export PNG").clicked() {
                    app.export();
                }
                ui.separator();
            }

            let scene = app.surface().scene();
            ui.horizontal(|ui| {
                ui.label(format!("Elements: {}", scene.len()));
                ui.label(format!("Redo stack size: {}", scene.undo_stack().len()));
            });
            let view = app.surface().view();
            let (min_scale, max_scale) = view.scale_range();
            ui.label(format!(
                "Zoom: {:.0}% ({:.0}%..{:.0}%)",
                view.scale() * 100.0,
                min_scale * 100.0,
                max_scale * 100.0
            ));
            ui.label(format!("Gesture: {}", app.surface().gestures().state().name()));

            let mut dismissed = false;
            if let Some(error) = app.files().last_error() {
                ui.separator();
                ui.colored_label(ui.visuals().error_fg_color, error);
                dismissed = ui.button("Dismiss").clicked();
            }
            if dismissed {
                app.files_mut().dismiss_error();
            }
        });
}
