use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::config::CanvasConfig;
use crate::error::CanvasResult;
use crate::file_handler::FileHandler;
use crate::input::{GestureOutcome, InputHandler};
use crate::panels::{central_panel, tools_panel};
use crate::style::StyleConfig;
use crate::texture_manager::TextureManager;
use crate::DrawingSurface;

/// Environment variable naming a JSON file with a [`CanvasConfig`].
pub const CONFIG_ENV_VAR: &str = "TOUCH_CANVAS_CONFIG";

/// What survives a restart. The drawing itself does not.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct PersistedSettings {
    style: StyleConfig,
    config: CanvasConfig,
}

/// A text tap waiting for the user to type its string.
struct PendingText {
    screen: egui::Pos2,
    text: String,
    focused: bool,
}

pub struct PaintApp {
    surface: DrawingSurface,
    input: InputHandler,
    textures: TextureManager,
    files: FileHandler,
    pending_text: Option<PendingText>,
    export_path: String,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_settings(CanvasConfig::default(), StyleConfig::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let persisted: PersistedSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let config = match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => match load_config_file(&path) {
                Ok(config) => {
                    log::info!("Loaded canvas config from {path}");
                    config
                }
                Err(err) => {
                    log::warn!("Ignoring canvas config {path}: {err}");
                    persisted.config
                }
            },
            Err(_) => persisted.config,
        };

        Self::with_settings(config, persisted.style)
    }

    fn with_settings(config: CanvasConfig, style: StyleConfig) -> Self {
        let mut surface = DrawingSurface::new(config, 0, 0);
        surface.set_style(style);
        Self {
            surface,
            input: InputHandler::new(),
            textures: TextureManager::new(),
            files: FileHandler::new(),
            pending_text: None,
            export_path: "canvas.png".to_owned(),
        }
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DrawingSurface {
        &mut self.surface
    }

    pub fn files(&self) -> &FileHandler {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut FileHandler {
        &mut self.files
    }

    pub fn export_path_mut(&mut self) -> &mut String {
        &mut self.export_path
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn export(&mut self) {
        let path = std::path::PathBuf::from(&self.export_path);
        // Failures are recorded by the file handler for display.
        let _ = self.files.export_png(&self.surface, &path);
    }

    /// Feed this frame's input to the surface and paint the composed canvas
    /// into `rect`.
    pub fn handle_canvas(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect) {
        let width = rect.width().max(0.0).floor() as u32;
        let height = rect.height().max(0.0).floor() as u32;
        self.surface.resize(width, height);

        self.files.handle_dropped_files(ctx, &mut self.surface);
        self.route_input(ctx, rect);

        if width == 0 || height == 0 {
            return;
        }
        match self.textures.frame_texture(ctx, &mut self.surface) {
            Ok(texture) => {
                let image_rect =
                    egui::Rect::from_min_size(rect.min, egui::vec2(width as f32, height as f32));
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(texture, image_rect, uv, egui::Color32::WHITE);
            }
            Err(err) => log::warn!("Canvas render failed: {err}"),
        }
    }

    /// Route this frame's pointer input to the surface.
    ///
    /// Input is always read so touch tracking stays in sync, but it is
    /// dropped while the text dialog is waiting for a string.
    fn route_input(&mut self, ctx: &egui::Context, rect: egui::Rect) {
        let events = self.input.process_input(ctx, rect);
        if self.pending_text.is_some() {
            return;
        }
        for event in events {
            if let GestureOutcome::TextRequested { screen, .. } = self.surface.handle_pointer(&event) {
                self.pending_text = Some(PendingText {
                    screen,
                    text: String::new(),
                    focused: false,
                });
                // The rest of this frame belongs to the tap that opened the dialog.
                break;
            }
        }
    }

    fn show_text_dialog(&mut self, ctx: &egui::Context) {
        let Some(pending) = &mut self.pending_text else {
            return;
        };

        let mut open = true;
        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new("Add text")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                let edit = ui.text_edit_singleline(&mut pending.text);
                if !pending.focused {
                    edit.request_focus();
                    pending.focused = true;
                }
                if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    confirmed = true;
                }
                ui.horizontal(|ui| {
                    confirmed |= ui.button("Add").clicked();
                    cancelled |= ui.button("Cancel").clicked();
                });
            });

        if confirmed {
            if let Some(pending) = self.pending_text.take() {
                self.surface
                    .add_text_at(&pending.text, pending.screen.x, pending.screen.y);
            }
        } else if cancelled || !open {
            self.pending_text = None;
        }
    }
}

fn load_config_file(path: &str) -> CanvasResult<CanvasConfig> {
    let json = std::fs::read_to_string(path)?;
    CanvasConfig::from_json_str(&json)
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings {
            style: self.surface.style().clone(),
            config: self.surface.config().clone(),
        };
        eframe::set_value(storage, eframe::APP_KEY, &settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
        self.show_text_dialog(ctx);
        self.files.preview_files_being_dropped(ctx);
    }
}
