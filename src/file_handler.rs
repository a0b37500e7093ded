use eframe::egui;

use crate::DrawingSurface;
use crate::error::{CanvasError, CanvasResult};

/// Turns image files dropped onto the window into the canvas background, and
/// writes exports to disk.
#[derive(Default)]
pub struct FileHandler {
    last_error: Option<String>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent failure, for display in the UI.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Use the last dropped image file, if any, as the background.
    /// Returns true if the background changed.
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context, surface: &mut DrawingSurface) -> bool {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.iter().rev().find(|file| Self::is_image_file(file)) else {
            for file in &dropped {
                log::warn!("Dropped file is not a supported type: {}", Self::display_name(file));
            }
            return false;
        };

        let name = Self::display_name(file);
        match Self::read_bytes(file).and_then(|bytes| surface.set_background_bytes(&bytes)) {
            Ok(()) => {
                log::info!("Background loaded from {name}");
                self.last_error = None;
                ctx.request_repaint();
                true
            }
            Err(err) => {
                log::warn!("Could not use {name} as background: {err}");
                self.last_error = Some(format!("{name}: {err}"));
                false
            }
        }
    }

    /// Render the current view and save it as a PNG.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn export_png(&mut self, surface: &DrawingSurface, path: &std::path::Path) -> CanvasResult<()> {
        let result = surface.render_to_bitmap().and_then(|bitmap| {
            bitmap
                .save_with_format(path, image::ImageFormat::Png)
                .map_err(CanvasError::Encode)
        });
        match &result {
            Ok(()) => log::info!("Exported canvas to {}", path.display()),
            Err(err) => {
                log::warn!("Export to {} failed: {err}", path.display());
                self.last_error = Some(err.to_string());
            }
        }
        result
    }

    fn display_name(file: &egui::DroppedFile) -> String {
        if let Some(path) = &file.path {
            path.display().to_string()
        } else if !file.name.is_empty() {
            file.name.clone()
        } else {
            "unknown".to_owned()
        }
    }

    fn read_bytes(file: &egui::DroppedFile) -> CanvasResult<Vec<u8>> {
        if let Some(bytes) = &file.bytes {
            return Ok(bytes.to_vec());
        }
        match &file.path {
            Some(path) => Ok(std::fs::read(path)?),
            None => Err(CanvasError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "dropped file has no accessible data",
            ))),
        }
    }

    /// Check if a file is an image based on MIME type or extension
    fn is_image_file(file: &egui::DroppedFile) -> bool {
        if !file.mime.is_empty() {
            file.mime.starts_with("image/")
        } else if let Some(ext) = file.path.as_ref().and_then(|path| path.extension()) {
            let ext = ext.to_string_lossy().to_lowercase();
            matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
        } else {
            false
        }
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop an image to use it as the background",
            egui::TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}
