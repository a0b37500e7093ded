use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use tiny_skia::Pixmap;

use crate::DrawingSurface;
use crate::error::CanvasResult;

/// Keeps the composited canvas uploaded as a single egui texture.
///
/// The frame is only re-rendered when the surface asks for a redraw or the
/// view size changes; otherwise the cached texture is reused.
#[derive(Default)]
pub struct TextureManager {
    frame: Option<Pixmap>,
    texture: Option<TextureHandle>,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-render the surface if needed and return the texture to paint.
    pub fn frame_texture(
        &mut self,
        ctx: &Context,
        surface: &mut DrawingSurface,
    ) -> CanvasResult<TextureId> {
        let (width, height) = surface.size();
        let size_changed = self
            .frame
            .as_ref()
            .is_none_or(|frame| frame.width() != width || frame.height() != height);

        if size_changed {
            self.frame = Some(surface.render_pixmap()?);
            surface.take_redraw_request();
        } else if surface.take_redraw_request() {
            if let Some(frame) = &mut self.frame {
                surface.render_into(frame);
            }
        } else if let Some(texture) = &self.texture {
            return Ok(texture.id());
        }

        let Some(frame) = &self.frame else {
            return Ok(TextureId::default());
        };
        let image = ColorImage::from_rgba_premultiplied(
            [frame.width() as usize, frame.height() as usize],
            frame.data(),
        );

        if let Some(texture) = &mut self.texture {
            texture.set(image, TextureOptions::NEAREST);
            return Ok(texture.id());
        }
        let texture = ctx.load_texture("canvas_frame", image, TextureOptions::NEAREST);
        let id = texture.id();
        self.texture = Some(texture);
        Ok(id)
    }
}
