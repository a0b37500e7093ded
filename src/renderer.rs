use egui::{Color32, Rect};
use image::RgbaImage;
use tiny_skia::{
    BlendMode, ColorU8, FillRule, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pattern,
    Pixmap, SpreadMode, Stroke, Transform,
};

use crate::element::{Element, ElementStyle, Shape};
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::ViewTransform;
use crate::input::Draft;

mod text;
pub use text::GlyphFont;

/// Paints the background, the committed elements and the in-progress draft
/// into a pixmap.
///
/// The on-screen view and exports both go through [`Compositor::render`], so
/// an export matches what the user sees pixel for pixel.
#[derive(Debug)]
pub struct Compositor {
    background: Option<Pixmap>,
    background_color: Color32,
    font: Option<GlyphFont>,
}

impl Compositor {
    pub fn new(background_color: Color32) -> Self {
        let font = GlyphFont::default_font();
        if font.is_none() {
            log::warn!("No default font available, text elements will not be drawn");
        }
        Self {
            background: None,
            background_color,
            font,
        }
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Replace the background with a decoded image.
    pub fn set_background(&mut self, image: &RgbaImage) -> CanvasResult<()> {
        let (width, height) = image.dimensions();
        let mut pixmap =
            Pixmap::new(width, height).ok_or(CanvasError::InvalidSurfaceSize { width, height })?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }
        log::info!("Background set ({width}x{height})");
        self.background = Some(pixmap);
        Ok(())
    }

    /// Decode an encoded image (PNG, JPEG, ...) and use it as the background.
    /// On failure the previous background is kept.
    pub fn set_background_bytes(&mut self, bytes: &[u8]) -> CanvasResult<()> {
        let image = image::load_from_memory(bytes)
            .map_err(CanvasError::BackgroundDecode)?
            .to_rgba8();
        self.set_background(&image)
    }

    pub fn clear_background(&mut self) {
        self.background = None;
    }

    /// Render into `target`, which defines the view size.
    pub fn render(
        &self,
        target: &mut Pixmap,
        view: &ViewTransform,
        elements: &[Element],
        draft: Option<&Draft>,
    ) {
        let [r, g, b, a] = self.background_color.to_srgba_unmultiplied();
        target.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

        let transform = view.to_tiny_skia();
        self.draw_background(target, transform);

        for element in elements {
            self.draw_shape(target, element.style(), element.shape(), transform);
        }
        if let Some(draft) = draft {
            if let Some(shape) = draft.shape() {
                self.draw_shape(target, draft.style(), shape, transform);
            }
        }
    }

    /// Render into a fresh offscreen buffer of the given view size.
    pub fn render_to_buffer(
        &self,
        width: u32,
        height: u32,
        view: &ViewTransform,
        elements: &[Element],
        draft: Option<&Draft>,
    ) -> CanvasResult<Pixmap> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(CanvasError::InvalidSurfaceSize { width, height })?;
        self.render(&mut pixmap, view, elements, draft);
        Ok(pixmap)
    }

    // The background image is stretched over the view rectangle in canvas
    // space, so it pans and zooms with the drawing.
    fn draw_background(&self, target: &mut Pixmap, transform: Transform) {
        let Some(background) = &self.background else {
            return;
        };
        let width = target.width() as f32;
        let height = target.height() as f32;
        let Some(rect) = tiny_skia::Rect::from_xywh(0.0, 0.0, width, height) else {
            return;
        };

        let stretch = Transform::from_scale(
            width / background.width() as f32,
            height / background.height() as f32,
        );
        let paint = Paint {
            shader: Pattern::new(
                background.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Bilinear,
                1.0,
                stretch,
            ),
            anti_alias: true,
            ..Default::default()
        };
        target.fill_rect(rect, &paint, transform, None);
    }

    fn draw_shape(&self, target: &mut Pixmap, style: &ElementStyle, shape: &Shape, transform: Transform) {
        let mut paint = Paint::default();
        paint.anti_alias = style.anti_alias;
        if style.erase {
            paint.blend_mode = BlendMode::Clear;
        } else {
            let [r, g, b, a] = style.color.to_srgba_unmultiplied();
            paint.set_color_rgba8(r, g, b, a);
        }

        let stroke = Stroke {
            width: style.stroke_width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };

        let path = match shape {
            Shape::Freehand(path) => path.to_tiny_skia(),
            Shape::Rectangle(rect) => skia_rect(rect).map(PathBuilder::from_rect),
            Shape::Ellipse(rect) => skia_rect(rect).and_then(PathBuilder::from_oval),
            Shape::Triangle([a, b, c]) => {
                let mut builder = PathBuilder::new();
                builder.move_to(a.x, a.y);
                builder.line_to(b.x, b.y);
                builder.line_to(c.x, c.y);
                builder.close();
                builder.finish()
            }
            // Glyph outlines take the same stroke as any other shape.
            Shape::Text(text) => self
                .font
                .as_ref()
                .and_then(|font| font.text_path(&text.text, text.anchor, text.font_size)),
        };

        let Some(path) = path else {
            return;
        };
        if style.fill {
            target.fill_path(&path, &paint, FillRule::Winding, transform, None);
        }
        target.stroke_path(&path, &paint, &stroke, transform, None);
    }
}

fn skia_rect(rect: &Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_ltrb(rect.min.x, rect.min.y, rect.max.x, rect.max.y)
}

/// Straight-alpha RGBA copy of a rendered pixmap.
pub fn to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        let color = pixmap
            .pixel(x, y)
            .map(|pixel| pixel.demultiply())
            .unwrap_or(ColorU8::from_rgba(0, 0, 0, 0));
        image::Rgba([color.red(), color.green(), color.blue(), color.alpha()])
    })
}
