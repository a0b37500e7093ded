use ab_glyph::{Font, FontArc, GlyphId, OutlineCurve, Point};
use egui::Pos2;

/// Turns strings into glyph outlines using egui's default proportional font.
#[derive(Clone)]
pub struct GlyphFont {
    font: FontArc,
}

impl std::fmt::Debug for GlyphFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphFont")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl GlyphFont {
    /// Load the first proportional font egui ships with.
    pub fn default_font() -> Option<Self> {
        let definitions = egui::FontDefinitions::default();
        let family = definitions.families.get(&egui::FontFamily::Proportional)?;
        let name = family.first()?;
        let data = egui::FontData::clone(definitions.font_data.get(name)?);

        let font = match data.font {
            std::borrow::Cow::Borrowed(bytes) => {
                ab_glyph::FontRef::try_from_slice_and_index(bytes, data.index)
                    .map(FontArc::from)
                    .ok()
            }
            std::borrow::Cow::Owned(bytes) => {
                ab_glyph::FontVec::try_from_vec_and_index(bytes, data.index)
                    .map(FontArc::from)
                    .ok()
            }
        }?;
        Some(Self { font })
    }

    /// Outline of `text` laid out on one line with its baseline-left corner at
    /// `anchor`, with an em size of `size` canvas units.
    pub fn text_path(&self, text: &str, anchor: Pos2, size: f32) -> Option<tiny_skia::Path> {
        let units_per_em = self.font.units_per_em().unwrap_or(1000.0);
        let scale = size / units_per_em;

        let mut builder = tiny_skia::PathBuilder::new();
        let mut caret = 0.0;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let id = self.font.glyph_id(ch);
            if let Some(prev) = previous {
                caret += self.font.kern_unscaled(prev, id) * scale;
            }

            if let Some(outline) = self.font.outline(id) {
                // Font units are y-up; canvas space is y-down.
                let origin = anchor.x + caret;
                let map = |p: &Point| (origin + p.x * scale, anchor.y - p.y * scale);
                let mut pen: Option<Point> = None;

                for curve in &outline.curves {
                    let (start, end) = match curve {
                        OutlineCurve::Line(a, b)
                        | OutlineCurve::Quad(a, _, b)
                        | OutlineCurve::Cubic(a, _, _, b) => (*a, *b),
                    };
                    if pen != Some(start) {
                        if pen.is_some() {
                            builder.close();
                        }
                        let (x, y) = map(&start);
                        builder.move_to(x, y);
                    }
                    match curve {
                        OutlineCurve::Line(_, b) => {
                            let (x, y) = map(b);
                            builder.line_to(x, y);
                        }
                        OutlineCurve::Quad(_, c, b) => {
                            let (cx, cy) = map(c);
                            let (x, y) = map(b);
                            builder.quad_to(cx, cy, x, y);
                        }
                        OutlineCurve::Cubic(_, c1, c2, b) => {
                            let (c1x, c1y) = map(c1);
                            let (c2x, c2y) = map(c2);
                            let (x, y) = map(b);
                            builder.cubic_to(c1x, c1y, c2x, c2y, x, y);
                        }
                    }
                    pen = Some(end);
                }
                if pen.is_some() {
                    builder.close();
                }
            }

            caret += self.font.h_advance_unscaled(id) * scale;
            previous = Some(id);
        }

        builder.finish()
    }
}
