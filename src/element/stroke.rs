use egui::{Pos2, Rect};

use crate::geometry::midpoint;

/// One piece of a freehand path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    QuadTo { ctrl: Pos2, to: Pos2 },
    LineTo(Pos2),
}

impl PathSegment {
    pub fn end(&self) -> Pos2 {
        match self {
            PathSegment::QuadTo { to, .. } | PathSegment::LineTo(to) => *to,
        }
    }
}

/// Smoothed freehand path in canvas space. Segments are only ever appended.
#[derive(Debug, Clone, PartialEq)]
pub struct FreehandPath {
    start: Pos2,
    segments: Vec<PathSegment>,
}

impl FreehandPath {
    pub fn new(start: Pos2) -> Self {
        Self {
            start,
            segments: Vec::new(),
        }
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Extend towards `cur` with a quadratic whose control point is the last
    /// accepted point and whose end is the midpoint between the two.
    pub fn quad_smooth_to(&mut self, last: Pos2, cur: Pos2) {
        self.segments.push(PathSegment::QuadTo {
            ctrl: last,
            to: midpoint(last, cur),
        });
    }

    pub fn line_to(&mut self, to: Pos2) {
        self.segments.push(PathSegment::LineTo(to));
    }

    /// Bounding box of the start, control and end points.
    pub fn bounds(&self) -> Rect {
        let mut rect = Rect::from_min_max(self.start, self.start);
        for segment in &self.segments {
            if let PathSegment::QuadTo { ctrl, .. } = segment {
                rect.extend_with(*ctrl);
            }
            rect.extend_with(segment.end());
        }
        rect
    }

    pub fn to_tiny_skia(&self) -> Option<tiny_skia::Path> {
        let mut builder = tiny_skia::PathBuilder::new();
        builder.move_to(self.start.x, self.start.y);
        for segment in &self.segments {
            match segment {
                PathSegment::QuadTo { ctrl, to } => builder.quad_to(ctrl.x, ctrl.y, to.x, to.y),
                PathSegment::LineTo(to) => builder.line_to(to.x, to.y),
            }
        }
        // A lone tap still has to leave a dot behind.
        if self.segments.is_empty() {
            builder.line_to(self.start.x, self.start.y);
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_smoothing_uses_midpoint() {
        let mut path = FreehandPath::new(Pos2::new(0.0, 0.0));
        path.quad_smooth_to(Pos2::new(0.0, 0.0), Pos2::new(10.0, 4.0));
        assert_eq!(
            path.segments(),
            &[PathSegment::QuadTo {
                ctrl: Pos2::new(0.0, 0.0),
                to: Pos2::new(5.0, 2.0)
            }]
        );
    }

    #[test]
    fn test_bounds_cover_all_points() {
        let mut path = FreehandPath::new(Pos2::new(5.0, 5.0));
        path.quad_smooth_to(Pos2::new(5.0, 5.0), Pos2::new(-5.0, 15.0));
        path.line_to(Pos2::new(20.0, 0.0));
        let bounds = path.bounds();
        assert_eq!(bounds.min, Pos2::new(0.0, 0.0));
        assert_eq!(bounds.max, Pos2::new(20.0, 10.0));
    }

    #[test]
    fn test_single_tap_builds_a_path() {
        let path = FreehandPath::new(Pos2::new(3.0, 3.0));
        assert!(path.to_tiny_skia().is_some());
    }
}
