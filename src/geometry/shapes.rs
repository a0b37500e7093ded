use egui::{Pos2, Rect};

/// Axis-aligned box spanned by two drag points, with min <= max on both axes.
pub fn normalized_bounds(a: Pos2, b: Pos2) -> Rect {
    Rect::from_min_max(
        Pos2::new(a.x.min(b.x), a.y.min(b.y)),
        Pos2::new(a.x.max(b.x), a.y.max(b.y)),
    )
}

pub fn midpoint(a: Pos2, b: Pos2) -> Pos2 {
    Pos2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Triangle dragged from `start` to `cur`.
///
/// The base runs along `cur.y` from `start.x` to `cur.x`; the apex sits over
/// the base midpoint, one drag-height on the far side of `start.y`. Dragging
/// down therefore points the apex up, dragging up points it down, and a
/// horizontal drag collapses to a flat triangle.
pub fn isosceles_triangle(start: Pos2, cur: Pos2) -> [Pos2; 3] {
    let mid_x = (start.x + cur.x) / 2.0;
    let height = (cur.y - start.y).abs();
    let dir = if cur.y > start.y { 1.0 } else { -1.0 };

    [
        Pos2::new(start.x, cur.y),
        Pos2::new(cur.x, cur.y),
        Pos2::new(mid_x, start.y - dir * height),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_reversed_drag() {
        let rect = normalized_bounds(Pos2::new(50.0, 40.0), Pos2::new(10.0, 10.0));
        assert_eq!(rect.min, Pos2::new(10.0, 10.0));
        assert_eq!(rect.max, Pos2::new(50.0, 40.0));
    }

    #[test]
    fn test_bounds_are_ordered_for_every_drag_direction() {
        let coords = [-25.0, 0.0, 7.5, 40.0];
        for &x0 in &coords {
            for &y0 in &coords {
                for &x1 in &coords {
                    for &y1 in &coords {
                        let rect = normalized_bounds(Pos2::new(x0, y0), Pos2::new(x1, y1));
                        assert!(rect.min.x <= rect.max.x && rect.min.y <= rect.max.y);
                    }
                }
            }
        }
    }

    #[test]
    fn test_triangle_drag_down_points_up() {
        let [a, b, apex] = isosceles_triangle(Pos2::new(0.0, 0.0), Pos2::new(20.0, 10.0));
        assert_eq!(a, Pos2::new(0.0, 10.0));
        assert_eq!(b, Pos2::new(20.0, 10.0));
        assert_eq!(apex, Pos2::new(10.0, -10.0));
        assert!(apex.y < a.y);
    }

    #[test]
    fn test_triangle_drag_up_points_down() {
        let [a, _, apex] = isosceles_triangle(Pos2::new(0.0, 0.0), Pos2::new(20.0, -10.0));
        assert_eq!(apex, Pos2::new(10.0, 10.0));
        assert!(apex.y > a.y);
    }

    #[test]
    fn test_flat_triangle() {
        let [a, b, apex] = isosceles_triangle(Pos2::new(0.0, 5.0), Pos2::new(20.0, 5.0));
        assert_eq!(a.y, 5.0);
        assert_eq!(b.y, 5.0);
        assert_eq!(apex.y, 5.0);
    }
}
