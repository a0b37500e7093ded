mod shapes;
mod transform;

pub use shapes::{isosceles_triangle, midpoint, normalized_bounds};
pub use transform::ViewTransform;
