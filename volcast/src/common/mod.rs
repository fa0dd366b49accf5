mod bound_box;
mod ray;

pub use bound_box::{BoundBox, Intersection};
pub use ray::Ray;
