pub mod compositor;
mod image_plane;
pub mod lighting;
pub mod post_filter;
mod ray_caster;
mod render_front;
pub mod scheduler;

pub use compositor::composite;
pub use image_plane::ImagePlane;
pub use lighting::{normal_at, Lighting};
pub use post_filter::median_filter;
pub use ray_caster::RayCaster;
pub use render_front::{CastThread, RenderThread, RendererFront, RendererMessage};
pub use scheduler::{cast_all, row_ranges, CastStats};
