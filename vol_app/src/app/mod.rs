//! App state and frame output

pub mod defaults;
mod render_state;
mod state;
pub use render_state::RenderState;
pub use state::State;
