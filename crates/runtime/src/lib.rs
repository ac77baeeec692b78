//! Frame-driven engine runtime.
//!
//! Wires the catalog, ranking pass, and camera together behind a single
//! update boundary: sensor callbacks push location/attitude values in, the
//! host calls [`Engine::render_frame`] once per display tick and gets back
//! whatever needs redrawing.

pub mod engine;
pub mod frame;
pub mod pump;

pub use engine::{Engine, FrameUpdate, ViewUpdate};
pub use frame::Frame;
pub use pump::ProjectionPump;
