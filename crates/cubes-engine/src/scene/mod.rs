//! Render loop state.
//!
//! Everything the per-tick and resize handlers mutate lives in
//! [`RenderLoopState`], passed explicitly by the runtime.

mod config;
mod loop_state;

pub use config::SceneConfig;
pub use loop_state::{cube_rotations, LoopControl, LoopPhase, RenderLoopState};
