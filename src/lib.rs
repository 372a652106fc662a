//! Alleycat - headless simulation core for a top-down escape game.
//!
//! A player-controlled cat (or, after switching, a dog) crosses a large
//! night-time world dotted with safe streetlights, patrolling wild dogs and
//! a single exit. The crate owns movement, AI and collision only; rendering
//! and input capture are external collaborators that read [`snapshot`] views
//! and feed [`input::InputState`] into [`session::Session::tick`].
//!
//! Core modules:
//! - `session`: owns the world, advances one tick, decides win/lose
//! - `ecs`: components and per-tick systems (mover, lamp collision, dog AI)
//! - `lights` / `exit` / `level`: the static furniture of a session
//! - `snapshot`: read-only scene views for the renderer
//! - `app`: session lifecycle plus the fixed-rate demo driver

pub mod app;
pub mod camera;
pub mod debug;
pub mod ecs;
pub mod exit;
pub mod input;
pub mod level;
pub mod lights;
pub mod session;
pub mod snapshot;
pub mod util;

pub use session::{ControlMode, Phase, Session};

/// World-level constants shared across modules.
pub mod consts {
    /// Square world extent in world units; positions live in `[0, extent]²`.
    pub const WORLD_EXTENT: f32 = 3000.0;
    /// Fixed simulation rate. One tick is 1/60 s; all speeds are per-tick.
    pub const TICKS_PER_SECOND: u32 = 60;
}
