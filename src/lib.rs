//! Skyclimb - a physics-based vertical platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (colliders, collision detection, player
//!   controller, platform generation, session state)
//! - `settings`: Data-driven gameplay tuning
//! - `stats`: Persisted run statistics
//! - `render`: Draw calls handed to an external renderer

pub mod render;
pub mod settings;
pub mod sim;
pub mod stats;

pub use settings::Settings;
pub use stats::{DeathType, Statistics};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep used by the native runner and tests
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// View dimensions (px)
    pub const VIEW_WIDTH: f32 = 1200.0;
    pub const VIEW_HEIGHT: f32 = 1000.0;

    /// World "up". Screen space, so y grows downward.
    pub const WORLD_UP: Vec2 = Vec2::new(0.0, -1.0);

    /// Depth the player is left inside a surface after resolution, keeping
    /// the contact alive for the next step
    pub const SKIN_WIDTH: f32 = 1.0;
    /// Margin added to every side of a collider's broad-phase box
    pub const BOUNDS_MARGIN: f32 = 3.0;
    /// Overlap beyond which simultaneous contacts crush the player
    pub const SQUISH_THRESHOLD: f32 = 10.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 30.0;
    pub const PLAYER_SPAWN_X: f32 = VIEW_WIDTH / 2.0;
    pub const PLAYER_SPAWN_Y: f32 = 600.0;

    /// Height (px) per score point
    pub const SCORE_STEP: f32 = 50.0;
}

