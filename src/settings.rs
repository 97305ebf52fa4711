//! Gameplay tuning
//!
//! Every field has a default, so a partial JSON document only overrides
//! what it names.

use serde::{Deserialize, Serialize};

/// Player movement tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Maximum tangential speed along the surface (px/s)
    pub max_speed: f32,
    /// Seconds of held input to reach max speed from rest
    pub accel_time: f32,
    /// Fraction of tangential speed lost per grounded step
    pub friction: f32,
    /// Tangential speeds below this snap to zero (px/s)
    pub snap_speed: f32,
    /// Apex height of a full-strength jump (px)
    pub max_jump_height: f32,
    /// Duration of a full-strength jump, takeoff to landing (s)
    pub max_jump_time: f32,
    /// Maximum downward speed (px/s)
    pub terminal_velocity: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_speed: 300.0,
            accel_time: 0.15,
            friction: 0.1,
            snap_speed: 5.0,
            max_jump_height: 300.0,
            max_jump_time: 1.2,
            terminal_velocity: 1500.0,
        }
    }
}

impl PlayerTuning {
    #[inline]
    pub fn acceleration(&self) -> f32 {
        self.max_speed / self.accel_time
    }

    fn time_to_apex(&self) -> f32 {
        self.max_jump_time / 2.0
    }

    /// Downward acceleration giving the configured jump arc
    pub fn gravity(&self) -> f32 {
        2.0 * self.max_jump_height / self.time_to_apex().powi(2)
    }

    /// Initial jump speed giving the configured jump arc
    pub fn jump_force(&self) -> f32 {
        2.0 * self.max_jump_height / self.time_to_apex()
    }
}

/// Procedural platform generation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationTuning {
    /// Initial vertical gap between static platforms (px)
    pub static_gap: f32,
    /// Gap growth after each static platform (px)
    pub static_gap_growth: f32,
    /// Seconds between moving platform spawns
    pub spawn_delay: f32,
    pub min_size: u32,
    pub max_size: u32,
    pub min_vertices: usize,
    pub max_vertices: usize,
    /// Horizontal speed range of moving platforms (px/s)
    pub min_speed: u32,
    pub max_speed: u32,
    /// Probability a new platform is a circle rather than a polygon
    pub circle_chance: f64,
}

impl Default for GenerationTuning {
    fn default() -> Self {
        Self {
            static_gap: 200.0,
            static_gap_growth: 100.0,
            spawn_delay: 2.5,
            min_size: 25,
            max_size: 150,
            min_vertices: 3,
            max_vertices: 8,
            min_speed: 50,
            max_speed: 200,
            circle_chance: 0.5,
        }
    }
}

/// View-follow tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Screen y above which the view starts following the player
    pub follow_boundary: f32,
    /// Distance below the view bottom at which the player has fallen
    pub death_plane: f32,
    /// Follow easing rate (1/s)
    pub lerp_speed: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            follow_boundary: 300.0,
            death_plane: 200.0,
            lerp_speed: 10.0,
        }
    }
}

/// All tunables for a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerTuning,
    pub generation: GenerationTuning,
    pub camera: CameraTuning,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        log::info!("Loaded settings");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
