//! Run statistics
//!
//! The persisted record is plain counters; the caller decides where the JSON
//! goes.

use serde::{Deserialize, Serialize};

use crate::consts::{SCORE_STEP, VIEW_HEIGHT};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathType {
    /// Dropped below the view
    Fall,
    /// Crushed between surfaces
    Squish,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    /// Best height reached in the current run
    #[serde(skip)]
    pub score: u64,
    pub highscore: u64,
    pub fall_count: u32,
    pub squish_count: u32,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the run score to the height of world y `y`, if higher
    pub fn update_score(&mut self, y: f32) {
        let height = ((VIEW_HEIGHT / 2.0 - y) / SCORE_STEP).floor();
        if height > self.score as f32 {
            self.score = height as u64;
        }
    }

    pub fn is_highscore(&self) -> bool {
        self.score > self.highscore
    }

    /// Count a death and promote a new highscore. Returns whether the run set
    /// one.
    pub fn record_death(&mut self, cause: DeathType) -> bool {
        match cause {
            DeathType::Fall => self.fall_count += 1,
            DeathType::Squish => self.squish_count += 1,
        }

        let new_highscore = self.is_highscore();
        if new_highscore {
            self.highscore = self.score;
        }
        new_highscore
    }

    pub fn reset_run(&mut self) {
        self.score = 0;
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let stats: Self = serde_json::from_str(json)?;
        log::info!(
            "Loaded statistics (highscore {}, {} falls, {} squishes)",
            stats.highscore,
            stats.fall_count,
            stats.squish_count
        );
        Ok(stats)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
