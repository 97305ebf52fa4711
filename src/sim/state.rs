//! Game session state
//!
//! One `GameState` owns the single player, the platform manager, the view and
//! the statistics record. Nothing in the simulation reaches for globals.

use glam::Vec2;

use super::camera::Camera;
use super::platforms::PlatformManager;
use super::player::Player;
use crate::consts::*;
use crate::settings::Settings;
use crate::stats::{DeathType, Statistics};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Paused,
    /// Run over, waiting for a restart
    Ended,
}

/// Things that happened during a tick, for audio/UI layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    Died { cause: DeathType, new_highscore: bool },
}

#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current run's platform generation
    pub seed: u64,
    pub settings: Settings,
    pub phase: GamePhase,
    pub player: Player,
    pub platforms: PlatformManager,
    pub camera: Camera,
    pub stats: Statistics,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(seed: u64, settings: Settings, stats: Statistics) -> Self {
        let camera = Camera::new(VIEW_WIDTH, VIEW_HEIGHT, settings.camera.clone());
        let player = Player::new(
            Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            PLAYER_RADIUS,
            settings.player.clone(),
        );
        let mut platforms = PlatformManager::new(settings.generation.clone(), seed);
        platforms.begin(&camera);

        log::info!("New run with seed {}", seed);

        Self {
            seed,
            settings,
            phase: GamePhase::Running,
            player,
            platforms,
            camera,
            stats,
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Start a fresh run, keeping the statistics record
    pub fn restart(&mut self) {
        let mut stats = std::mem::take(&mut self.stats);
        stats.reset_run();
        *self = Self::new(
            self.seed.wrapping_add(1),
            std::mem::take(&mut self.settings),
            stats,
        );
    }

    /// Toggle between running and paused; an ended run stays ended
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::Ended => GamePhase::Ended,
        };
    }

    /// End the run. Only the first terminal event of a run is recorded.
    pub fn game_over(&mut self, cause: DeathType) {
        if self.phase == GamePhase::Ended {
            return;
        }

        let new_highscore = self.stats.record_death(cause);
        self.phase = GamePhase::Ended;
        self.events.push(GameEvent::Died {
            cause,
            new_highscore,
        });
        log::info!(
            "Game over ({:?}), score {}, highscore {}",
            cause,
            self.stats.score,
            self.stats.highscore
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(5, Settings::default(), Statistics::new());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.pos(), Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y));
        assert_eq!(state.platforms.platforms().len(), 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_toggle_pause() {
        let mut state = GameState::new(5, Settings::default(), Statistics::new());
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Running);

        state.game_over(DeathType::Fall);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Ended);
    }

    #[test]
    fn test_game_over_recorded_once() {
        let mut state = GameState::new(5, Settings::default(), Statistics::new());
        state.stats.score = 3;
        state.game_over(DeathType::Squish);
        state.game_over(DeathType::Fall);

        assert_eq!(state.stats.squish_count, 1);
        assert_eq!(state.stats.fall_count, 0);
        assert_eq!(
            state.events,
            vec![GameEvent::Died {
                cause: DeathType::Squish,
                new_highscore: true
            }]
        );
    }

    #[test]
    fn test_restart_keeps_stats() {
        let mut state = GameState::new(5, Settings::default(), Statistics::new());
        state.stats.score = 8;
        state.game_over(DeathType::Fall);
        state.player.agent.translate(Vec2::new(0.0, 5000.0));

        state.restart();
        assert_eq!(state.seed, 6);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.stats.score, 0);
        assert_eq!(state.stats.highscore, 8);
        assert_eq!(state.stats.fall_count, 1);
        assert_eq!(state.player.pos(), Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y));
    }
}
