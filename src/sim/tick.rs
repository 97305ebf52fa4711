//! Per-frame simulation step
//!
//! Order within a frame: integrate the player, move platforms and gather
//! every contact, then resolve the gathered contacts once. Resolution never
//! sees a partially filled buffer.

use super::collider::GeometryError;
use super::player::{ControlInput, Resolution};
use super::state::{GameEvent, GamePhase, GameState};
use crate::stats::DeathType;

/// Input sampled once per frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// -1 left, 0 none, +1 right
    pub horizontal: i8,
    /// Jump control is held down
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a new run once the current one has ended
    pub restart: bool,
}

/// Advance the session by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Result<(), GeometryError> {
    let dt = dt.max(0.0);
    state.events.clear();

    if input.pause {
        state.toggle_pause();
    }

    match state.phase {
        GamePhase::Ended => {
            if input.restart {
                state.restart();
            }
            return Ok(());
        }
        GamePhase::Paused => return Ok(()),
        GamePhase::Running => {}
    }

    state.time_ticks += 1;

    if state.camera.is_below_death_plane(state.player.pos()) {
        state.game_over(DeathType::Fall);
        return Ok(());
    }

    let control = ControlInput {
        horizontal: input.horizontal,
        jump_held: input.jump,
    };
    state.player.update(control, dt);
    if state.player.controller.jumped() {
        state.events.push(GameEvent::Jumped);
    }

    state.platforms.update(&state.camera, &mut state.player, dt)?;

    if state.player.collision_response() == Resolution::Squished {
        state.game_over(DeathType::Squish);
    }

    state.camera.update(state.player.pos(), dt);
    state.stats.update_score(state.player.collider().bounds().bottom());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::collider::Collider;
    use crate::sim::platforms::{Platform, PlatformKind};
    use crate::stats::Statistics;
    use glam::Vec2;

    fn new_state(seed: u64) -> GameState {
        GameState::new(seed, Settings::default(), Statistics::new())
    }

    fn run(state: &mut GameState, input: &TickInput, ticks: usize) {
        for _ in 0..ticks {
            tick(state, input, SIM_DT).unwrap();
        }
    }

    #[test]
    fn test_player_lands_on_start_platform() {
        let mut state = new_state(1);
        run(&mut state, &TickInput::default(), 120);

        assert_eq!(state.phase, GamePhase::Running);
        let pos = state.player.pos();
        // Start platform top at 850 - 100; player rests one skin width in
        let rest_y = VIEW_HEIGHT - 150.0 - 100.0 - PLAYER_RADIUS + SKIN_WIDTH;
        assert!((pos.y - rest_y).abs() < 0.5, "player at {:?}", pos);
        assert!((pos.x - PLAYER_SPAWN_X).abs() < 1e-3);
        assert!(state.player.controller.is_grounded());
        assert!((state.player.agent.frame.up - WORLD_UP).length() < 1e-5);
        assert!(state.player.controller.contact_point.is_some());
    }

    #[test]
    fn test_walk_and_jump_events() {
        let mut state = new_state(1);
        run(&mut state, &TickInput::default(), 120);

        let walk = TickInput {
            horizontal: 1,
            ..Default::default()
        };
        run(&mut state, &walk, 10);
        assert!(state.player.controller.vel.x > 0.0);

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, SIM_DT).unwrap();
        assert_eq!(state.events, vec![GameEvent::Jumped]);
        assert!(state.player.controller.vel.y < 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state(99999);
        let mut state2 = new_state(99999);

        let inputs = [
            TickInput::default(),
            TickInput {
                horizontal: -1,
                ..Default::default()
            },
            TickInput {
                horizontal: 1,
                jump: true,
                ..Default::default()
            },
        ];

        for i in 0..400 {
            let input = &inputs[(i / 40) % inputs.len()];
            tick(&mut state1, input, SIM_DT).unwrap();
            tick(&mut state2, input, SIM_DT).unwrap();
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player.pos(), state2.player.pos());
        assert_eq!(
            state1.platforms.platforms().len(),
            state2.platforms.platforms().len()
        );
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = new_state(3);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause, SIM_DT).unwrap();
        assert_eq!(state.phase, GamePhase::Paused);
        let pos = state.player.pos();

        run(&mut state, &TickInput::default(), 30);
        assert_eq!(state.player.pos(), pos);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &pause, SIM_DT).unwrap();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_fall_ends_run_and_restart() {
        let mut state = new_state(3);
        state.platforms.clear();

        let mut died = None;
        for _ in 0..300 {
            tick(&mut state, &TickInput::default(), SIM_DT).unwrap();
            if let Some(event) = state.events.first() {
                died = Some(*event);
                break;
            }
        }

        assert_eq!(state.phase, GamePhase::Ended);
        assert!(matches!(
            died,
            Some(GameEvent::Died {
                cause: DeathType::Fall,
                ..
            })
        ));
        assert_eq!(state.stats.fall_count, 1);

        // Input other than restart leaves the run ended
        tick(&mut state, &TickInput::default(), SIM_DT).unwrap();
        assert_eq!(state.phase, GamePhase::Ended);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT).unwrap();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.stats.fall_count, 1);
        assert_eq!(state.player.pos(), Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y));
    }

    #[test]
    fn test_squish_ends_run() {
        let mut state = new_state(3);
        state.platforms.clear();
        let spawn = state.player.pos();
        let gap = PLAYER_RADIUS + 50.0 - 15.0;
        for dir in [1.0, -1.0] {
            state.platforms.push(Platform::fixed(
                Collider::circle(spawn + Vec2::new(0.0, gap * dir), 50.0),
                PlatformKind::Static,
            ));
        }

        tick(&mut state, &TickInput::default(), SIM_DT).unwrap();

        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.stats.squish_count, 1);
        assert!(matches!(
            state.events.as_slice(),
            [GameEvent::Died {
                cause: DeathType::Squish,
                ..
            }]
        ));
        // No positional correction on squish, only the step's integration
        assert_eq!(state.player.pos().x, spawn.x);
        assert!(state.player.pos().y - spawn.y < 1.0);
    }

    #[test]
    fn test_squish_frame_still_follows_player() {
        let mut state = new_state(3);
        tick(&mut state, &TickInput::default(), SIM_DT).unwrap();
        state.platforms.clear();
        state.player.agent.translate(Vec2::new(0.0, -1000.0));
        let pos = state.player.pos();
        let gap = PLAYER_RADIUS + 50.0 - 15.0;
        for dir in [1.0, -1.0] {
            state.platforms.push(Platform::fixed(
                Collider::circle(pos + Vec2::new(0.0, gap * dir), 50.0),
                PlatformKind::Static,
            ));
        }

        tick(&mut state, &TickInput::default(), SIM_DT).unwrap();

        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.stats.squish_count, 1);
        assert!(state.camera.top() < 0.0);
        assert!(state.stats.score > 0);
    }

    #[test]
    fn test_score_measured_from_player_bounds_bottom() {
        let mut state = new_state(3);
        tick(&mut state, &TickInput::default(), SIM_DT).unwrap();
        state.platforms.clear();
        assert_eq!(state.stats.score, 0);

        // Centre near y = 381 would score 2, bounds bottom near 414 scores 1
        state.player.agent.translate(Vec2::new(0.0, -220.0));
        tick(&mut state, &TickInput::default(), SIM_DT).unwrap();

        let bottom = state.player.collider().bounds().bottom();
        assert!((bottom - state.player.pos().y - PLAYER_RADIUS - BOUNDS_MARGIN).abs() < 1e-3);
        assert_eq!(state.stats.score, 1);
    }

    #[test]
    fn test_negative_dt_is_clamped() {
        let mut state = new_state(3);
        let pos = state.player.pos();
        tick(&mut state, &TickInput::default(), -1.0).unwrap();
        assert_eq!(state.player.pos(), pos);
    }
}
