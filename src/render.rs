//! Draw calls for an external renderer
//!
//! The simulation does not render. It describes what to draw in view space
//! (camera scroll applied) and leaves the drawing to the host.

use glam::Vec2;

use crate::sim::collider::Shape;
use crate::sim::platforms::PlatformKind;
use crate::sim::state::GameState;

pub type Color = [u8; 3];

pub const START_PLATFORM_COLOR: Color = [0, 200, 100];
pub const STATIC_PLATFORM_COLOR: Color = [200, 200, 50];
pub const MOVING_PLATFORM_COLOR: Color = [50, 200, 200];
pub const PLAYER_COLOR: Color = [255, 0, 0];
pub const CONTACT_COLOR: Color = [0, 255, 0];
pub const CONTACT_MARKER_RADIUS: f32 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Color,
    },
}

fn platform_color(kind: PlatformKind) -> Color {
    match kind {
        PlatformKind::Start => START_PLATFORM_COLOR,
        PlatformKind::Static => STATIC_PLATFORM_COLOR,
        PlatformKind::Moving => MOVING_PLATFORM_COLOR,
    }
}

/// Platforms first, then the player, then the last contact point
pub fn draw_commands(state: &GameState) -> Vec<DrawCommand> {
    let camera = &state.camera;
    let mut commands = Vec::with_capacity(state.platforms.platforms().len() + 2);

    for platform in state.platforms.platforms() {
        let color = platform_color(platform.kind);
        let collider = &platform.collider;
        commands.push(match collider.shape() {
            Shape::Circle(c) => DrawCommand::Circle {
                center: camera.to_screen(collider.pos()),
                radius: c.radius(),
                color,
            },
            Shape::Polygon(_) => DrawCommand::Polygon {
                points: collider
                    .world_vertices()
                    .into_iter()
                    .map(|v| camera.to_screen(v))
                    .collect(),
                color,
            },
        });
    }

    if let Some(circle) = state.player.collider().as_circle() {
        commands.push(DrawCommand::Circle {
            center: camera.to_screen(state.player.pos()),
            radius: circle.radius(),
            color: PLAYER_COLOR,
        });
    }

    if let Some(point) = state.player.controller.contact_point {
        commands.push(DrawCommand::Circle {
            center: camera.to_screen(point),
            radius: CONTACT_MARKER_RADIUS,
            color: CONTACT_COLOR,
        });
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use crate::sim::tick::{TickInput, tick};
    use crate::stats::Statistics;

    #[test]
    fn test_draw_commands_cover_scene() {
        let mut state = GameState::new(11, Settings::default(), Statistics::new());
        let platform_count = state.platforms.platforms().len();
        let commands = draw_commands(&state);
        assert_eq!(commands.len(), platform_count + 1);
        assert!(matches!(
            commands[0],
            DrawCommand::Circle {
                color: START_PLATFORM_COLOR,
                ..
            }
        ));

        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT).unwrap();
        }
        let commands = draw_commands(&state);
        assert_eq!(commands.len(), state.platforms.platforms().len() + 2);
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::Circle {
                color: CONTACT_COLOR,
                radius,
                ..
            }) if *radius == CONTACT_MARKER_RADIUS
        ));
    }

    #[test]
    fn test_polygons_drawn_in_view_space() {
        let mut state = GameState::new(11, Settings::default(), Statistics::new());
        state.platforms.clear();
        state.platforms.push(crate::sim::platforms::Platform::fixed(
            crate::sim::collider::Collider::polygon(
                Vec2::new(100.0, 100.0),
                vec![Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)],
            )
            .unwrap(),
            PlatformKind::Static,
        ));
        state.camera.update(Vec2::new(0.0, 200.0), 1.0);

        let commands = draw_commands(&state);
        let DrawCommand::Polygon { points, color } = &commands[0] else {
            panic!("expected polygon");
        };
        assert_eq!(*color, STATIC_PLATFORM_COLOR);
        assert_eq!(points[0], Vec2::new(100.0, 200.0));
    }
}
