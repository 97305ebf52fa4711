//! Deterministic simulation module
//!
//! All gameplay logic lives here. It must stay pure and deterministic:
//! - Time advances only through the `dt` handed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (platforms in spawn order, contacts in test order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collider;
pub mod collision;
pub mod frame;
pub mod geometry;
pub mod platforms;
pub mod player;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collider::{Circle, Collider, ConvexPolygon, GeometryError, Shape};
pub use collision::{CollisionInfo, circle_circle, circle_polygon, detect};
pub use frame::SurfaceFrame;
pub use geometry::Aabb;
pub use platforms::{Platform, PlatformKind, PlatformManager};
pub use player::{Agent, ControlInput, Player, PlayerController, Resolution};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
