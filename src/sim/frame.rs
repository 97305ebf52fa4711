//! Surface-relative basis for the player
//!
//! `up` is the jump axis and `right` the move axis. Both are re-derived from
//! the normal of the surface the player last landed on.

use glam::Vec2;

use super::geometry::perpendicular;
use crate::consts::WORLD_UP;

/// Orthonormal (right, up) basis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceFrame {
    pub right: Vec2,
    pub up: Vec2,
}

impl Default for SurfaceFrame {
    fn default() -> Self {
        Self {
            right: Vec2::X,
            up: WORLD_UP,
        }
    }
}

impl SurfaceFrame {
    /// Basis for standing on a surface with the given unit normal
    pub fn from_normal(normal: Vec2) -> Self {
        Self {
            right: perpendicular(normal),
            up: normal,
        }
    }

    /// World-space direction to (right, up) components
    #[inline]
    pub fn world_to_obj(&self, v: Vec2) -> Vec2 {
        Vec2::new(self.right.dot(v), self.up.dot(v))
    }

    /// (right, up) components back to a world-space direction
    #[inline]
    pub fn obj_to_world(&self, v: Vec2) -> Vec2 {
        self.right * v.x + self.up * v.y
    }
}
