//! Vertical-follow view window
//!
//! The view only ever scrolls up, easing toward the player when they climb
//! above the follow boundary. Falling far enough below the view ends the run.

use glam::Vec2;

use crate::settings::CameraTuning;

#[derive(Debug, Clone)]
pub struct Camera {
    /// World y of the view's top edge
    top: f32,
    width: f32,
    height: f32,
    tuning: CameraTuning,
}

impl Camera {
    pub fn new(width: f32, height: f32, tuning: CameraTuning) -> Self {
        Self {
            top: 0.0,
            width,
            height,
            tuning,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        0.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.top
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn horizontal_center(&self) -> f32 {
        self.width / 2.0
    }

    /// World position to view position
    #[inline]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x, world.y - self.top)
    }

    pub fn update(&mut self, target: Vec2, dt: f32) {
        let screen_y = self.to_screen(target).y;
        if screen_y > self.tuning.follow_boundary {
            return;
        }

        let d = self.tuning.follow_boundary - screen_y;
        self.top -= d * (self.tuning.lerp_speed * dt).min(1.0);
    }

    /// Target has dropped past the death plane under the view
    pub fn is_below_death_plane(&self, target: Vec2) -> bool {
        self.to_screen(target).y > self.height + self.tuning.death_plane
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(1200.0, 1000.0, CameraTuning::default())
    }

    #[test]
    fn test_no_follow_below_boundary() {
        let mut cam = camera();
        cam.update(Vec2::new(600.0, 600.0), 1.0 / 60.0);
        assert_eq!(cam.top(), 0.0);
    }

    #[test]
    fn test_eases_up_toward_player() {
        let mut cam = camera();
        cam.update(Vec2::new(600.0, 200.0), 0.05);
        // Half of the 100px excess
        assert!((cam.top() + 50.0).abs() < 1e-4);
        assert!((cam.bottom() - 950.0).abs() < 1e-4);

        // Large steps snap instead of overshooting
        cam.update(Vec2::new(600.0, 200.0), 1.0);
        assert!((cam.top() + 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_death_plane() {
        let mut cam = camera();
        assert!(!cam.is_below_death_plane(Vec2::new(0.0, 1200.0)));
        assert!(cam.is_below_death_plane(Vec2::new(0.0, 1200.5)));

        cam.update(Vec2::new(0.0, -700.0), 1.0);
        assert!(cam.is_below_death_plane(Vec2::new(0.0, 1000.0)));
    }
}
