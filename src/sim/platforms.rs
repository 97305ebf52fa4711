//! Platforms and their procedural generation
//!
//! Platforms are kinematic: static, or moving with a constant velocity. The
//! manager spawns static platforms as the view climbs, spawns moving ones on
//! a timer, evicts anything that left the play area, and tests every live
//! platform against the player each frame.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::distr::uniform::SampleUniform;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::camera::Camera;
use super::collider::{Collider, GeometryError};
use super::collision::detect;
use super::player::Player;
use crate::settings::GenerationTuning;

/// Radius of the platform the player starts on
pub const START_PLATFORM_RADIUS: f32 = 100.0;
/// Height of the start platform's centre above the view bottom
pub const START_PLATFORM_LIFT: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Start,
    Static,
    Moving,
}

#[derive(Debug, Clone)]
pub struct Platform {
    pub collider: Collider,
    pub vel: Vec2,
    pub is_static: bool,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn fixed(collider: Collider, kind: PlatformKind) -> Self {
        Self {
            collider,
            vel: Vec2::ZERO,
            is_static: true,
            kind,
        }
    }

    pub fn moving(collider: Collider, vel: Vec2) -> Self {
        let mut platform = Self::fixed(collider, PlatformKind::Moving);
        platform.set_velocity(vel);
        platform
    }

    pub fn set_velocity(&mut self, vel: Vec2) {
        self.vel = vel;
        self.is_static = vel == Vec2::ZERO;
    }

    /// Move by one step of the platform's velocity
    pub fn advance(&mut self, dt: f32) {
        self.collider.translate(self.vel * dt);
    }

    /// Displacement handed to a player standing on this platform
    pub fn step_offset(&self, dt: f32) -> Vec2 {
        if self.is_static {
            Vec2::ZERO
        } else {
            self.vel * dt
        }
    }
}

/// Vertices of a regular polygon around the origin
pub fn regular_polygon(sides: usize, radius: f32, offset_angle: f32) -> Vec<Vec2> {
    (0..sides)
        .map(|i| {
            let angle = TAU / sides as f32 * i as f32 + offset_angle;
            Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Uniform pick in `lo..=hi`, or `lo` when the range is empty
fn pick<T: SampleUniform + PartialOrd + Copy>(rng: &mut Pcg32, lo: T, hi: T) -> T {
    if lo < hi { rng.random_range(lo..=hi) } else { lo }
}

/// Owns every live platform
#[derive(Debug, Clone)]
pub struct PlatformManager {
    platforms: Vec<Platform>,
    tuning: GenerationTuning,
    static_gap: f32,
    /// World y the next static platform's bounds bottom sits on
    next_static_bottom: f32,
    spawn_timer: f32,
    rng: Pcg32,
}

impl PlatformManager {
    pub fn new(tuning: GenerationTuning, seed: u64) -> Self {
        Self {
            platforms: Vec::new(),
            static_gap: tuning.static_gap,
            tuning,
            next_static_bottom: 0.0,
            spawn_timer: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Place the start platform and prime static generation above it
    pub fn begin(&mut self, camera: &Camera) {
        let start = Collider::circle(
            Vec2::new(
                camera.horizontal_center(),
                camera.bottom() - START_PLATFORM_LIFT,
            ),
            START_PLATFORM_RADIUS,
        );
        self.next_static_bottom = start.bounds().top() - self.static_gap;
        self.platforms.push(Platform::fixed(start, PlatformKind::Start));
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn push(&mut self, platform: Platform) {
        self.platforms.push(platform);
    }

    pub fn clear(&mut self) {
        self.platforms.clear();
    }

    /// Generate, evict, then move and test every platform against the player
    pub fn update(
        &mut self,
        camera: &Camera,
        player: &mut Player,
        dt: f32,
    ) -> Result<(), GeometryError> {
        self.generate(camera, dt)?;
        self.unload(camera);
        self.update_platforms(player, dt);
        Ok(())
    }

    fn generate(&mut self, camera: &Camera, dt: f32) -> Result<(), GeometryError> {
        while camera.top() < self.next_static_bottom {
            self.create_static(camera)?;
            self.static_gap += self.tuning.static_gap_growth;
        }

        self.spawn_timer += dt;
        if self.spawn_timer > self.tuning.spawn_delay {
            self.spawn_timer = 0.0;
            self.create_moving(camera)?;
        }
        Ok(())
    }

    fn random_size(&mut self) -> f32 {
        pick(&mut self.rng, self.tuning.min_size, self.tuning.max_size).max(1) as f32
    }

    fn roll_circle(&mut self) -> bool {
        self.rng
            .random_bool(self.tuning.circle_chance.clamp(0.0, 1.0))
    }

    /// Random circle or regular polygon centred on the origin
    fn random_shape(&mut self) -> Result<Collider, GeometryError> {
        let size = self.random_size();
        if self.roll_circle() {
            return Ok(Collider::circle(Vec2::ZERO, size));
        }

        let sides = pick(
            &mut self.rng,
            self.tuning.min_vertices.max(3),
            self.tuning.max_vertices,
        );
        let offset_angle = self.rng.random::<f32>() * FRAC_PI_2;
        Collider::polygon(Vec2::ZERO, regular_polygon(sides, size, offset_angle))
    }

    fn create_static(&mut self, camera: &Camera) -> Result<(), GeometryError> {
        let mut collider = self.random_shape()?;
        let bounds = *collider.bounds();
        let x = pick(
            &mut self.rng,
            camera.left() - bounds.left(),
            camera.right() - bounds.right(),
        );
        collider.set_position(Vec2::new(x, self.next_static_bottom - bounds.bottom()));

        self.next_static_bottom = collider.bounds().top() - self.static_gap;
        log::debug!("spawned static platform at {:?}", collider.pos());
        self.platforms
            .push(Platform::fixed(collider, PlatformKind::Static));
        Ok(())
    }

    fn create_moving(&mut self, camera: &Camera) -> Result<(), GeometryError> {
        let from_left = self.rng.random_bool(0.5);
        let speed = pick(&mut self.rng, self.tuning.min_speed, self.tuning.max_speed) as f32;
        let vel = Vec2::new(if from_left { speed } else { -speed }, 0.0);

        let mut collider = self.random_shape()?;
        let bounds = *collider.bounds();
        // Fully off screen on the side it enters from
        let x = if from_left {
            camera.left() - bounds.right()
        } else {
            camera.right() - bounds.left()
        };
        let y = pick(
            &mut self.rng,
            camera.top() - bounds.top(),
            camera.bottom() - bounds.bottom(),
        );
        collider.set_position(Vec2::new(x, y));

        log::debug!("spawned moving platform at {:?}, vel {:?}", collider.pos(), vel);
        self.platforms.push(Platform::moving(collider, vel));
        Ok(())
    }

    fn unload(&mut self, camera: &Camera) {
        let before = self.platforms.len();
        self.platforms.retain(|p| !out_of_play(p, camera));
        let evicted = before - self.platforms.len();
        if evicted > 0 {
            log::debug!("evicted {} platform(s)", evicted);
        }
    }

    fn update_platforms(&mut self, player: &mut Player, dt: f32) {
        for platform in &mut self.platforms {
            if !platform.is_static {
                platform.advance(dt);
            }

            if let Some(info) = detect(player.collider(), &platform.collider) {
                player.add_to_buffer(info.with_inherited_offset(platform.step_offset(dt)));
            }
        }
    }
}

/// Below the view, or a moving platform past the far side
fn out_of_play(platform: &Platform, camera: &Camera) -> bool {
    let bounds = platform.collider.bounds();
    if bounds.top() > camera.bottom() {
        return true;
    }
    if platform.is_static {
        return false;
    }
    (platform.vel.x > 0.0 && bounds.left() > camera.right())
        || (platform.vel.x < 0.0 && bounds.right() < camera.left())
}
