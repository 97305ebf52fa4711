//! Player body and controller
//!
//! The controller is a two-state machine (grounded / airborne). Grounded is
//! not latched: it is cleared at the end of every [`PlayerController::update`]
//! and only set again when [`PlayerController::collision_response`] resolves
//! a contact in the same frame.

use glam::Vec2;

use super::collider::Collider;
use super::collision::CollisionInfo;
use super::frame::SurfaceFrame;
use crate::consts::{SQUISH_THRESHOLD, WORLD_UP};
use crate::settings::PlayerTuning;

/// Per-frame control signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// -1 left, 0 none, +1 right
    pub horizontal: i8,
    pub jump_held: bool,
}

/// The player's physical body: a circle collider and its surface frame
#[derive(Debug, Clone)]
pub struct Agent {
    pub collider: Collider,
    pub frame: SurfaceFrame,
}

impl Agent {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            collider: Collider::circle(pos, radius),
            frame: SurfaceFrame::default(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.collider.pos()
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.collider.translate(offset);
    }
}

/// Outcome of resolving one frame's collision buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing was buffered
    NoContact,
    /// One contact was applied and the player is grounded
    Resolved,
    /// Stationary player pushed out of every overlap
    Separated,
    /// Deep overlap with several surfaces at once
    Squished,
}

/// Converts input and contacts into player velocity and position
#[derive(Debug, Clone)]
pub struct PlayerController {
    tuning: PlayerTuning,
    gravity: f32,
    jump_force: f32,
    accel: f32,

    grounded: bool,
    can_jump: bool,
    jumped: bool,

    /// World-space velocity
    pub vel: Vec2,
    /// Velocity in the surface frame (x along right, y along up)
    surface_vel: Vec2,

    /// Contact point of the last resolved collision
    pub contact_point: Option<Vec2>,
    buffer: Vec<CollisionInfo>,
}

impl PlayerController {
    pub fn new(tuning: PlayerTuning) -> Self {
        Self {
            gravity: tuning.gravity(),
            jump_force: tuning.jump_force(),
            accel: tuning.acceleration(),
            tuning,
            grounded: false,
            can_jump: false,
            jumped: false,
            vel: Vec2::ZERO,
            surface_vel: Vec2::ZERO,
            contact_point: None,
            buffer: Vec::new(),
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Whether the last update started a jump
    pub fn jumped(&self) -> bool {
        self.jumped
    }

    pub fn surface_velocity(&self) -> Vec2 {
        self.surface_vel
    }

    pub fn buffered(&self) -> &[CollisionInfo] {
        &self.buffer
    }

    /// Advance velocity for the current state and integrate position
    pub fn update(&mut self, agent: &mut Agent, input: ControlInput, dt: f32) {
        self.jumped = false;

        if self.grounded {
            self.grounded_update(&agent.frame, input, dt);
        } else {
            self.airborne_update(dt);
        }
        self.grounded = false;

        agent.translate(self.vel * dt);
    }

    fn grounded_update(&mut self, frame: &SurfaceFrame, input: ControlInput, dt: f32) {
        self.surface_vel = frame.world_to_obj(self.vel);

        let horizontal = input.horizontal.signum() as f32;
        if horizontal != 0.0 {
            self.surface_vel.x += horizontal * self.accel * dt;
        }
        self.surface_vel.x *= 1.0 - self.tuning.friction;

        self.surface_vel.x = self
            .surface_vel
            .x
            .clamp(-self.tuning.max_speed, self.tuning.max_speed);
        if self.surface_vel.x.abs() < self.tuning.snap_speed {
            self.surface_vel.x = 0.0;
        }

        // One jump per press: re-armed only by releasing while grounded
        if !input.jump_held {
            self.can_jump = true;
        }
        if input.jump_held && self.can_jump {
            self.can_jump = false;
            self.jumped = true;
            self.surface_vel.y = self.jump_force * jump_multiplier(frame.up);
        }

        self.vel = frame.obj_to_world(self.surface_vel);
    }

    fn airborne_update(&mut self, dt: f32) {
        self.surface_vel = Vec2::ZERO;
        // +y is down
        self.vel.y = (self.vel.y + self.gravity * dt).min(self.tuning.terminal_velocity);
    }

    /// Queue a contact found this frame
    pub fn add_to_buffer(&mut self, info: CollisionInfo) {
        self.buffer.push(info);
    }

    /// Resolve every contact buffered this frame into one correction.
    ///
    /// Must run once per frame, after all platforms have been tested.
    /// The buffer is always empty afterwards.
    pub fn collision_response(&mut self, agent: &mut Agent) -> Resolution {
        let resolution = match self.buffer.len() {
            0 => {
                self.contact_point = None;
                Resolution::NoContact
            }
            1 => {
                let info = self.buffer[0].clone();
                self.resolve(agent, &info);
                Resolution::Resolved
            }
            _ if self.is_squished() => {
                log::debug!("player squished between {} surfaces", self.buffer.len());
                Resolution::Squished
            }
            _ if self.vel == Vec2::ZERO => {
                for info in &self.buffer {
                    agent.translate(info.offset_out());
                }
                Resolution::Separated
            }
            _ => {
                let info = self.most_opposing().clone();
                self.resolve(agent, &info);
                Resolution::Resolved
            }
        };

        self.buffer.clear();
        resolution
    }

    /// Any buffered contact deeper than the squish threshold
    pub fn is_squished(&self) -> bool {
        self.buffer.iter().any(|c| c.overlap > SQUISH_THRESHOLD)
    }

    /// Contact whose normal opposes the velocity most; first one wins ties.
    /// Only called with a non-empty buffer.
    fn most_opposing(&self) -> &CollisionInfo {
        let mut best = &self.buffer[0];
        let mut best_dot = self.vel.dot(best.normal);
        for info in &self.buffer[1..] {
            let d = self.vel.dot(info.normal);
            if d < best_dot {
                best_dot = d;
                best = info;
            }
        }
        best
    }

    fn resolve(&mut self, agent: &mut Agent, info: &CollisionInfo) {
        // Stay one skin width inside so the surface keeps registering
        agent.translate(info.offset_in() + info.inherited_offset);

        agent.frame = SurfaceFrame::from_normal(info.normal);

        // No bounce: keep only the part of the velocity along the surface
        self.vel = agent.frame.right * self.vel.dot(agent.frame.right);

        self.contact_point = Some(info.point);
        self.grounded = true;
    }
}

/// Jumps lose strength on steep or overhanging surfaces but never vanish
fn jump_multiplier(up: Vec2) -> f32 {
    ((up.dot(WORLD_UP) + 1.0) / 2.0).max(0.1)
}

/// The single player of a session
#[derive(Debug, Clone)]
pub struct Player {
    pub agent: Agent,
    pub controller: PlayerController,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32, tuning: PlayerTuning) -> Self {
        Self {
            agent: Agent::new(pos, radius),
            controller: PlayerController::new(tuning),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.agent.pos()
    }

    pub fn collider(&self) -> &Collider {
        &self.agent.collider
    }

    pub fn update(&mut self, input: ControlInput, dt: f32) {
        self.controller.update(&mut self.agent, input, dt);
    }

    pub fn add_to_buffer(&mut self, info: CollisionInfo) {
        self.controller.add_to_buffer(info);
    }

    pub fn collision_response(&mut self) -> Resolution {
        self.controller.collision_response(&mut self.agent)
    }
}
