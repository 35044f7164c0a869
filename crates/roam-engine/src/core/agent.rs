use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

use crate::core::collision::Aabb;

/// The first-person player: eye position, carried velocity and look angles.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    /// Eye position in world space. `y` is eye height plus head bob.
    pub position: Vec3,
    /// Raw velocity. `x` drives strafing, `z` drives forward motion, `y` is unused.
    /// Stored with the sign flipped relative to the walking direction.
    pub velocity: Vec3,
    /// Half-size of the collision box built around `position`.
    pub half_extents: Vec3,
    /// Rest eye height above the floor.
    pub eye_height: f32,
    /// Heading in radians around +Y. Zero looks down -Z.
    pub yaw: f32,
    /// Look up/down in radians, within ±π/2.
    pub pitch: f32,
    /// Head-bob phase accumulator.
    pub bob_phase: f32,
    /// Whether pointer lock is engaged. Movement and look only apply while locked.
    pub locked: bool,
}

impl AgentState {
    pub fn new(spawn: Vec3, half_extents: Vec3, eye_height: f32) -> Self {
        Self {
            position: spawn,
            velocity: Vec3::ZERO,
            half_extents,
            eye_height,
            yaw: 0.0,
            pitch: 0.0,
            bob_phase: 0.0,
            locked: false,
        }
    }

    /// Collision box centered on the current position.
    pub fn collision_box(&self) -> Aabb {
        Aabb::from_center(self.position, self.half_extents)
    }

    /// Walking direction on the XZ plane for the current yaw.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Strafe direction on the XZ plane for the current yaw.
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Walk along the yaw-projected forward vector.
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.forward() * distance;
    }

    /// Walk along the yaw-projected right vector.
    pub fn move_right(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }

    /// Apply a mouse-look delta (in pixels). Ignored unless locked.
    pub fn look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        if !self.locked {
            return;
        }
        self.yaw -= dx * sensitivity;
        self.pitch = (self.pitch - dy * sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    pub fn speed(&self) -> f32 {
        (self.velocity.x * self.velocity.x + self.velocity.z * self.velocity.z).sqrt()
    }
}
