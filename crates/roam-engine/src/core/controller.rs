//! Kinematic controller: turns held direction intents into smoothed velocity,
//! head bob and a displacement of the agent.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::agent::AgentState;

/// The four movement intents. Set on key-down and cleared on key-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl Intents {
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Unit direction: `x` is strafe (right positive), `y` is forward.
    /// Opposing intents cancel out to zero.
    pub fn direction(&self) -> Vec2 {
        let x = self.right as i32 - self.left as i32;
        let y = self.forward as i32 - self.backward as i32;
        Vec2::new(x as f32, y as f32).normalize_or_zero()
    }
}

/// Per-frame movement constants. Values are per tick, not per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Velocity gained per tick while any intent is held.
    pub acceleration: f32,
    /// Velocity lost per tick and per axis while no intent is held.
    pub deceleration: f32,
    /// Per-axis velocity cap.
    pub max_speed: f32,
    /// Phase advance per moving tick.
    pub bob_frequency: f32,
    /// Vertical bob per unit of bobbing speed.
    pub bob_amplitude: f32,
    /// Factor from velocity magnitude to bobbing speed.
    pub bob_speed_scale: f32,
    /// Radians of look rotation per pixel of mouse movement.
    pub look_sensitivity: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            acceleration: 0.002,
            deceleration: 0.01,
            max_speed: 0.1,
            bob_frequency: 0.1,
            bob_amplitude: 0.1,
            bob_speed_scale: 10.0,
            look_sensitivity: 0.002,
        }
    }
}

/// Move `value` toward zero by `step`, stopping exactly at zero.
fn approach_zero(value: f32, step: f32) -> f32 {
    if value > 0.0 {
        (value - step).max(0.0)
    } else {
        (value + step).min(0.0)
    }
}

/// Accelerate under held intents or decelerate without them.
/// The stored velocity points opposite to the walking direction.
pub fn integrate_velocity(agent: &mut AgentState, intents: Intents, tuning: &MotionTuning) {
    if intents.any() {
        let direction = intents.direction();
        agent.velocity.x -= direction.x * tuning.acceleration;
        agent.velocity.z -= direction.y * tuning.acceleration;
        agent.velocity.x = agent.velocity.x.clamp(-tuning.max_speed, tuning.max_speed);
        agent.velocity.z = agent.velocity.z.clamp(-tuning.max_speed, tuning.max_speed);
    } else {
        agent.velocity.x = approach_zero(agent.velocity.x, tuning.deceleration);
        agent.velocity.z = approach_zero(agent.velocity.z, tuning.deceleration);
    }
}

/// Advance head bob from the current speed and place the eye height.
/// Bob only runs while an intent is held; on the first tick without one the
/// eye snaps back to rest height, even if the agent is still gliding.
pub fn apply_head_bob(agent: &mut AgentState, walking: bool, tuning: &MotionTuning) {
    let bobbing_speed = if walking {
        agent.speed() * tuning.bob_speed_scale
    } else {
        0.0
    };
    if bobbing_speed > 0.0 {
        agent.bob_phase += tuning.bob_frequency;
        agent.position.y =
            agent.eye_height + agent.bob_phase.sin() * tuning.bob_amplitude * bobbing_speed;
    } else {
        agent.position.y = agent.eye_height;
    }
}

/// Run one controller tick: velocity, head bob, then displacement.
pub fn step(agent: &mut AgentState, intents: Intents, tuning: &MotionTuning) {
    integrate_velocity(agent, intents, tuning);
    apply_head_bob(agent, intents.any(), tuning);
    let (strafe, forward) = (agent.velocity.x, agent.velocity.z);
    agent.move_right(-strafe);
    agent.move_forward(-forward);
}
