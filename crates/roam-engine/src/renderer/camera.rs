use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::core::agent::AgentState;

/// Final first-person camera pose handed to the host renderer each frame.
/// Wire format: 8 floats, followed in the frame buffer by the 16-float view matrix.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CameraTransform {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Heading around +Y in radians.
    pub yaw: f32,
    /// Pitch around the camera's local X in radians.
    pub pitch: f32,
    pub _pad: [f32; 3],
}

impl CameraTransform {
    pub const FLOATS: usize = 8;

    pub fn from_agent(agent: &AgentState) -> Self {
        Self {
            x: agent.position.x,
            y: agent.position.y,
            z: agent.position.z,
            yaw: agent.yaw,
            pitch: agent.pitch,
            _pad: [0.0; 3],
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Yaw then pitch, matching a Y-up first-person rig.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// World-to-view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.position()).inverse()
    }
}
