use glam::{Vec2, Vec3};

/// Rectangular play area on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// Minimum (x, z).
    pub min: Vec2,
    /// Maximum (x, z).
    pub max: Vec2,
}

impl WorldBounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Square area centered on the origin.
    pub fn square(half_size: f32) -> Self {
        Self::new(Vec2::splat(-half_size), Vec2::splat(half_size))
    }

    /// Clamp x and z independently. `y` passes through.
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x.clamp(self.min.x, self.max.x),
            position.y,
            position.z.clamp(self.min.y, self.max.y),
        )
    }

    pub fn contains(&self, position: Vec3) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.z >= self.min.y
            && position.z <= self.max.y
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::square(9.9)
    }
}
