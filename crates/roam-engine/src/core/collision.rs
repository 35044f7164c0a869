//! Axis-aligned box collision between the walking agent and static props.
//!
//! Only the horizontal axes are resolved. Each obstacle is handled on its own,
//! in enumeration order, so a later obstacle may push the agent back into an
//! earlier one; there is no simultaneous solve.

use glam::Vec3;

/// Overlaps at or below this depth count as touching, not intersecting.
pub const CONTACT_EPSILON: f32 = 1e-5;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Build from two corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Penetration depth per axis. Negative components mean separation.
    pub fn overlap(&self, other: &Aabb) -> Vec3 {
        self.max.min(other.max) - self.min.max(other.min)
    }

    /// True when the boxes penetrate on all three axes.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let overlap = self.overlap(other);
        overlap.x > CONTACT_EPSILON && overlap.y > CONTACT_EPSILON && overlap.z > CONTACT_EPSILON
    }
}

/// Minimal horizontal displacement that moves `agent` out of `obstacle`.
///
/// Pushes along whichever of X or Z overlaps less, away from the obstacle's
/// center. Equal overlaps go along X; coincident centers push toward +axis.
/// Returns zero when the boxes do not intersect.
pub fn push_out(agent: &Aabb, obstacle: &Aabb) -> Vec3 {
    if !agent.intersects(obstacle) {
        return Vec3::ZERO;
    }

    let overlap = agent.overlap(obstacle);
    let agent_center = agent.center();
    let obstacle_center = obstacle.center();

    if overlap.x <= overlap.z {
        let sign = if agent_center.x < obstacle_center.x { -1.0 } else { 1.0 };
        Vec3::new(sign * overlap.x, 0.0, 0.0)
    } else {
        let sign = if agent_center.z < obstacle_center.z { -1.0 } else { 1.0 };
        Vec3::new(0.0, 0.0, sign * overlap.z)
    }
}

/// Resolve a prospective agent position against every obstacle in order.
pub fn resolve<'a>(
    position: Vec3,
    half_extents: Vec3,
    obstacles: impl IntoIterator<Item = &'a Aabb>,
) -> Vec3 {
    let mut position = position;
    for obstacle in obstacles {
        let agent = Aabb::from_center(position, half_extents);
        position += push_out(&agent, obstacle);
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: Vec3 = Vec3::new(0.3, 1.8, 0.3);

    fn pillar() -> Aabb {
        Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 3.0, 1.0))
    }

    #[test]
    fn separated_boxes_do_not_intersect() {
        let a = Aabb::from_center(Vec3::new(5.0, 1.8, 5.0), HALF);
        assert!(!a.intersects(&pillar()));
        assert_eq!(push_out(&a, &pillar()), Vec3::ZERO);
    }

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = Aabb::from_center(Vec3::new(1.3, 1.8, 0.0), HALF);
        assert!(!a.intersects(&pillar()));
    }

    #[test]
    fn pushes_along_smaller_overlap() {
        // Slightly inside the +X face, well inside on Z.
        let a = Aabb::from_center(Vec3::new(1.2, 1.8, 0.1), HALF);
        let push = push_out(&a, &pillar());
        assert!((push.x - 0.1).abs() < 1e-5);
        assert_eq!(push.z, 0.0);

        // Slightly inside the -Z face.
        let a = Aabb::from_center(Vec3::new(0.2, 1.8, -1.25), HALF);
        let push = push_out(&a, &pillar());
        assert_eq!(push.x, 0.0);
        assert!((push.z - -0.05).abs() < 1e-5);
    }

    #[test]
    fn resolution_clears_overlap_and_is_idempotent() {
        let resolved = resolve(Vec3::new(-1.1, 1.8, 0.4), HALF, [&pillar()]);
        let agent = Aabb::from_center(resolved, HALF);
        assert!(!agent.intersects(&pillar()));
        assert!(agent.overlap(&pillar()).x <= CONTACT_EPSILON);

        let again = resolve(resolved, HALF, [&pillar()]);
        assert_eq!(again, resolved);
    }

    #[test]
    fn vertical_axis_is_never_pushed() {
        let a = Aabb::from_center(Vec3::new(0.9, 0.5, 0.0), HALF);
        assert_eq!(push_out(&a, &pillar()).y, 0.0);
    }

    #[test]
    fn nested_center_pushes_along_x() {
        let a = Aabb::from_center(Vec3::new(0.0, 1.5, 0.0), HALF);
        let push = push_out(&a, &pillar());
        assert!(push.x > 0.0);
        assert_eq!(push.z, 0.0);
    }

    #[test]
    fn perpendicular_walls_resolve_in_one_pass() {
        // A wall running along X and one running along Z, crossing each other.
        let along_x = Aabb::new(Vec3::new(-5.0, 0.0, -1.0), Vec3::new(5.0, 3.0, 0.0));
        let along_z = Aabb::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(1.0, 3.0, 5.0));

        let resolved = resolve(Vec3::new(-0.1, 1.8, 0.1), HALF, [&along_x, &along_z]);
        let agent = Aabb::from_center(resolved, HALF);
        assert!(!agent.intersects(&along_x), "still inside along_x at {resolved:?}");
        assert!(!agent.intersects(&along_z), "still inside along_z at {resolved:?}");
    }

    #[test]
    fn new_orders_corners() {
        let b = Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(b.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
    }
}
