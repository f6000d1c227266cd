//! Local-to-world shape transform and conservative bounding radii.

use glam::Vec2;

use crate::ecs::components::collision::ColliderShape;
use crate::ecs::components::motion::Motion;

/// Rotate a vector counter-clockwise by `angle` radians.
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Transform a polygon's local-space points into world space.
///
/// The order is fixed: scale component-wise, rotate by the object's angle,
/// translate by the object's position. Reordering scale and rotation would
/// change the result for non-uniform scale.
pub fn world_vertices(points: &[Vec2], motion: &Motion) -> Vec<Vec2> {
    points
        .iter()
        .map(|p| motion.position + rotate(*p * motion.scale, motion.angle))
        .collect()
}

/// World-space center and radius for a circle shape.
///
/// The radius is scale-invariant since circles store only a scalar.
#[inline]
pub fn world_circle(radius: f32, motion: &Motion) -> (Vec2, f32) {
    (motion.position, radius)
}

/// Conservative bounding radius for broad-phase culling.
///
/// Circles use their radius. Polygons use the farthest scaled vertex from
/// the local origin, which is rotation-invariant and covers the true
/// footprint whatever the points' own extents are. Objects without an
/// explicit shape fall back to the half-diagonal of the absolute-value
/// scale box. All three over-approximate, erring toward extra candidates
/// that the narrow phase discards.
pub fn bounding_radius(shape: Option<&ColliderShape>, motion: &Motion) -> f32 {
    match shape {
        Some(ColliderShape::Circle { radius }) => *radius,
        Some(ColliderShape::Polygon { points }) => points
            .iter()
            .map(|p| (*p * motion.scale).length())
            .fold(0.0, f32::max),
        None => 0.5 * motion.scale.abs().length(),
    }
}

/// A shape resolved into world space at the moment of testing.
///
/// Built fresh from the object's current Motion for every test; world-space
/// geometry is never cached across steps.
#[derive(Debug, Clone)]
pub enum WorldShape {
    Circle { center: Vec2, radius: f32 },
    Polygon { vertices: Vec<Vec2> },
}

impl WorldShape {
    /// Transform a local shape by the object's current motion.
    pub fn resolve(shape: &ColliderShape, motion: &Motion) -> Self {
        match shape {
            ColliderShape::Circle { radius } => {
                let (center, radius) = world_circle(*radius, motion);
                WorldShape::Circle { center, radius }
            }
            ColliderShape::Polygon { points } => WorldShape::Polygon {
                vertices: world_vertices(points, motion),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_quarter_turn() {
        let v = rotate(Vec2::X, std::f32::consts::FRAC_PI_2);
        assert!((v - Vec2::Y).length() < 1e-6, "rotated X should be Y: {v:?}");
    }

    #[test]
    fn test_world_vertices_translation_only() {
        let motion = Motion::from_position(Vec2::new(10.0, 20.0));
        let points = [Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        let world = world_vertices(&points, &motion);
        assert_eq!(world[0], Vec2::new(11.0, 20.0));
        assert_eq!(world[1], Vec2::new(10.0, 21.0));
    }

    #[test]
    fn test_world_vertices_scale_before_rotate() {
        // Non-uniform scale applied before rotation: a unit X point scaled
        // by (2, 1) then rotated 90 degrees lands on +Y at distance 2.
        // Rotating first would land it at distance 1.
        let motion = Motion {
            position: Vec2::ZERO,
            angle: std::f32::consts::FRAC_PI_2,
            velocity: Vec2::ZERO,
            scale: Vec2::new(2.0, 1.0),
        };
        let world = world_vertices(&[Vec2::X], &motion);
        assert!(
            (world[0] - Vec2::new(0.0, 2.0)).length() < 1e-5,
            "scale must precede rotation: {:?}",
            world[0]
        );
    }

    #[test]
    fn test_world_vertices_negative_scale_flips() {
        let motion = Motion {
            position: Vec2::ZERO,
            angle: 0.0,
            velocity: Vec2::ZERO,
            scale: Vec2::new(-1.0, 1.0),
        };
        let world = world_vertices(&[Vec2::new(0.5, 0.25)], &motion);
        assert_eq!(world[0], Vec2::new(-0.5, 0.25));
    }

    #[test]
    fn test_bounding_radius_circle() {
        let motion = Motion::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        let shape = ColliderShape::Circle { radius: 7.0 };
        assert_eq!(bounding_radius(Some(&shape), &motion), 7.0);
    }

    #[test]
    fn test_bounding_radius_polygon_farthest_vertex() {
        // Points carry the real extents at unit scale: half extents
        // (30, 40) give the half-diagonal 50 from the farthest corner.
        let motion = Motion::from_position(Vec2::ZERO);
        let shape = ColliderShape::Polygon {
            points: vec![
                Vec2::new(-30.0, -40.0),
                Vec2::new(30.0, -40.0),
                Vec2::new(30.0, 40.0),
                Vec2::new(-30.0, 40.0),
            ],
        };
        let r = bounding_radius(Some(&shape), &motion);
        assert!((r - 50.0).abs() < 1e-4, "half-diagonal of 60x80: {r}");

        // Scale stretches the vertices; sign taken as magnitude through
        // the vector length.
        let stretched = Motion::new(Vec2::ZERO, Vec2::new(-2.0, 1.0));
        let r = bounding_radius(Some(&shape), &stretched);
        let expected = Vec2::new(60.0, 40.0).length();
        assert!((r - expected).abs() < 1e-3, "scaled corner: {r}");
    }

    #[test]
    fn test_bounding_radius_without_shape() {
        // Shapeless objects fall back to the scale-box half-diagonal.
        let motion = Motion::new(Vec2::ZERO, Vec2::new(-30.0, 40.0));
        assert!((bounding_radius(None, &motion) - 25.0).abs() < 1e-5);
    }
}
