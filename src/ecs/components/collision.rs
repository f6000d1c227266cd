//! Collision components: shapes and category tags.

use glam::Vec2;

/// Collision shape, interpreted in the object's local frame.
#[derive(Debug, Clone)]
pub enum ColliderShape {
    /// Circle with a local-space radius. The radius is scale-invariant:
    /// callers must not apply non-uniform scale to circle shapes.
    Circle { radius: f32 },
    /// Closed loop of local-space points at unit scale. May be non-convex;
    /// the narrow phase handles concave footprints exactly.
    Polygon { points: Vec<Vec2> },
}

/// Collision detection component.
#[derive(Debug, Clone)]
pub struct Collider {
    pub shape: ColliderShape,
}

impl Collider {
    /// Circle collider with the given radius.
    pub fn circle(radius: f32) -> Self {
        Self {
            shape: ColliderShape::Circle { radius },
        }
    }

    /// Polygon collider from local-space points.
    pub fn polygon(points: Vec<Vec2>) -> Self {
        Self {
            shape: ColliderShape::Polygon { points },
        }
    }

    /// Axis-aligned rectangle collider with the given half extents.
    pub fn rect(half_extents: Vec2) -> Self {
        let h = half_extents;
        Self::polygon(vec![
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(h.x, h.y),
            Vec2::new(-h.x, h.y),
        ])
    }
}

// Category tags. Orthogonal marker components: an object may carry several.

/// Never moved by the engine. May still be despawned by external logic.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticObstacle;

/// Never receives position corrections; first confirmed hit per step is
/// terminal from the engine's perspective. Destruction stays external.
#[derive(Debug, Clone, Copy, Default)]
pub struct Projectile;

/// Exempt from displacement in dynamic-dynamic pushing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;

/// Excluded from all narrow-phase tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonCollider;

/// Cosmetic-only marker, excluded from all collision processing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FootMarker;

/// Static obstacle the player may walk through. Still blocks every other
/// dynamic category.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bonfire;

/// Clamped so the object's bounding box stays inside the camera window.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenConstrained;

/// The object the camera window is centered on.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraTarget;
