//! Motion component: position, orientation, velocity, and scale.

use glam::Vec2;

/// Per-object motion record. Stores position, orientation angle, velocity,
/// and a non-uniform scale separately.
///
/// `scale` components may be negative to flip an object's facing; geometry
/// code that needs a footprint size takes the absolute value.
#[derive(Debug, Clone, Copy)]
pub struct Motion {
    /// World-space position.
    pub position: Vec2,
    /// Orientation angle in radians (counter-clockwise).
    pub angle: f32,
    /// World-space velocity in units per second.
    pub velocity: Vec2,
    /// Non-uniform scale. Also doubles as the object's nominal footprint
    /// size for objects without an explicit collision shape.
    pub scale: Vec2,
}

impl Motion {
    /// Create a motion record at rest with the given position.
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            angle: 0.0,
            velocity: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }

    /// Create a motion record with a position and footprint scale.
    pub fn new(position: Vec2, scale: Vec2) -> Self {
        Self {
            position,
            angle: 0.0,
            velocity: Vec2::ZERO,
            scale,
        }
    }

    /// Builder-style velocity setter.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder-style angle setter.
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self::from_position(Vec2::ZERO)
    }
}
