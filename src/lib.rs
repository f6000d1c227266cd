//! clash2d
//!
//! A 2D collision detection and resolution engine for fixed-step
//! simulations, built on hecs for object storage.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **ecs** - components stored per object (Motion, Collider, category tags)
//! 2. **physics::shape** - local-to-world shape transform and bounding radii
//! 3. **physics::broadphase** - padded bounding-circle culling with a
//!    per-step bounds-group cache for static obstacles
//! 4. **physics::narrowphase** - SAT intersection with an exact concave guard
//! 5. **physics::resolve** - category-asymmetric positional resolution
//! 6. **physics::integrate** - motion integration and camera-window clamping
//!
//! The whole pass runs once per simulation tick via
//! [`CollisionEngine::step`]: integrate motion, then the static-obstacle
//! pass, then the all-pairs dynamic pass. Contact events generated during a
//! step are drained by the gameplay consumer before the next tick.

pub mod ecs;
pub mod physics;

// Re-export commonly used types
pub use ecs::components::collision::{
    Bonfire, CameraTarget, Collider, ColliderShape, FootMarker, NonCollider, Player, Projectile,
    ScreenConstrained, StaticObstacle,
};
pub use ecs::components::motion::Motion;

pub use physics::broadphase::BoundsGroup;
pub use physics::contact::{ContactEvent, Mtv};
pub use physics::{CollisionConfig, CollisionEngine, ConfigError};
