//! Motion integration and the camera-follow clamp.

use glam::Vec2;
use hecs::Satisfies;

use crate::ecs::components::collision::{CameraTarget, Projectile, ScreenConstrained, StaticObstacle};
use crate::ecs::components::motion::Motion;

/// Advance every dynamic object by `velocity * step_seconds`.
///
/// Static obstacles never move. Projectiles are positioned externally and
/// are skipped here as well.
pub fn integrate_motion(world: &mut hecs::World, step_seconds: f32) {
    for (_, (motion, is_static, is_projectile)) in world.query_mut::<(
        &mut Motion,
        Satisfies<&StaticObstacle>,
        Satisfies<&Projectile>,
    )>() {
        if is_static || is_projectile {
            continue;
        }
        let velocity = motion.velocity;
        motion.position += velocity * step_seconds;
    }
}

/// Clamp screen-constrained objects so their footprint box stays inside a
/// window of `half_extents` centered on the camera target.
///
/// A soft camera-follow clamp, not a collision: velocities are untouched.
/// Without a camera target the clamp is a no-op.
pub fn clamp_to_camera(world: &mut hecs::World, half_extents: Vec2) {
    let target = world
        .query::<(&Motion, Satisfies<&CameraTarget>)>()
        .iter()
        .find_map(|(_, (motion, is_target))| is_target.then_some(motion.position));
    let Some(center) = target else {
        return;
    };

    for (_, (motion, constrained)) in
        world.query_mut::<(&mut Motion, Satisfies<&ScreenConstrained>)>()
    {
        if !constrained {
            continue;
        }
        let footprint = motion.scale.abs() * 0.5;
        let lo = center - half_extents + footprint;
        let hi = center + half_extents - footprint;
        // max-then-min keeps this total even if the window is smaller than
        // the object.
        motion.position = motion.position.max(lo).min(hi);
    }
}
