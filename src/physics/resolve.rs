//! Resolution policy: pair classification and positional corrections.
//!
//! Category branching is resolved once per pair into a closed rule enum
//! instead of re-derived from tag checks at every call site. Application is
//! a single positional correction per pair per step; there is no iterative
//! relaxation and no angular response.

use glam::Vec2;

use crate::ecs::components::motion::Motion;

use super::contact::Mtv;

/// Closed dynamic-object category, snapshotted once per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyClass {
    /// Exempt from displacement in dynamic-dynamic pushing.
    Player,
    /// Detection only; never displaced, one hit per step.
    Projectile,
    /// Ordinary pushable dynamic object.
    Solid,
}

impl BodyClass {
    /// Resolve tag presence into a class. Projectile takes precedence so a
    /// mistagged object can never be displaced by the engine.
    pub fn classify(is_player: bool, is_projectile: bool) -> Self {
        if is_projectile {
            BodyClass::Projectile
        } else if is_player {
            BodyClass::Player
        } else {
            BodyClass::Solid
        }
    }
}

/// Rule for a (static obstacle, dynamic object) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticRule {
    /// Displace the object by the full MTV and cancel inward velocity.
    Block,
    /// Record hit events both ways; no displacement.
    ProjectileHit,
    /// Bonfire vs player: no blocking, no events.
    WalkThrough,
}

/// Classify a static pair. `bonfire` obstacles block everything except the
/// player, who walks through.
pub fn classify_static(bonfire: bool, class: BodyClass) -> StaticRule {
    match class {
        BodyClass::Projectile => StaticRule::ProjectileHit,
        BodyClass::Player if bonfire => StaticRule::WalkThrough,
        _ => StaticRule::Block,
    }
}

/// Rule for an unordered (first, second) dynamic pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRule {
    /// Neither side participates (projectile pair, player pair).
    Skip,
    /// Circle-based detection for damage events only; no displacement.
    HitOnly,
    /// Half the MTV to each side, opposite directions.
    SplitEvenly,
    /// Second is the player: first receives the full MTV away from it.
    PushFirst,
    /// First is the player: second receives the full MTV away from it.
    PushSecond,
}

/// Classify a dynamic pair from the two body classes.
pub fn classify_dynamic(first: BodyClass, second: BodyClass) -> PairRule {
    use BodyClass::*;
    match (first, second) {
        (Projectile, Projectile) | (Player, Player) => PairRule::Skip,
        (Projectile, _) | (_, Projectile) => PairRule::HitOnly,
        (Player, Solid) => PairRule::PushSecond,
        (Solid, Player) => PairRule::PushFirst,
        (Solid, Solid) => PairRule::SplitEvenly,
    }
}

/// Shift an object's position. Missing Motion is ignored: the object was
/// despawned between collection and resolution.
pub fn displace(world: &mut hecs::World, entity: hecs::Entity, delta: Vec2) {
    if let Ok(mut motion) = world.get::<&mut Motion>(entity) {
        motion.position += delta;
    }
}

/// Sliding-contact response: cancel the velocity component pointing into
/// the surface whose outward normal is `normal`, keeping the tangential
/// component. Not a bounce.
pub fn cancel_inward_velocity(world: &mut hecs::World, entity: hecs::Entity, normal: Vec2) {
    if let Ok(mut motion) = world.get::<&mut Motion>(entity) {
        let inward = motion.velocity.dot(normal);
        if inward < 0.0 {
            motion.velocity -= normal * inward;
        }
    }
}

/// Apply a confirmed static-blocking contact: full MTV push-out plus the
/// sliding velocity cancel. `mtv` points from the obstacle toward the
/// object.
pub fn apply_static_block(world: &mut hecs::World, object: hecs::Entity, mtv: Mtv) {
    displace(world, object, mtv.displacement());
    cancel_inward_velocity(world, object, mtv.axis);
}

/// Apply a confirmed dynamic-dynamic contact under the given rule. `mtv`
/// points from `first` toward `second`.
pub fn apply_dynamic_pair(
    world: &mut hecs::World,
    first: hecs::Entity,
    second: hecs::Entity,
    rule: PairRule,
    mtv: Mtv,
) {
    match rule {
        PairRule::SplitEvenly => {
            let half = mtv.displacement() * 0.5;
            displace(world, first, -half);
            displace(world, second, half);
        }
        PairRule::PushSecond => displace(world, second, mtv.displacement()),
        PairRule::PushFirst => displace(world, first, -mtv.displacement()),
        PairRule::Skip | PairRule::HitOnly => {}
    }
}
