//! Broad-phase culling: padded bounding circles plus a per-step cache of
//! bounds-group box membership for static obstacles.

use std::collections::HashMap;

use glam::Vec2;
use hecs::Satisfies;

use crate::ecs::components::collision::{
    Bonfire, Collider, FootMarker, NonCollider, Player, Projectile, StaticObstacle,
};
use crate::ecs::components::motion::Motion;

use super::resolve::BodyClass;
use super::shape;

/// Shared bounding box for a group of static obstacles (one tile or chunk).
///
/// Obstacles carrying the same box are culled with a single membership test
/// per dynamic object per step instead of one distance test each.
#[derive(Debug, Clone, Copy)]
pub struct BoundsGroup {
    /// Box center in world space.
    pub center: Vec2,
    /// Box half extents in world space.
    pub half_extents: Vec2,
}

/// Integer-rounded box center, identifying the group within a step.
pub type GroupKey = (i32, i32);

impl BoundsGroup {
    /// Group identity: obstacles whose box centers round to the same
    /// integer pair share one cache slot.
    #[inline]
    pub fn key(&self) -> GroupKey {
        (self.center.x.round() as i32, self.center.y.round() as i32)
    }
}

/// Step-scoped memo of "is this dynamic object inside this group's padded
/// box". Rebuilt from empty at the start of every step; holds no
/// cross-step state.
#[derive(Debug, Default)]
pub struct BoxCache {
    entries: HashMap<(GroupKey, hecs::Entity), bool>,
}

impl BoxCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all memoized results at the start of a step.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Padded box membership for `point`, memoized per (group, entity).
    pub fn contains(
        &mut self,
        group: &BoundsGroup,
        entity: hecs::Entity,
        point: Vec2,
        pad: f32,
    ) -> bool {
        *self.entries.entry((group.key(), entity)).or_insert_with(|| {
            let half = group.half_extents + Vec2::splat(pad);
            let offset = (point - group.center).abs();
            offset.x <= half.x && offset.y <= half.y
        })
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Padded bounding-circle rejection test.
#[inline]
pub fn circles_may_overlap(
    center_a: Vec2,
    radius_a: f32,
    center_b: Vec2,
    radius_b: f32,
    pad: f32,
) -> bool {
    let combined = radius_a + radius_b + pad;
    center_a.distance_squared(center_b) <= combined * combined
}

/// Broad-phase snapshot of a dynamic object.
#[derive(Debug, Clone, Copy)]
pub struct DynamicEntry {
    pub entity: hecs::Entity,
    pub center: Vec2,
    pub radius: f32,
    pub class: BodyClass,
}

/// Broad-phase snapshot of a static obstacle.
#[derive(Debug, Clone, Copy)]
pub struct StaticEntry {
    pub entity: hecs::Entity,
    pub center: Vec2,
    pub radius: f32,
    pub bonfire: bool,
    pub group: Option<BoundsGroup>,
}

/// Collect every collidable dynamic object with its culling radius and
/// resolved body class. Non-colliders and cosmetic markers never enter.
pub fn collect_dynamic(world: &hecs::World) -> Vec<DynamicEntry> {
    let mut entries = Vec::new();
    for (entity, (motion, collider, is_player, is_projectile)) in world
        .query::<(&Motion, &Collider, Satisfies<&Player>, Satisfies<&Projectile>)>()
        .without::<&StaticObstacle>()
        .without::<&NonCollider>()
        .without::<&FootMarker>()
        .iter()
    {
        entries.push(DynamicEntry {
            entity,
            center: motion.position,
            radius: shape::bounding_radius(Some(&collider.shape), motion),
            class: BodyClass::classify(is_player, is_projectile),
        });
    }
    entries
}

/// Collect every collidable static obstacle with its optional bounds group.
pub fn collect_static(world: &hecs::World) -> Vec<StaticEntry> {
    let mut entries = Vec::new();
    for (entity, (motion, collider, bonfire, group)) in world
        .query::<(&Motion, &Collider, Satisfies<&Bonfire>, Option<&BoundsGroup>)>()
        .with::<&StaticObstacle>()
        .without::<&NonCollider>()
        .without::<&FootMarker>()
        .iter()
    {
        entries.push(StaticEntry {
            entity,
            center: motion.position,
            radius: shape::bounding_radius(Some(&collider.shape), motion),
            bonfire,
            group: group.copied(),
        });
    }
    entries
}

/// Whether a (static, dynamic) pair survives culling, using the obstacle's
/// group box when it has one and the padded distance test otherwise.
pub fn static_pair_survives(
    obstacle: &StaticEntry,
    object: &DynamicEntry,
    cache: &mut BoxCache,
    pad: f32,
) -> bool {
    match &obstacle.group {
        Some(group) => cache.contains(group, object.entity, object.center, pad),
        None => circles_may_overlap(
            obstacle.center,
            obstacle.radius,
            object.center,
            object.radius,
            pad,
        ),
    }
}
