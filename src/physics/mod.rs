//! 2D collision engine with discrete per-step detection and resolution.
//!
//! # Architecture
//!
//! [`CollisionEngine::step`] runs the whole pass once per simulation tick:
//!
//! 1. Clear step-scoped state (event list, bounds-group cache)
//! 2. Integrate motion and apply the camera-follow clamp
//! 3. Obstacle pass: static obstacles vs. every dynamic object
//!    (blocking push-out + projectile hit events)
//! 4. Dynamic pass: all dynamic pairs i < j
//!    (damage events + blocking/pushing)
//!
//! The pass is single-threaded and runs to completion before any other
//! system observes object state. Corrections applied late in a step are not
//! re-validated against earlier passes; dense clusters can retain minor
//! same-step penetration, resolved on the following ticks.

pub mod broadphase;
pub mod contact;
pub mod integrate;
pub mod narrowphase;
pub mod resolve;
pub mod shape;

use std::collections::HashSet;

use glam::Vec2;
use thiserror::Error;
use tracing::{debug, trace};

use crate::ecs::components::collision::Collider;
use crate::ecs::components::motion::Motion;

use self::broadphase::{BoxCache, DynamicEntry};
use self::contact::{ContactEvent, Mtv};
use self::resolve::{PairRule, StaticRule};
use self::shape::WorldShape;

/// Configuration for the collision engine.
#[derive(Debug, Clone)]
pub struct CollisionConfig {
    /// Padding added to every broad-phase culling radius, in world units.
    /// Must cover one step's worst-case displacement plus previous-step MTV
    /// slack; objects moving further per step can tunnel. Default: 100.
    pub broadphase_pad: f32,
    /// Fastest speed any object is expected to reach, in units per second.
    /// Used only by [`CollisionConfig::validate`]. Default: 4000.
    pub max_object_speed: f32,
    /// Half extents of the camera window used by the screen-constrained
    /// clamp. Default: (480, 270).
    pub camera_half_extents: Vec2,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            broadphase_pad: 100.0,
            max_object_speed: 4000.0,
            camera_half_extents: Vec2::new(480.0, 270.0),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("broad-phase pad must be positive and finite, got {pad}")]
    InvalidPad { pad: f32 },
    #[error(
        "broad-phase pad {pad} is below the worst-case step displacement \
         {displacement} ({max_speed} units/s over {step_seconds}s); fast \
         objects could tunnel through thin obstacles"
    )]
    PadTooSmall {
        pad: f32,
        displacement: f32,
        max_speed: f32,
        step_seconds: f32,
    },
}

impl CollisionConfig {
    /// Check that the pad covers one step's worst-case displacement at the
    /// configured maximum object speed.
    ///
    /// The pad is a heuristic, not a swept-collision guarantee; validating
    /// it against the intended speed ceiling makes the tunneling bound an
    /// explicit tunable instead of an inferred one.
    pub fn validate(&self, step_seconds: f32) -> Result<(), ConfigError> {
        if !self.broadphase_pad.is_finite() || self.broadphase_pad <= 0.0 {
            return Err(ConfigError::InvalidPad {
                pad: self.broadphase_pad,
            });
        }
        let displacement = self.max_object_speed * step_seconds;
        if self.broadphase_pad < displacement {
            return Err(ConfigError::PadTooSmall {
                pad: self.broadphase_pad,
                displacement,
                max_speed: self.max_object_speed,
                step_seconds,
            });
        }
        Ok(())
    }
}

/// The collision engine. Owns only step-scoped scratch state; all object
/// state lives in the caller's `hecs::World`.
pub struct CollisionEngine {
    config: CollisionConfig,
    box_cache: BoxCache,
    events: Vec<ContactEvent>,
    /// Projectiles whose one hit this step has been consumed.
    spent_projectiles: HashSet<hecs::Entity>,
}

impl CollisionEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: CollisionConfig) -> Self {
        Self {
            config,
            box_cache: BoxCache::new(),
            events: Vec::new(),
            spent_projectiles: HashSet::new(),
        }
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Contact events recorded during the most recent step.
    pub fn events(&self) -> &[ContactEvent] {
        &self.events
    }

    /// Drain the event list, handing ownership to the gameplay consumer.
    pub fn take_events(&mut self) -> Vec<ContactEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run one full collision step: integrate, obstacle pass, dynamic pass.
    ///
    /// Always runs to completion; there are no recoverable failures inside
    /// a step. Corrected positions and velocities are written back into the
    /// world's `Motion` components in place.
    pub fn step(&mut self, world: &mut hecs::World, step_seconds: f32) {
        self.events.clear();
        self.box_cache.clear();
        self.spent_projectiles.clear();

        integrate::integrate_motion(world, step_seconds);
        integrate::clamp_to_camera(world, self.config.camera_half_extents);

        self.obstacle_pass(world);
        self.dynamic_pass(world);

        debug!(
            events = self.events.len(),
            "collision step complete ({step_seconds}s)"
        );
    }

    /// Static obstacles vs. every dynamic object: blocking push-out for
    /// solids and the player, hit events for projectiles.
    fn obstacle_pass(&mut self, world: &mut hecs::World) {
        let obstacles = broadphase::collect_static(world);
        let objects = broadphase::collect_dynamic(world);
        trace!(
            obstacles = obstacles.len(),
            objects = objects.len(),
            "obstacle pass"
        );

        for obstacle in &obstacles {
            let Some(obstacle_shape) = resolve_shape(world, obstacle.entity) else {
                continue;
            };

            for object in &objects {
                let rule = resolve::classify_static(obstacle.bonfire, object.class);
                if rule == StaticRule::WalkThrough {
                    continue;
                }
                if rule == StaticRule::ProjectileHit
                    && self.spent_projectiles.contains(&object.entity)
                {
                    continue;
                }
                if !broadphase::static_pair_survives(
                    obstacle,
                    object,
                    &mut self.box_cache,
                    self.config.broadphase_pad,
                ) {
                    continue;
                }

                // Narrow phase against the object's current, possibly
                // already-corrected motion.
                let Some(mtv) = test_against(world, &obstacle_shape, object.entity) else {
                    continue;
                };

                match rule {
                    StaticRule::Block => {
                        resolve::apply_static_block(world, object.entity, mtv);
                    }
                    StaticRule::ProjectileHit => {
                        self.record_pair(object.entity, obstacle.entity);
                        self.spent_projectiles.insert(object.entity);
                    }
                    StaticRule::WalkThrough => unreachable!("filtered above"),
                }
            }
        }
    }

    /// All dynamic pairs i < j: pushing between solids and the player,
    /// circle-based hit detection for projectiles.
    fn dynamic_pass(&mut self, world: &mut hecs::World) {
        let objects = broadphase::collect_dynamic(world);
        trace!(objects = objects.len(), "dynamic pass");

        for i in 0..objects.len() {
            for j in (i + 1)..objects.len() {
                let (first, second) = (&objects[i], &objects[j]);

                let rule = resolve::classify_dynamic(first.class, second.class);
                if rule == PairRule::Skip {
                    continue;
                }
                if rule == PairRule::HitOnly && self.projectile_spent(first, second) {
                    continue;
                }
                if !broadphase::circles_may_overlap(
                    first.center,
                    first.radius,
                    second.center,
                    second.radius,
                    self.config.broadphase_pad,
                ) {
                    continue;
                }

                if rule == PairRule::HitOnly {
                    // Detection only, on current bounding circles. The pass
                    // snapshot feeds the cull above; an earlier push in the
                    // same pass may have moved either side off it.
                    let (Some((ca, ra)), Some((cb, rb))) = (
                        current_bounding_circle(world, first.entity),
                        current_bounding_circle(world, second.entity),
                    ) else {
                        continue;
                    };
                    if narrowphase::circle_circle(ca, ra, cb, rb).is_some() {
                        self.record_pair(first.entity, second.entity);
                        self.mark_projectiles_spent(first, second);
                    }
                    continue;
                }

                let Some(mtv) = test_pair(world, first.entity, second.entity) else {
                    continue;
                };
                resolve::apply_dynamic_pair(world, first.entity, second.entity, rule, mtv);
                // Player contact is damage-relevant; solid-solid pushing
                // is not.
                if matches!(rule, PairRule::PushFirst | PairRule::PushSecond) {
                    self.record_pair(first.entity, second.entity);
                }
            }
        }
    }

    /// Append both orderings of a confirmed contact.
    fn record_pair(&mut self, a: hecs::Entity, b: hecs::Entity) {
        self.events.push(ContactEvent {
            subject: a,
            other: b,
        });
        self.events.push(ContactEvent {
            subject: b,
            other: a,
        });
    }

    fn projectile_spent(&self, first: &DynamicEntry, second: &DynamicEntry) -> bool {
        self.spent_projectiles.contains(&first.entity)
            || self.spent_projectiles.contains(&second.entity)
    }

    fn mark_projectiles_spent(&mut self, first: &DynamicEntry, second: &DynamicEntry) {
        for entry in [first, second] {
            if entry.class == resolve::BodyClass::Projectile {
                self.spent_projectiles.insert(entry.entity);
            }
        }
    }
}

impl Default for CollisionEngine {
    fn default() -> Self {
        Self::new(CollisionConfig::default())
    }
}

/// Resolve an entity's collision shape into world space from its current
/// motion. None when the entity lost its components mid-step.
fn resolve_shape(world: &hecs::World, entity: hecs::Entity) -> Option<WorldShape> {
    let motion = world.get::<&Motion>(entity).ok()?;
    let collider = world.get::<&Collider>(entity).ok()?;
    Some(WorldShape::resolve(&collider.shape, &motion))
}

/// An entity's current world-space bounding circle, re-read from Motion
/// rather than taken from a pass snapshot so same-step displacements are
/// seen.
fn current_bounding_circle(world: &hecs::World, entity: hecs::Entity) -> Option<(Vec2, f32)> {
    let motion = world.get::<&Motion>(entity).ok()?;
    let collider = world.get::<&Collider>(entity).ok()?;
    let radius = shape::bounding_radius(Some(&collider.shape), &motion);
    Some((motion.position, radius))
}

/// Test a pre-resolved shape against an entity's current shape. The MTV
/// axis points from the fixed shape toward the entity.
fn test_against(world: &hecs::World, fixed: &WorldShape, entity: hecs::Entity) -> Option<Mtv> {
    let other = resolve_shape(world, entity)?;
    narrowphase::detect_collision(fixed, &other)
}

/// Test two entities' current shapes. The MTV axis points from A toward B.
fn test_pair(world: &hecs::World, a: hecs::Entity, b: hecs::Entity) -> Option<Mtv> {
    let shape_a = resolve_shape(world, a)?;
    let shape_b = resolve_shape(world, b)?;
    narrowphase::detect_collision(&shape_a, &shape_b)
}
