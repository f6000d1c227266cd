//! Contact data: minimum translation vectors and per-step contact events.

use glam::Vec2;

/// Minimum translation vector separating two overlapping shapes.
///
/// `axis` is unit length and points from shape A toward shape B:
/// displacing B by `axis * depth` (or A by the negation) separates the
/// pair along the least-penetrating axis found during testing.
#[derive(Debug, Clone, Copy)]
pub struct Mtv {
    /// Unit separation axis, from A toward B.
    pub axis: Vec2,
    /// Overlap depth along `axis`.
    pub depth: f32,
}

impl Mtv {
    /// The translation that separates B from A.
    #[inline]
    pub fn displacement(&self) -> Vec2 {
        self.axis * self.depth
    }

    /// The same contact seen from the other shape's side.
    #[inline]
    pub fn flipped(&self) -> Mtv {
        Mtv {
            axis: -self.axis,
            depth: self.depth,
        }
    }
}

/// A damage-relevant overlap recorded during a step.
///
/// Ordered pair: each confirmed overlap appends both (A, B) and (B, A) so
/// consumers can scan for a subject without reversing pairs. Duplicates are
/// allowed; the list has no identity or lifecycle beyond the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub subject: hecs::Entity,
    pub other: hecs::Entity,
}
