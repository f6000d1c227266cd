//! Components attached to simulation objects.

pub mod collision;
pub mod motion;
