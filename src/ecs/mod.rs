//! Component definitions for objects stored in a hecs World.

pub mod components;

pub mod prelude {
    pub use super::components::collision::*;
    pub use super::components::motion::Motion;
}
