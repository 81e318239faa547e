//! # Canopy Demo Scene
//! An arena-backed scene tree implementing the canopy scene traits, plus
//! the templates the demos and integration tests build on.

mod arena;
mod builtin;
mod level;
mod library;

pub use arena::{ArenaScene, NodeId};
pub use level::{demo_library, CRATE_PATH, LEVEL_PATH, PLAYER_PATH};
pub use library::{TemplateLibrary, TemplateNode};
