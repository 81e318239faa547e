pub mod error;
pub mod scene_traits;
pub mod state;
