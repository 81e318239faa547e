//! # Canopy Shared
//! Scene capability traits plus the snapshot collection and application
//! logic every canopy peer runs.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        compile_error!("canopy-shared depends on std networking and filesystem access and does not support wasm targets");
    }
}

pub use canopy_document::{ParseError, Value, Vector2, Vector3, Vector4, MAX_DEPTH};

mod address;
pub mod keys;
mod replication;
mod resources;
mod scene;
mod timer;
mod types;

pub use address::NodeAddress;
pub use replication::{
    apply::{apply_all, apply_descriptor},
    authority::{assign_authority, controlling_player, resolve_authority},
    collect::{collect_added, collect_everything, collect_subtree},
    descriptor::{NodeDescriptor, Provenance},
    error::ReplicationError,
    primitive::{apply_state, capture_state, read_shape},
    report::{ApplyFailure, ApplyReport},
};
pub use resources::{ResourceError, ResourceKind, ResourceManifest};
pub use scene::{
    error::SceneError,
    scene_traits::{SceneMut, SceneRef},
    state::{
        CollisionObjectState, CollisionShapeState, Dimension, Node2DState, Node3DState, NodeKind,
        Shape,
    },
};
pub use timer::{Scheduler, Timer, TimerKey, TimerMode};
pub use types::{NetworkState, PeerId, HOST_PEER_ID};
