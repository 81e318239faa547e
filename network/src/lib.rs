//! # Canopy
//! Host-authoritative replication of a scene tree. Peers exchange four
//! reliable remote calls carrying serialized document values, and rebuild
//! each other's nodes through the `canopy_shared` scene traits.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

#[macro_use]
extern crate cfg_if;

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        compile_error!("canopy uses std sockets and does not support wasm targets");
    }
}

pub mod transport;
pub mod shared {
    pub use canopy_shared::{
        keys, NodeAddress, NodeDescriptor, Provenance, SceneMut, SceneRef, Value,
    };
}

mod error;
mod events;
mod messages;
mod network;
mod network_config;
mod roster;

pub use canopy_shared::{NetworkState, PeerId, HOST_PEER_ID};
pub use error::{NetworkError, TransportError};
pub use events::{
    ConnectEvent, DisconnectEvent, ErrorEvent, NetworkEvent, NetworkEvents, NetworkUpdateEvent,
    ReplicationFailureEvent,
};
pub use messages::{NetworkMessage, RemoteCall, RemoteMethod};
pub use network::Network;
pub use network_config::NetworkConfig;
