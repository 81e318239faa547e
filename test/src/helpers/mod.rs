pub mod assertions;
pub mod exchange;
pub mod peer_pair;
pub mod scene_builder;

pub use exchange::{calls_named, drain_calls, exchange, exchange_n_times};
pub use peer_pair::{init_logging, PeerPair};
pub use scene_builder::{node_2d_at, snapshot_library, OBJ_PATH};
