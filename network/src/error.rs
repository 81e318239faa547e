use thiserror::Error;

use canopy_shared::{NetworkState, ParseError, PeerId, ReplicationError};

/// Failures of the underlying transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Failed to bind {address}: {reason}")]
    Bind { address: String, reason: String },

    #[error("Failed to connect to {address}: {reason}")]
    Connect { address: String, reason: String },

    #[error("Failed to send to {target}: {reason}")]
    Send { target: String, reason: String },

    #[error("Failed to receive: {reason}")]
    Receive { reason: String },

    /// Sending to a peer that is not (or no longer) connected
    #[error("Peer {peer} is not connected")]
    UnknownPeer { peer: PeerId },

    /// A line on the wire did not match any frame layout
    #[error("Malformed frame '{frame}'")]
    MalformedFrame { frame: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// Requires a listening or connected network
    #[error("Network is not active")]
    NotActive,

    #[error("Network is already active as {state:?}")]
    AlreadyActive { state: NetworkState },

    #[error("Unknown remote method '{method}'")]
    UnknownMethod { method: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Malformed message payload: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Replication(#[from] ReplicationError),
}
