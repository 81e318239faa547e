use thiserror::Error;

use crate::scene::error::SceneError;

/// Reasons a single node could not be collected or rebuilt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    /// No live node sits at this address
    #[error("No node found at address '{address}'")]
    UnresolvedAddress { address: String },

    /// A collision shape carried a token this dimension does not know
    #[error("Unknown collision shape '{token}' on node '{node}'")]
    UnknownShape { token: String, node: String },

    /// A template child was expected under `parent` but is not there
    #[error("Embedded node '{name}' not found under '{parent}'")]
    EmbeddedNodeMissing { name: String, parent: String },

    /// A reparent would move a node under itself or its own subtree
    #[error("Cannot move '{node}' under '{parent}', which is inside its own subtree")]
    InvalidReparent { node: String, parent: String },

    /// A descriptor document is missing required fields
    #[error("Malformed node descriptor: {reason}")]
    MalformedDescriptor { reason: &'static str },

    #[error(transparent)]
    Scene(#[from] SceneError),
}
