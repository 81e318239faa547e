use thiserror::Error;

/// Failures reported by a scene while building nodes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// No template is registered under this path
    #[error("No template registered at '{path}'")]
    UnknownTemplate { path: String },

    /// The scene cannot construct nodes of this base type
    #[error("Unknown node type '{type_name}'")]
    UnknownNodeType { type_name: String },

    /// No behavior with this name can be attached
    #[error("Unknown behavior '{behavior}'")]
    UnknownBehavior { behavior: String },
}
