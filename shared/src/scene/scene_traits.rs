use std::{fmt::Debug, hash::Hash};

use crate::{
    scene::{
        error::SceneError,
        state::{CollisionObjectState, CollisionShapeState, Node2DState, Node3DState, NodeKind, Shape},
    },
    PeerId,
};

/// Read access to a live scene tree.
///
/// Nodes are plain handles. Capability queries return `None` when a node
/// lacks that capability, which is how replication decides what state to
/// capture.
pub trait SceneRef {
    type Node: Copy + Eq + Hash + Debug;

    fn root(&self) -> Self::Node;

    /// Whether `node` is still alive
    fn contains(&self, node: Self::Node) -> bool;

    fn name(&self, node: Self::Node) -> &str;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Children in order
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    fn child_by_name(&self, parent: Self::Node, name: &str) -> Option<Self::Node> {
        self.children(parent)
            .into_iter()
            .find(|child| self.name(*child) == name)
    }

    /// Whether `ancestor` is `node` itself or sits somewhere above it
    fn is_ancestor_of(&self, ancestor: Self::Node, node: Self::Node) -> bool {
        let mut current = Some(node);
        while let Some(step) = current {
            if step == ancestor {
                return true;
            }
            current = self.parent(step);
        }
        false
    }

    /// The template instance (or level) whose predefined structure this node
    /// belongs to
    fn owner(&self, node: Self::Node) -> Option<Self::Node>;

    /// Set only on the root of a template instance
    fn template_path(&self, node: Self::Node) -> Option<&str>;

    fn kind(&self, node: Self::Node) -> NodeKind;

    fn groups(&self, node: Self::Node) -> Vec<String>;

    fn is_in_group(&self, node: Self::Node, group: &str) -> bool {
        self.groups(node).iter().any(|tag| tag == group)
    }

    fn authority(&self, node: Self::Node) -> PeerId;

    fn node_2d(&self, node: Self::Node) -> Option<Node2DState>;

    fn node_3d(&self, node: Self::Node) -> Option<Node3DState>;

    fn collision_object(&self, node: Self::Node) -> Option<CollisionObjectState>;

    fn collision_shape(&self, node: Self::Node) -> Option<CollisionShapeState>;
}

/// Mutation, construction and capability writes.
///
/// Capability setters are only called for capabilities the node reports
/// through `SceneRef`.
pub trait SceneMut: SceneRef {
    /// Builds a detached node of a built-in type
    fn create_node(&mut self, base: &str) -> Result<Self::Node, SceneError>;

    fn attach_behavior(&mut self, node: Self::Node, behavior: &str) -> Result<(), SceneError>;

    /// Builds a detached template instance. Nodes inside it are owned by the
    /// returned root.
    fn instantiate_template(&mut self, path: &str) -> Result<Self::Node, SceneError>;

    fn add_child(&mut self, parent: Self::Node, child: Self::Node);

    fn reparent(&mut self, node: Self::Node, new_parent: Self::Node);

    /// Detaches `node` and destroys its subtree at the end of the frame
    fn queue_free(&mut self, node: Self::Node);

    fn set_name(&mut self, node: Self::Node, name: &str);

    fn add_to_group(&mut self, node: Self::Node, group: &str);

    fn set_authority(&mut self, node: Self::Node, peer: PeerId);

    fn set_node_2d(&mut self, node: Self::Node, state: Node2DState);

    fn set_node_3d(&mut self, node: Self::Node, state: Node3DState);

    fn set_collision_object(&mut self, node: Self::Node, state: CollisionObjectState);

    fn set_shape(&mut self, node: Self::Node, shape: Option<Shape>);
}
