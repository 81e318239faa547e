use log::debug;

use crate::{
    keys,
    replication::{
        descriptor::{NodeDescriptor, Provenance},
        primitive::capture_state,
    },
    scene::scene_traits::SceneRef,
};

/// Encodes `node` and its subtree.
///
/// `owner` is the template instance (or level root) whose predefined
/// structure is being walked. Nodes it owns are sent as embedded nodes, with
/// state only when `include_full_state` is set. Nodes in the ignore group
/// produce `None`, nodes in the ignore-children group are sent without
/// children.
pub fn collect_subtree<S: SceneRef>(
    scene: &S,
    owner: Option<S::Node>,
    node: S::Node,
    include_full_state: bool,
) -> Option<NodeDescriptor> {
    if scene.is_in_group(node, keys::NETWORK_IGNORE_GROUP) {
        debug!("Skipping ignored node '{}'", scene.name(node));
        return None;
    }

    let (provenance, state, child_owner) = if let Some(path) = scene.template_path(node) {
        (
            Provenance::Template {
                path: path.to_string(),
            },
            Some(capture_state(scene, node)),
            Some(node),
        )
    } else if owner.is_some() && scene.owner(node) == owner {
        let state = include_full_state.then(|| capture_state(scene, node));
        (Provenance::Embedded, state, owner)
    } else {
        (
            Provenance::FreeForm {
                kind: scene.kind(node),
            },
            Some(capture_state(scene, node)),
            owner,
        )
    };

    let mut descriptor = NodeDescriptor::new(scene.name(node), provenance);
    descriptor.state = state;

    if !scene.is_in_group(node, keys::NETWORK_IGNORE_CHILDREN_GROUP) {
        descriptor.children = scene
            .children(node)
            .into_iter()
            .filter_map(|child| collect_subtree(scene, child_owner, child, include_full_state))
            .collect();
    }

    Some(descriptor)
}

/// Every eligible child of the scene root, with full state. This is the
/// snapshot a newly connected peer receives.
pub fn collect_everything<S: SceneRef>(scene: &S) -> Vec<NodeDescriptor> {
    let root = scene.root();
    scene
        .children(root)
        .into_iter()
        .filter_map(|child| collect_subtree(scene, Some(root), child, true))
        .collect()
}

/// The descriptor sent when a single node is added at runtime: a template
/// instance is sent by path with its own state only, anything else is walked
/// in full starting from the node's owner.
pub fn collect_added<S: SceneRef>(scene: &S, node: S::Node) -> Option<NodeDescriptor> {
    match scene.template_path(node) {
        Some(path) => Some(
            NodeDescriptor::new(
                scene.name(node),
                Provenance::Template {
                    path: path.to_string(),
                },
            )
            .with_state(capture_state(scene, node)),
        ),
        None => collect_subtree(scene, scene.owner(node), node, false),
    }
}
