use log::{debug, warn};

use crate::{
    replication::{
        descriptor::{NodeDescriptor, Provenance},
        error::ReplicationError,
        primitive::apply_state,
        report::ApplyReport,
    },
    scene::{scene_traits::SceneMut, state::NodeKind},
};

/// Rebuilds `descriptor` under `parent`.
///
/// Returns a new detached node the caller must attach, or `None` when there
/// is nothing to attach: the node was embedded and updated in place, a
/// sibling already carries its name, or it failed. Failures are recorded in
/// `report` and only drop the failing node.
pub fn apply_descriptor<S: SceneMut>(
    scene: &mut S,
    owner: Option<S::Node>,
    parent: S::Node,
    descriptor: &NodeDescriptor,
    full_state: bool,
    report: &mut ApplyReport,
) -> Option<S::Node> {
    match &descriptor.provenance {
        Provenance::Template { path } => {
            if is_duplicate(scene, parent, descriptor) {
                return None;
            }
            let built = scene
                .instantiate_template(path)
                .map_err(ReplicationError::from);
            let node = record_failure(report, descriptor, built)?;
            finish_built(scene, Some(node), node, descriptor, full_state, report)
        }
        Provenance::Embedded => {
            apply_embedded(scene, owner, parent, descriptor, full_state, report);
            None
        }
        Provenance::FreeForm { kind } => {
            if is_duplicate(scene, parent, descriptor) {
                return None;
            }
            let built = build_free_form(scene, kind);
            let node = record_failure(report, descriptor, built)?;
            finish_built(scene, owner, node, descriptor, full_state, report)
        }
    }
}

/// Applies a batch under `parent`, attaching every node that was built
pub fn apply_all<S: SceneMut>(
    scene: &mut S,
    owner: Option<S::Node>,
    parent: S::Node,
    descriptors: &[NodeDescriptor],
    full_state: bool,
    report: &mut ApplyReport,
) -> Vec<S::Node> {
    let mut attached = Vec::new();
    for descriptor in descriptors {
        if let Some(node) = apply_descriptor(scene, owner, parent, descriptor, full_state, report) {
            scene.add_child(parent, node);
            attached.push(node);
        }
    }
    attached
}

fn is_duplicate<S: SceneMut>(scene: &S, parent: S::Node, descriptor: &NodeDescriptor) -> bool {
    if scene.child_by_name(parent, &descriptor.name).is_some() {
        debug!(
            "Node '{}' already exists under '{}', skipping",
            descriptor.name,
            scene.name(parent)
        );
        return true;
    }
    false
}

fn build_free_form<S: SceneMut>(scene: &mut S, kind: &NodeKind) -> Result<S::Node, ReplicationError> {
    let node = scene.create_node(&kind.base)?;
    if kind.has_behavior() {
        if let Err(error) = scene.attach_behavior(node, &kind.behavior) {
            scene.queue_free(node);
            return Err(error.into());
        }
    }
    Ok(node)
}

/// Names a freshly built node, writes its state and rebuilds its children
fn finish_built<S: SceneMut>(
    scene: &mut S,
    child_owner: Option<S::Node>,
    node: S::Node,
    descriptor: &NodeDescriptor,
    full_state: bool,
    report: &mut ApplyReport,
) -> Option<S::Node> {
    scene.set_name(node, &descriptor.name);

    if let Some(state) = &descriptor.state {
        if let Err(error) = apply_state(scene, node, state) {
            scene.queue_free(node);
            record_failure::<()>(report, descriptor, Err(error));
            return None;
        }
    }

    apply_all(scene, child_owner, node, &descriptor.children, full_state, report);
    Some(node)
}

fn apply_embedded<S: SceneMut>(
    scene: &mut S,
    owner: Option<S::Node>,
    parent: S::Node,
    descriptor: &NodeDescriptor,
    full_state: bool,
    report: &mut ApplyReport,
) {
    let found = scene
        .child_by_name(parent, &descriptor.name)
        .filter(|node| owner.is_none() || scene.owner(*node) == owner);

    let Some(node) = found else {
        let error = ReplicationError::EmbeddedNodeMissing {
            name: descriptor.name.clone(),
            parent: scene.name(parent).to_string(),
        };
        record_failure::<()>(report, descriptor, Err(error));
        return;
    };

    if full_state {
        if let Some(state) = &descriptor.state {
            if let Err(error) = apply_state(scene, node, state) {
                record_failure::<()>(report, descriptor, Err(error));
                return;
            }
        }
    }

    apply_all(scene, owner, node, &descriptor.children, full_state, report);
}

fn record_failure<T>(
    report: &mut ApplyReport,
    descriptor: &NodeDescriptor,
    result: Result<T, ReplicationError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            warn!("Dropping node '{}': {}", descriptor.name, error);
            report.record(&descriptor.name, error);
            None
        }
    }
}
