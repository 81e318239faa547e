use crate::{
    keys,
    scene::scene_traits::{SceneMut, SceneRef},
    PeerId, HOST_PEER_ID,
};

/// The nearest node at or above `node` that is a controlling player: in the
/// player group and named after a peer id
pub fn controlling_player<S: SceneRef>(scene: &S, node: S::Node) -> Option<(S::Node, PeerId)> {
    let mut current = Some(node);
    while let Some(step) = current {
        if scene.is_in_group(step, keys::PLAYER_GROUP) {
            if let Ok(peer) = scene.name(step).parse::<PeerId>() {
                return Some((step, peer));
            }
        }
        current = scene.parent(step);
    }
    None
}

/// Peer that owns `node`, the host when no controlling player is found
pub fn resolve_authority<S: SceneRef>(scene: &S, node: S::Node) -> PeerId {
    controlling_player(scene, node)
        .map(|(_, peer)| peer)
        .unwrap_or(HOST_PEER_ID)
}

/// Derives the authority of `node` and stamps it on the whole subtree
pub fn assign_authority<S: SceneMut>(scene: &mut S, node: S::Node) -> PeerId {
    let peer = resolve_authority(scene, node);
    set_authority_recursive(scene, node, peer);
    peer
}

fn set_authority_recursive<S: SceneMut>(scene: &mut S, node: S::Node, peer: PeerId) {
    scene.set_authority(node, peer);
    for child in scene.children(node) {
        set_authority_recursive(scene, child, peer);
    }
}
