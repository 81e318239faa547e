/// Reparenting travels as a pair of addresses and is replayed on the other
/// peer.

use canopy::{transport::Transport, ErrorEvent, NetworkError, NetworkMessage};
use canopy_demo_scene::{demo_library, ArenaScene, LEVEL_PATH, PLAYER_PATH};
use canopy_shared::{NodeAddress, ReplicationError, SceneRef};
use canopy_test::{
    assert_no_node_at, assert_node_at, calls_named, drain_calls, node_2d_at, snapshot_library,
    PeerPair,
};

#[test]
fn reparent_sends_both_addresses_and_is_applied() {
    let mut host_scene = ArenaScene::new("Root", snapshot_library());
    let root = host_scene.root();
    let a = node_2d_at(&mut host_scene, root, "A", 0.0, 0.0);
    let b = node_2d_at(&mut host_scene, root, "B", 5.0, 5.0);

    let mut pair = PeerPair::new(host_scene, ArenaScene::new("Root", snapshot_library()));
    pair.connect();
    let client_root = pair.client_root();
    assert_node_at!(pair.client_scene, client_root, "A");

    let mut raw = pair.raw_peer();
    pair.exchange();
    drain_calls(raw.as_mut());

    pair.host.reparent_node(&mut pair.host_scene, a, b);
    let calls = calls_named(&drain_calls(raw.as_mut()), "HandleReparentNode");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].payload, "{\"Node\":\"Root/A\",\"Parent\":\"Root/B\"}");

    pair.exchange();
    assert_node_at!(pair.client_scene, client_root, "B/A");
    assert_no_node_at!(pair.client_scene, client_root, "A");
}

fn invalid_reparent(node: &str, parent: &str) -> NetworkError {
    NetworkError::Replication(ReplicationError::InvalidReparent {
        node: node.to_string(),
        parent: parent.to_string(),
    })
}

#[test]
fn local_reparent_into_own_subtree_is_refused() {
    let mut host_scene = ArenaScene::new("Root", snapshot_library());
    let root = host_scene.root();
    let a = node_2d_at(&mut host_scene, root, "A", 0.0, 0.0);
    let inner = node_2d_at(&mut host_scene, a, "Inner", 1.0, 1.0);

    let mut pair = PeerPair::new(host_scene, ArenaScene::new("Root", snapshot_library()));
    pair.connect();
    let mut raw = pair.raw_peer();
    pair.exchange();
    drain_calls(raw.as_mut());

    pair.host.reparent_node(&mut pair.host_scene, a, a);
    pair.host.reparent_node(&mut pair.host_scene, a, inner);
    assert!(calls_named(&drain_calls(raw.as_mut()), "HandleReparentNode").is_empty());

    let (mut host_events, _) = pair.exchange();
    let errors: Vec<NetworkError> = host_events.read::<ErrorEvent>().collect();
    assert_eq!(
        errors,
        vec![
            invalid_reparent("Root/A", "Root/A"),
            invalid_reparent("Root/A", "Root/A/Inner"),
        ]
    );

    let host_root = pair.host_root();
    assert_node_at!(pair.host_scene, host_root, "A/Inner");
    assert_eq!(pair.host_scene.parent(a), Some(host_root));
}

#[test]
fn received_reparent_into_own_subtree_is_refused() {
    let mut host_scene = ArenaScene::new("Root", snapshot_library());
    let root = host_scene.root();
    let a = node_2d_at(&mut host_scene, root, "A", 0.0, 0.0);
    node_2d_at(&mut host_scene, a, "Inner", 1.0, 1.0);

    let mut pair = PeerPair::new(host_scene, ArenaScene::new("Root", snapshot_library()));
    pair.connect();
    let client_root = pair.client_root();
    assert_node_at!(pair.client_scene, client_root, "A/Inner");
    let before = pair.client_scene.node_count();

    let mut raw = pair.raw_peer();
    pair.exchange();
    let client = pair.client.local_peer_id().unwrap();

    for parent in ["Root/A", "Root/A/Inner"] {
        let call = NetworkMessage::ReparentNode {
            node: NodeAddress::parse("Root/A"),
            parent: NodeAddress::parse(parent),
        }
        .to_call();
        raw.send(client, &call).unwrap();
    }

    let (_, mut client_events) = pair.exchange();
    let errors: Vec<NetworkError> = client_events.read::<ErrorEvent>().collect();
    assert_eq!(
        errors,
        vec![
            invalid_reparent("Root/A", "Root/A"),
            invalid_reparent("Root/A", "Root/A/Inner"),
        ]
    );

    assert!(pair.client.is_client());
    assert_node_at!(pair.client_scene, client_root, "A/Inner");
    assert_eq!(pair.client_scene.node_count(), before);
}

#[test]
fn player_toggles_between_root_and_world() {
    let mut host_scene = ArenaScene::with_level(demo_library(), LEVEL_PATH).unwrap();
    let root = host_scene.root();
    let player = host_scene.spawn_template(root, PLAYER_PATH, "1").unwrap();
    let world = host_scene.find(root, "World").unwrap();

    let client_scene = ArenaScene::with_level(demo_library(), LEVEL_PATH).unwrap();
    let mut pair = PeerPair::new(host_scene, client_scene);
    pair.connect();
    let client_root = pair.client_root();
    assert_node_at!(pair.client_scene, client_root, "1/Hitbox");

    pair.host.reparent_node(&mut pair.host_scene, player, world);
    pair.exchange();
    assert_node_at!(pair.client_scene, client_root, "World/1/Hitbox");
    assert_no_node_at!(pair.client_scene, client_root, "1");
    let moved = pair.client_scene.find(client_root, "World/1/Hitbox").unwrap();
    assert_eq!(pair.client_scene.authority(moved), 1);

    pair.host.reparent_node(&mut pair.host_scene, player, root);
    pair.exchange();
    assert_node_at!(pair.client_scene, client_root, "1/Hitbox");
    assert_no_node_at!(pair.client_scene, client_root, "World/1");
}
