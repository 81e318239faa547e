/// A node with an unknown collision shape is dropped on its own; the rest
/// of the batch still applies.

use canopy::{transport::Transport, RemoteCall, ReplicationFailureEvent};
use canopy_demo_scene::{demo_library, ArenaScene, LEVEL_PATH};
use canopy_shared::{ReplicationError, SceneRef};
use canopy_test::{assert_no_node_at, assert_node_at, PeerPair};

fn level() -> ArenaScene {
    ArenaScene::with_level(demo_library(), LEVEL_PATH).unwrap()
}

#[test]
fn unknown_shape_does_not_abort_later_nodes() {
    let mut pair = PeerPair::new(level(), level());
    pair.connect();
    let client_peer = pair.client.local_peer_id().unwrap();

    let mut raw = pair.raw_peer();
    pair.exchange();
    let raw_peer = raw.local_peer_id();

    let payload = concat!(
        "{\"Nodes\":[",
        "{\"Name\":\"First\",\"Node\":{\"DT\":\"Node2D\"},\"Data\":{\"Pos\":[1.0,2.0]}},",
        "{\"Name\":\"Bad\",\"Node\":{\"DT\":\"CollisionShape2D\"},\"Data\":{\"SHP\":\"Hexagon\"}},",
        "{\"Name\":\"Last\",\"Node\":{\"DT\":\"Node2D\"}}",
        "]}"
    );
    raw.send(client_peer, &RemoteCall::new("HandleAddEverything", payload))
        .unwrap();

    let (_, mut client_events) = pair.exchange();

    let root = pair.client_root();
    assert_node_at!(pair.client_scene, root, "First");
    assert_node_at!(pair.client_scene, root, "Last");
    assert_no_node_at!(pair.client_scene, root, "Bad");

    let failures: Vec<_> = client_events.read::<ReplicationFailureEvent>().collect();
    assert_eq!(failures.len(), 1);
    let (from, failure) = &failures[0];
    assert_eq!(*from, raw_peer);
    assert_eq!(failure.name, "Bad");
    assert_eq!(
        failure.error,
        ReplicationError::UnknownShape {
            token: "Hexagon".to_string(),
            node: "Bad".to_string()
        }
    );
}

#[test]
fn shape_meant_for_the_other_dimension_is_unknown() {
    let mut pair = PeerPair::new(level(), level());
    pair.connect();
    let client_peer = pair.client.local_peer_id().unwrap();
    let mut raw = pair.raw_peer();
    pair.exchange();

    let payload = "{\"Name\":\"Ball\",\"Node\":{\"DT\":\"CollisionShape2D\"},\"Data\":{\"SHP\":\"Sphere\",\"Rad\":2.0},\"Parent\":\"Game\"}";
    raw.send(client_peer, &RemoteCall::new("HandleAddNode", payload))
        .unwrap();
    let (_, mut client_events) = pair.exchange();

    assert_no_node_at!(pair.client_scene, pair.client_root(), "Ball");
    assert!(client_events.has::<ReplicationFailureEvent>());
}
