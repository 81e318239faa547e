/// A newly connected peer receives one snapshot holding every replicated
/// child of the host's root, and rebuilds it.

use canopy::{ConnectEvent, NetworkMessage, HOST_PEER_ID};
use canopy_demo_scene::ArenaScene;
use canopy_shared::{keys, ApplyReport, Provenance, SceneRef, Vector2};
use canopy_test::{
    assert_node_at, calls_named, drain_calls, node_2d_at, snapshot_library, PeerPair, OBJ_PATH,
};

fn host_scene() -> ArenaScene {
    let mut scene = ArenaScene::new("Root", snapshot_library());
    let root = scene.root();
    node_2d_at(&mut scene, root, "1", 10.0, 20.0);
    scene.spawn_template(root, OBJ_PATH, "Obj").unwrap();
    scene
}

#[test]
fn snapshot_holds_exactly_the_top_level_nodes() {
    let mut pair = PeerPair::new(host_scene(), ArenaScene::new("Root", snapshot_library()));
    let mut raw = pair.raw_peer();
    pair.exchange();

    let calls = drain_calls(raw.as_mut());
    let snapshots = calls_named(&calls, "HandleAddEverything");
    assert_eq!(snapshots.len(), 1);

    let message = NetworkMessage::from_call(&snapshots[0], &mut ApplyReport::new()).unwrap();
    let NetworkMessage::AddEverything { nodes } = message else {
        panic!("expected a snapshot");
    };

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].name, "1");
    assert!(matches!(nodes[0].provenance, Provenance::FreeForm { .. }));
    assert_eq!(
        nodes[0].state.as_ref().unwrap()[keys::POSITION].as_vector2(),
        Vector2::new(10.0, 20.0)
    );
    assert_eq!(nodes[1].name, "Obj");
    assert_eq!(
        nodes[1].provenance,
        Provenance::Template {
            path: OBJ_PATH.to_string()
        }
    );
}

#[test]
fn snapshot_goes_only_to_the_new_peer() {
    let mut pair = PeerPair::new(host_scene(), ArenaScene::new("Root", snapshot_library()));
    pair.connect();

    let mut raw = pair.raw_peer();
    pair.exchange();
    assert_eq!(calls_named(&drain_calls(raw.as_mut()), "HandleAddEverything").len(), 1);

    // the client already has everything and must not rebuild it twice
    let root = pair.client_root();
    assert_eq!(pair.client_scene.children(root).len(), 2);
}

#[test]
fn client_rebuilds_the_snapshot() {
    let mut pair = PeerPair::new(host_scene(), ArenaScene::new("Root", snapshot_library()));
    pair.client.connect(pair.hub.socket()).unwrap();
    let (mut host_events, mut client_events) = pair.exchange();

    assert_eq!(host_events.read::<ConnectEvent>().collect::<Vec<_>>(), vec![2]);
    assert_eq!(
        client_events.read::<ConnectEvent>().collect::<Vec<_>>(),
        vec![HOST_PEER_ID]
    );

    let scene = &pair.client_scene;
    let root = scene.root();
    assert_node_at!(scene, root, "Obj/Body");

    let one = scene.find(root, "1").unwrap();
    assert_eq!(scene.node_2d(one).unwrap().position, Vector2::new(10.0, 20.0));
    assert_eq!(scene.authority(one), HOST_PEER_ID);

    let obj = scene.find(root, "Obj").unwrap();
    assert_eq!(scene.template_path(obj), Some(OBJ_PATH));
}
