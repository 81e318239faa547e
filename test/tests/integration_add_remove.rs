/// Runtime adds and removals, including idempotent attach and removal by
/// address.

use canopy::{transport::Transport, NetworkMessage};
use canopy_demo_scene::{demo_library, ArenaScene, CRATE_PATH, LEVEL_PATH, PLAYER_PATH};
use canopy_shared::{NodeAddress, NodeDescriptor, Provenance, SceneMut, SceneRef};
use canopy_test::{assert_no_node_at, assert_node_at, exchange_n_times, PeerPair};

fn level() -> ArenaScene {
    ArenaScene::with_level(demo_library(), LEVEL_PATH).unwrap()
}

#[test]
fn added_template_is_rebuilt_from_its_path() {
    let mut pair = PeerPair::new(level(), level());
    pair.connect();

    let root = pair.host_root();
    let player = pair.host_scene.instantiate_template(PLAYER_PATH).unwrap();
    pair.host_scene.set_name(player, "2");
    pair.host.add_node(&mut pair.host_scene, player, root);
    pair.exchange();

    let scene = &pair.client_scene;
    let client_root = scene.root();
    let remote = scene.find(client_root, "2").unwrap();
    assert_eq!(scene.template_path(remote), Some(PLAYER_PATH));
    assert_node_at!(scene, client_root, "2/Hitbox");
    assert_node_at!(scene, client_root, "2/Sprite");
}

#[test]
fn added_free_form_subtree_is_rebuilt() {
    let mut pair = PeerPair::new(level(), level());
    pair.connect();

    let root = pair.host_root();
    let holder = pair.host_scene.create_node("Node2D").unwrap();
    pair.host_scene.set_name(holder, "Holder");
    pair.host_scene.spawn(holder, "Inner", "Sprite2D").unwrap();
    pair.host.add_node(&mut pair.host_scene, holder, root);
    pair.exchange();

    let client_root = pair.client_root();
    assert_node_at!(pair.client_scene, client_root, "Holder/Inner");
    let inner = pair.client_scene.find(client_root, "Holder/Inner").unwrap();
    assert_eq!(pair.client_scene.kind(inner).base, "Sprite2D");
}

#[test]
fn attaching_the_same_descriptor_twice_keeps_one_child() {
    let mut pair = PeerPair::new(level(), level());
    pair.connect();

    let mut raw = pair.raw_peer();
    pair.exchange();

    let call = NetworkMessage::AddNode {
        parent: NodeAddress::parse("Game"),
        node: NodeDescriptor::new(
            "5",
            Provenance::Template {
                path: CRATE_PATH.to_string(),
            },
        ),
    }
    .to_call();
    raw.broadcast(&call).unwrap();
    raw.broadcast(&call).unwrap();
    pair.exchange();

    for scene in [&pair.host_scene, &pair.client_scene] {
        let root = scene.root();
        let names: Vec<&str> = scene
            .children(root)
            .into_iter()
            .map(|child| scene.name(child))
            .filter(|name| name.starts_with('5'))
            .collect();
        assert_eq!(names, vec!["5"]);
    }
}

#[test]
fn removal_by_address_deletes_exactly_that_node() {
    let mut host = level();
    let root = host.root();
    let a = host.spawn(root, "A", "Node2D").unwrap();
    let b = host.spawn(a, "B", "Node2D").unwrap();
    let c = host.spawn(b, "C", "Node2D").unwrap();
    host.spawn(b, "D", "Node2D").unwrap();

    let mut pair = PeerPair::new(host, level());
    pair.connect();
    let client_root = pair.client_root();
    assert_node_at!(pair.client_scene, client_root, "A/B/C");
    let before = pair.client_scene.node_count();

    pair.host.remove_node(&mut pair.host_scene, c);
    exchange_n_times(&mut pair, 2);

    assert_node_at!(pair.client_scene, client_root, "A/B");
    assert_no_node_at!(pair.client_scene, client_root, "A/B/C");
    assert_node_at!(pair.client_scene, client_root, "A/B/D");
    assert_eq!(pair.client_scene.flush_freed(), 1);
    assert_eq!(pair.client_scene.node_count(), before - 1);
    assert_node_at!(pair.client_scene, client_root, "A/B/D");
    assert_node_at!(pair.host_scene, pair.host_root(), "A/B/D");
}

#[test]
fn removed_player_disappears_on_the_other_peer() {
    let mut host = level();
    let root = host.root();
    let player = host.spawn_template(root, PLAYER_PATH, "2").unwrap();

    let mut pair = PeerPair::new(host, level());
    pair.connect();
    let client_root = pair.client_root();
    assert_node_at!(pair.client_scene, client_root, "2/Hitbox");

    pair.host.remove_node(&mut pair.host_scene, player);
    pair.exchange();

    assert_no_node_at!(pair.client_scene, client_root, "2");
    assert_no_node_at!(pair.host_scene, root, "2");
}
