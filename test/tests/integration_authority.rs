/// Authority follows the nearest controlling player above a node and falls
/// back to the host.

use canopy_demo_scene::{demo_library, ArenaScene, CRATE_PATH, LEVEL_PATH, PLAYER_PATH};
use canopy_shared::{controlling_player, resolve_authority, SceneRef, HOST_PEER_ID};
use canopy_test::PeerPair;

fn level() -> ArenaScene {
    ArenaScene::with_level(demo_library(), LEVEL_PATH).unwrap()
}

#[test]
fn resolves_through_a_player_ancestor() {
    let mut scene = level();
    let root = scene.root();
    let player = scene.spawn_template(root, PLAYER_PATH, "7").unwrap();
    let hitbox = scene.find(player, "Hitbox").unwrap();
    let floor = scene.find(root, "World/Floor").unwrap();

    assert_eq!(resolve_authority(&scene, hitbox), 7);
    assert_eq!(controlling_player(&scene, hitbox), Some((player, 7)));
    assert_eq!(resolve_authority(&scene, floor), HOST_PEER_ID);
}

#[test]
fn player_named_after_nothing_is_not_controlling() {
    let mut scene = level();
    let root = scene.root();
    let player = scene.spawn_template(root, PLAYER_PATH, "Bob").unwrap();
    assert_eq!(resolve_authority(&scene, player), HOST_PEER_ID);
}

#[test]
fn replicated_nodes_carry_authority_on_both_peers() {
    let mut host = level();
    let root = host.root();
    let player = host.spawn_template(root, PLAYER_PATH, "2").unwrap();
    let crate_node = host.spawn_template(root, CRATE_PATH, "Crate").unwrap();

    let mut pair = PeerPair::new(host, level());
    pair.connect();

    let client_root = pair.client_root();
    let hitbox = pair.client_scene.find(client_root, "2/Hitbox").unwrap();
    assert_eq!(pair.client_scene.authority(hitbox), 2);

    pair.host.reparent_node(&mut pair.host_scene, crate_node, player);
    assert_eq!(pair.host_scene.authority(crate_node), 2);

    pair.exchange();
    let moved = pair.client_scene.find(client_root, "2/Crate").unwrap();
    assert_eq!(pair.client_scene.authority(moved), 2);
    let shape = pair.client_scene.find(moved, "Shape").unwrap();
    assert_eq!(pair.client_scene.authority(shape), 2);
}
