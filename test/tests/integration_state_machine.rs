/// Network state transitions and the update tick.

use std::time::Duration;

use canopy::{
    ConnectEvent, DisconnectEvent, ErrorEvent, Network, NetworkConfig, NetworkState,
    NetworkUpdateEvent,
};
use canopy_demo_scene::{demo_library, ArenaScene, LEVEL_PATH};
use canopy_shared::SceneRef;
use canopy_test::{init_logging, PeerPair};

fn level() -> ArenaScene {
    ArenaScene::with_level(demo_library(), LEVEL_PATH).unwrap()
}

#[test]
fn host_and_client_transitions() {
    let mut pair = PeerPair::new(level(), level());
    assert_eq!(pair.host.state(), NetworkState::Host);
    assert_eq!(pair.host.local_peer_id(), Some(1));
    assert_eq!(pair.client.state(), NetworkState::Inactive);

    pair.connect();
    assert_eq!(pair.client.state(), NetworkState::Client);
    assert_eq!(pair.host.peers(), vec![2]);

    pair.client.disconnect().unwrap();
    let (mut host_events, _) = pair.exchange();
    assert_eq!(host_events.read::<DisconnectEvent>().collect::<Vec<_>>(), vec![2]);
    assert!(pair.host.peers().is_empty());
    assert!(pair.host.is_host());
}

#[test]
fn clients_learn_about_each_other() {
    let mut pair = PeerPair::new(level(), level());
    pair.connect();

    let mut second = Network::new(NetworkConfig::default());
    second.connect(pair.hub.socket()).unwrap();
    let mut second_scene = level();

    let (_, mut client_events) = pair.exchange();
    let mut second_events = second.receive(&mut second_scene, Duration::ZERO);

    assert_eq!(client_events.read::<ConnectEvent>().collect::<Vec<_>>(), vec![3]);
    let mut seen: Vec<_> = second_events.read::<ConnectEvent>().collect();
    seen.sort();
    assert_eq!(seen, vec![1, 2]);
}

#[test]
fn update_events_tick_at_the_configured_rate() {
    init_logging();
    let hub = canopy::transport::local::LocalHub::new();
    let mut scene = level();
    let mut network = Network::new(NetworkConfig {
        update_rate: 20,
        ..Default::default()
    });

    let idle = network.receive(&mut scene, Duration::from_millis(50));
    assert!(!idle.has::<NetworkUpdateEvent>());

    network.listen(hub.socket()).unwrap();
    let mut ticks = Vec::new();
    for _ in 0..4 {
        let mut events = network.receive(&mut scene, Duration::from_millis(25));
        ticks.extend(events.read::<NetworkUpdateEvent>());
    }
    assert_eq!(ticks, vec![0, 1]);
}

#[test]
fn inactive_network_edits_only_the_local_tree() {
    init_logging();
    let mut scene = level();
    let root = scene.root();
    let mut network = Network::new(NetworkConfig::default());

    let node = scene.spawn(root, "Loose", "Node2D").unwrap();
    let target = scene.find(root, "Spawn").unwrap();
    network.reparent_node(&mut scene, node, target);

    let events = network.receive(&mut scene, Duration::ZERO);
    assert!(!events.has::<ErrorEvent>());
    assert!(events.is_empty());
    assert!(scene.find(root, "Spawn/Loose").is_some());
}
