use std::time::Duration;

use canopy::{
    transport::{local::LocalHub, Socket, Transport},
    Network, NetworkConfig, NetworkEvents,
};
use canopy_demo_scene::{ArenaScene, NodeId};
use canopy_shared::SceneRef;
use log::debug;

pub fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// A host and one client sharing a `LocalHub`, each with its own scene
pub struct PeerPair {
    pub hub: LocalHub,
    pub host: Network,
    pub host_scene: ArenaScene,
    pub client: Network,
    pub client_scene: ArenaScene,
}

impl PeerPair {
    /// Starts the host. The client stays inactive until `connect`.
    pub fn new(host_scene: ArenaScene, client_scene: ArenaScene) -> Self {
        init_logging();
        let hub = LocalHub::new();
        let mut host = Network::new(NetworkConfig::default());
        if let Err(error) = host.listen(hub.socket()) {
            panic!("local host failed to listen: {}", error);
        }
        Self {
            hub,
            host,
            host_scene,
            client: Network::new(NetworkConfig::default()),
            client_scene,
        }
    }

    /// Connects the client and lets the snapshot arrive
    pub fn connect(&mut self) {
        if let Err(error) = self.client.connect(self.hub.socket()) {
            panic!("local client failed to connect: {}", error);
        }
        debug!("Client joined as peer {:?}", self.client.local_peer_id());
        self.exchange();
    }

    /// One receive on each side, host first
    pub fn exchange(&mut self) -> (NetworkEvents, NetworkEvents) {
        self.tick(Duration::ZERO)
    }

    pub fn tick(&mut self, delta: Duration) -> (NetworkEvents, NetworkEvents) {
        let host_events = self.host.receive(&mut self.host_scene, delta);
        let client_events = self.client.receive(&mut self.client_scene, delta);
        (host_events, client_events)
    }

    /// A bare transport joined to the same hub, for sending or capturing
    /// raw calls
    pub fn raw_peer(&self) -> Box<dyn Transport> {
        match Box::new(self.hub.socket()).connect() {
            Ok(transport) => transport,
            Err(error) => panic!("raw peer failed to connect: {}", error),
        }
    }

    pub fn host_root(&self) -> NodeId {
        self.host_scene.root()
    }

    pub fn client_root(&self) -> NodeId {
        self.client_scene.root()
    }
}
