use std::time::Duration;

use log::{debug, info, warn};

use canopy::{
    transport::tcp::TcpSocket, ConnectEvent, DisconnectEvent, ErrorEvent, Network, NetworkConfig,
    NetworkError, NetworkUpdateEvent, ReplicationFailureEvent, HOST_PEER_ID,
};
use canopy_demo_scene::{demo_library, ArenaScene, LEVEL_PATH, PLAYER_PATH};
use canopy_shared::{PeerId, ReplicationError, SceneMut, SceneRef};

/// Update ticks between moves of the host's player
const REPARENT_EVERY: u64 = 40;

pub struct App {
    network: Network,
    scene: ArenaScene,
}

impl App {
    pub fn new(host: bool) -> Result<Self, NetworkError> {
        let config = NetworkConfig::default();
        let socket = TcpSocket::from_config(&config);
        let scene =
            ArenaScene::with_level(demo_library(), LEVEL_PATH).map_err(ReplicationError::from)?;
        let mut network = Network::new(config);

        if !host {
            info!("Canopy basic demo joining");
            network.connect(socket)?;
            return Ok(App { network, scene });
        }

        info!("Canopy basic demo hosting");
        network.listen(socket)?;
        let mut app = App { network, scene };
        app.spawn_player(HOST_PEER_ID);
        Ok(app)
    }

    pub fn is_running(&self) -> bool {
        self.network.is_active()
    }

    pub fn outline(&self) -> String {
        self.scene.outline(self.scene.root())
    }

    pub fn update(&mut self, delta: Duration) {
        let mut events = self.network.receive(&mut self.scene, delta);

        for peer in events.read::<ConnectEvent>() {
            info!("Peer {} connected", peer);
            if self.network.is_host() {
                self.spawn_player(peer);
            }
        }
        for peer in events.read::<DisconnectEvent>() {
            info!("Peer {} disconnected", peer);
            if self.network.is_host() {
                self.despawn_player(peer);
            }
        }
        for error in events.read::<ErrorEvent>() {
            warn!("Network error: {}", error);
        }
        for (peer, failure) in events.read::<ReplicationFailureEvent>() {
            warn!("Node '{}' from peer {} dropped: {}", failure.name, peer, failure.error);
        }
        for tick in events.read::<NetworkUpdateEvent>() {
            if tick % 100 == 0 {
                info!("Tick {}: {} nodes", tick, self.scene.node_count());
            }
            if self.network.is_host() && tick > 0 && tick % REPARENT_EVERY == 0 {
                self.move_host_player();
            }
        }

        self.scene.flush_freed();
    }

    fn spawn_player(&mut self, peer: PeerId) {
        let root = self.scene.root();
        let player = match self.scene.instantiate_template(PLAYER_PATH) {
            Ok(player) => player,
            Err(err) => {
                warn!("Cannot spawn player {}: {}", peer, err);
                return;
            }
        };
        self.scene.set_name(player, &peer.to_string());
        self.network.add_node(&mut self.scene, player, root);
        info!("Spawned player {}", peer);
    }

    fn despawn_player(&mut self, peer: PeerId) {
        let root = self.scene.root();
        if let Some(player) = self.scene.child_by_name(root, &peer.to_string()) {
            self.network.remove_node(&mut self.scene, player);
        }
    }

    /// Toggles the host's player between the level root and `World`
    fn move_host_player(&mut self) {
        let root = self.scene.root();
        let Some(world) = self.scene.child_by_name(root, "World") else {
            return;
        };
        let name = HOST_PEER_ID.to_string();
        let (player, target) = match self.scene.child_by_name(root, &name) {
            Some(player) => (player, world),
            None => match self.scene.child_by_name(world, &name) {
                Some(player) => (player, root),
                None => return,
            },
        };
        self.network.reparent_node(&mut self.scene, player, target);
        debug!("Moved player {} under '{}'", name, self.scene.name(target));
    }
}
