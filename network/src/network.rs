use std::{mem, time::Duration};

use log::{debug, info, warn};

use canopy_shared::{
    apply_all, apply_descriptor, assign_authority, collect_added, collect_everything,
    ApplyReport, NetworkState, NodeAddress, PeerId, ReplicationError, SceneMut, Timer, TimerMode,
    HOST_PEER_ID,
};

use crate::{
    error::NetworkError,
    events::NetworkEvents,
    messages::{NetworkMessage, RemoteCall},
    network_config::NetworkConfig,
    roster::Roster,
    transport::{Socket, Transport, TransportEvent},
};

/// Host-authoritative replication of a scene tree.
///
/// Local edits go through [`Network::add_node`], [`Network::remove_node`]
/// and [`Network::reparent_node`], which mutate the scene and broadcast the
/// change. [`Network::receive`] drains the transport and applies what other
/// peers sent.
pub struct Network {
    config: NetworkConfig,
    roster: Roster,
    transport: Option<Box<dyn Transport>>,
    update_timer: Timer,
    update_tick: u64,
    events: NetworkEvents,
}

impl Network {
    /// Create a new, inactive Network
    pub fn new(config: NetworkConfig) -> Self {
        let update_timer = Timer::new(config.update_interval(), TimerMode::Loop);
        Self {
            config,
            roster: Roster::new(),
            transport: None,
            update_timer,
            update_tick: 0,
            events: NetworkEvents::new(),
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Starts hosting a session. On failure the network stays inactive.
    pub fn listen<S: Into<Box<dyn Socket>>>(&mut self, socket: S) -> Result<(), NetworkError> {
        self.check_inactive()?;
        let transport = socket.into().listen()?;
        info!("Hosting as peer {}", transport.local_peer_id());
        self.activate(NetworkState::Host, transport);
        Ok(())
    }

    /// Joins a hosted session. On failure the network stays inactive.
    pub fn connect<S: Into<Box<dyn Socket>>>(&mut self, socket: S) -> Result<(), NetworkError> {
        self.check_inactive()?;
        let transport = socket.into().connect()?;
        info!("Joined as peer {}", transport.local_peer_id());
        self.activate(NetworkState::Client, transport);
        Ok(())
    }

    /// Leaves the session and drops the transport
    pub fn disconnect(&mut self) -> Result<(), NetworkError> {
        if !self.is_active() {
            return Err(NetworkError::NotActive);
        }
        info!("Leaving session");
        self.deactivate();
        Ok(())
    }

    pub fn state(&self) -> NetworkState {
        self.roster.state()
    }

    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    pub fn is_host(&self) -> bool {
        self.state() == NetworkState::Host
    }

    pub fn is_client(&self) -> bool {
        self.state() == NetworkState::Client
    }

    /// Identifier of this peer, `None` while inactive
    pub fn local_peer_id(&self) -> Option<PeerId> {
        self.roster.local_peer()
    }

    /// Connected remote peers
    pub fn peers(&self) -> Vec<PeerId> {
        self.roster.peers().collect()
    }

    // Local operations

    /// Attaches `node` under `parent`, assigns its authority and tells every
    /// other peer about it. Errors are reported as `ErrorEvent`.
    pub fn add_node<S: SceneMut>(&mut self, scene: &mut S, node: S::Node, parent: S::Node) {
        if let Err(error) = self.try_add_node(scene, node, parent) {
            self.report(error);
        }
    }

    pub fn try_add_node<S: SceneMut>(
        &mut self,
        scene: &mut S,
        node: S::Node,
        parent: S::Node,
    ) -> Result<(), NetworkError> {
        scene.add_child(parent, node);
        assign_authority(scene, node);

        let Some(descriptor) = collect_added(scene, node) else {
            debug!("Node '{}' is not replicated", scene.name(node));
            return Ok(());
        };
        self.broadcast(&NetworkMessage::AddNode {
            parent: NodeAddress::of(scene, parent),
            node: descriptor,
        })
    }

    /// Schedules `node` for destruction here and on every other peer.
    /// Errors are reported as `ErrorEvent`.
    pub fn remove_node<S: SceneMut>(&mut self, scene: &mut S, node: S::Node) {
        if let Err(error) = self.try_remove_node(scene, node) {
            self.report(error);
        }
    }

    pub fn try_remove_node<S: SceneMut>(
        &mut self,
        scene: &mut S,
        node: S::Node,
    ) -> Result<(), NetworkError> {
        let address = NodeAddress::of(scene, node);
        scene.queue_free(node);
        self.broadcast(&NetworkMessage::RemoveNode { node: address })
    }

    /// Moves `node` under `new_parent` here and on every other peer.
    /// Errors are reported as `ErrorEvent`.
    pub fn reparent_node<S: SceneMut>(&mut self, scene: &mut S, node: S::Node, new_parent: S::Node) {
        if let Err(error) = self.try_reparent_node(scene, node, new_parent) {
            self.report(error);
        }
    }

    pub fn try_reparent_node<S: SceneMut>(
        &mut self,
        scene: &mut S,
        node: S::Node,
        new_parent: S::Node,
    ) -> Result<(), NetworkError> {
        check_reparent(scene, node, new_parent)?;
        let address = NodeAddress::of(scene, node);
        let parent = NodeAddress::of(scene, new_parent);
        scene.reparent(node, new_parent);
        assign_authority(scene, node);
        self.broadcast(&NetworkMessage::ReparentNode {
            node: address,
            parent,
        })
    }

    // Receiving

    /// Advances the update timer by `delta`, then drains and applies
    /// everything the transport received. Returns the events gathered since
    /// the previous call.
    pub fn receive<S: SceneMut>(&mut self, scene: &mut S, delta: Duration) -> NetworkEvents {
        if self.update_timer.update(delta) {
            self.events.push_update(self.update_tick);
            self.update_tick += 1;
        }

        for event in self.drain_transport() {
            match event {
                TransportEvent::Connected(peer) => self.on_connect(scene, peer),
                TransportEvent::Disconnected(peer) => self.on_disconnect(peer),
                TransportEvent::Call { from, call } => self.on_call(scene, from, &call),
            }
        }

        mem::take(&mut self.events)
    }

    fn drain_transport(&mut self) -> Vec<TransportEvent> {
        let mut received = Vec::new();
        let Some(transport) = self.transport.as_mut() else {
            return received;
        };
        loop {
            match transport.receive() {
                Ok(Some(event)) => received.push(event),
                Ok(None) => break,
                Err(error) => {
                    warn!("Transport receive failed: {}", error);
                    self.events.push_error(error.into());
                    break;
                }
            }
        }
        received
    }

    fn on_connect<S: SceneMut>(&mut self, scene: &mut S, peer: PeerId) {
        if !self.roster.insert(peer) {
            debug!("Peer {} was already connected", peer);
        }
        info!("Peer {} connected", peer);

        if self.is_host() {
            let snapshot = NetworkMessage::AddEverything {
                nodes: collect_everything(scene),
            };
            if let Err(error) = self.send(peer, &snapshot) {
                self.report(error);
            }
        }

        self.events.push_connection(peer);
    }

    fn on_disconnect(&mut self, peer: PeerId) {
        self.roster.remove(peer);
        info!("Peer {} disconnected", peer);

        if self.is_client() && peer == HOST_PEER_ID {
            info!("Host left the session");
            self.deactivate();
        }

        self.events.push_disconnection(peer);
    }

    fn on_call<S: SceneMut>(&mut self, scene: &mut S, from: PeerId, call: &RemoteCall) {
        let mut report = ApplyReport::new();
        let result = NetworkMessage::from_call(call, &mut report)
            .and_then(|message| apply_message(scene, message, &mut report));
        if let Err(error) = result {
            warn!("Dropping {} from peer {}: {}", call.method, from, error);
            self.events.push_error(error);
        }

        for failure in report.into_failures() {
            warn!("Peer {} sent node '{}' that failed: {}", from, failure.name, failure.error);
            self.events.push_failure(from, failure);
        }
    }

    // Private

    fn check_inactive(&self) -> Result<(), NetworkError> {
        if self.is_active() {
            return Err(NetworkError::AlreadyActive {
                state: self.state(),
            });
        }
        Ok(())
    }

    fn activate(&mut self, state: NetworkState, transport: Box<dyn Transport>) {
        self.roster.activate(state, transport.local_peer_id());
        self.transport = Some(transport);
        self.update_timer = Timer::looping(self.config.update_interval());
        self.update_tick = 0;
    }

    fn deactivate(&mut self) {
        self.transport = None;
        self.roster.deactivate();
        self.update_timer.stop();
    }

    fn report(&mut self, error: NetworkError) {
        warn!("{}", error);
        self.events.push_error(error);
    }

    fn send(&mut self, peer: PeerId, message: &NetworkMessage) -> Result<(), NetworkError> {
        let Some(transport) = self.transport.as_mut() else {
            return Err(NetworkError::NotActive);
        };
        transport.send(peer, &message.to_call())?;
        Ok(())
    }

    /// Inactive networks only edit the local tree
    fn broadcast(&mut self, message: &NetworkMessage) -> Result<(), NetworkError> {
        let Some(transport) = self.transport.as_mut() else {
            return Ok(());
        };
        transport.broadcast(&message.to_call())?;
        Ok(())
    }
}

fn apply_message<S: SceneMut>(
    scene: &mut S,
    message: NetworkMessage,
    report: &mut ApplyReport,
) -> Result<(), NetworkError> {
    match message {
        NetworkMessage::AddEverything { nodes } => {
            let root = scene.root();
            for node in apply_all(scene, Some(root), root, &nodes, true, report) {
                assign_authority(scene, node);
            }
        }
        NetworkMessage::AddNode { parent, node } => {
            let parent = resolve(scene, &parent)?;
            if let Some(built) = apply_descriptor(scene, None, parent, &node, false, report) {
                scene.add_child(parent, built);
                assign_authority(scene, built);
            }
        }
        NetworkMessage::RemoveNode { node } => {
            let node = resolve(scene, &node)?;
            scene.queue_free(node);
        }
        NetworkMessage::ReparentNode { node, parent } => {
            let node = resolve(scene, &node)?;
            let parent = resolve(scene, &parent)?;
            check_reparent(scene, node, parent)?;
            scene.reparent(node, parent);
            assign_authority(scene, node);
        }
    }
    Ok(())
}

fn resolve<S: SceneMut>(scene: &S, address: &NodeAddress) -> Result<S::Node, ReplicationError> {
    address
        .resolve(scene)
        .ok_or_else(|| ReplicationError::UnresolvedAddress {
            address: address.to_string(),
        })
}

/// Refuses moves that would put a node under itself and cycle the tree
fn check_reparent<S: SceneMut>(
    scene: &S,
    node: S::Node,
    new_parent: S::Node,
) -> Result<(), ReplicationError> {
    if scene.is_ancestor_of(node, new_parent) {
        return Err(ReplicationError::InvalidReparent {
            node: NodeAddress::of(scene, node).to_string(),
            parent: NodeAddress::of(scene, new_parent).to_string(),
        });
    }
    Ok(())
}
