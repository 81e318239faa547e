use std::collections::BTreeSet;

use canopy_shared::{NetworkState, PeerId};

/// Who this peer is and who else is in the session
#[derive(Debug, Default)]
pub struct Roster {
    state: NetworkState,
    local_peer: Option<PeerId>,
    peers: BTreeSet<PeerId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NetworkState {
        self.state
    }

    pub fn local_peer(&self) -> Option<PeerId> {
        self.local_peer
    }

    pub fn activate(&mut self, state: NetworkState, local_peer: PeerId) {
        self.state = state;
        self.local_peer = Some(local_peer);
        self.peers.clear();
    }

    pub fn deactivate(&mut self) {
        self.state = NetworkState::Inactive;
        self.local_peer = None;
        self.peers.clear();
    }

    /// Returns false if the peer was already known
    pub fn insert(&mut self, peer: PeerId) -> bool {
        self.peers.insert(peer)
    }

    pub fn remove(&mut self, peer: PeerId) -> bool {
        self.peers.remove(&peer)
    }

    /// Remote peers, in id order
    pub fn peers(&self) -> impl Iterator<Item = PeerId> + '_ {
        self.peers.iter().copied()
    }
}
