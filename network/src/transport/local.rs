//! In-memory transport: every peer of a `LocalHub` lives in the same
//! process and calls are queued straight into the receiver's inbox.

use std::{
    cell::RefCell,
    collections::{BTreeMap, VecDeque},
    rc::Rc,
};

use log::debug;

use canopy_shared::{PeerId, HOST_PEER_ID};

use crate::{
    error::TransportError,
    messages::RemoteCall,
    transport::{Socket, Transport, TransportEvent},
};

const HUB_ADDRESS: &str = "local-hub";

struct HubState {
    host_listening: bool,
    next_peer_id: PeerId,
    inboxes: BTreeMap<PeerId, VecDeque<TransportEvent>>,
}

impl HubState {
    fn join(&mut self, peer: PeerId) {
        let existing: Vec<PeerId> = self.inboxes.keys().copied().collect();
        let mut inbox = VecDeque::new();
        for other in existing {
            inbox.push_back(TransportEvent::Connected(other));
            if let Some(other_inbox) = self.inboxes.get_mut(&other) {
                other_inbox.push_back(TransportEvent::Connected(peer));
            }
        }
        self.inboxes.insert(peer, inbox);
    }

    fn leave(&mut self, peer: PeerId) {
        if self.inboxes.remove(&peer).is_none() {
            return;
        }
        if peer == HOST_PEER_ID {
            self.host_listening = false;
        }
        for inbox in self.inboxes.values_mut() {
            inbox.push_back(TransportEvent::Disconnected(peer));
        }
    }
}

/// Shared in-memory switchboard. Clones refer to the same hub.
#[derive(Clone)]
pub struct LocalHub {
    state: Rc<RefCell<HubState>>,
}

impl Default for LocalHub {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(HubState {
                host_listening: false,
                next_peer_id: HOST_PEER_ID + 1,
                inboxes: BTreeMap::new(),
            })),
        }
    }
}

impl LocalHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn socket(&self) -> LocalSocket {
        LocalSocket { hub: self.clone() }
    }

    /// Drops a peer as if its connection was lost
    pub fn disconnect(&self, peer: PeerId) {
        self.state.borrow_mut().leave(peer);
    }

    pub fn peer_count(&self) -> usize {
        self.state.borrow().inboxes.len()
    }
}

pub struct LocalSocket {
    hub: LocalHub,
}

impl From<LocalSocket> for Box<dyn Socket> {
    fn from(socket: LocalSocket) -> Self {
        Box::new(socket)
    }
}

impl Socket for LocalSocket {
    fn listen(self: Box<Self>) -> Result<Box<dyn Transport>, TransportError> {
        let mut state = self.hub.state.borrow_mut();
        if state.host_listening {
            return Err(TransportError::Bind {
                address: HUB_ADDRESS.to_string(),
                reason: "a host is already listening".to_string(),
            });
        }
        state.host_listening = true;
        state.join(HOST_PEER_ID);
        drop(state);

        debug!("Local host listening");
        Ok(Box::new(LocalTransport {
            hub: self.hub.clone(),
            peer: HOST_PEER_ID,
        }))
    }

    fn connect(self: Box<Self>) -> Result<Box<dyn Transport>, TransportError> {
        let mut state = self.hub.state.borrow_mut();
        if !state.host_listening {
            return Err(TransportError::Connect {
                address: HUB_ADDRESS.to_string(),
                reason: "no host is listening".to_string(),
            });
        }
        let peer = state.next_peer_id;
        state.next_peer_id += 1;
        state.join(peer);
        drop(state);

        debug!("Local peer {} connected", peer);
        Ok(Box::new(LocalTransport {
            hub: self.hub.clone(),
            peer,
        }))
    }
}

pub struct LocalTransport {
    hub: LocalHub,
    peer: PeerId,
}

impl Transport for LocalTransport {
    fn local_peer_id(&self) -> PeerId {
        self.peer
    }

    fn send(&mut self, peer: PeerId, call: &RemoteCall) -> Result<(), TransportError> {
        let mut state = self.hub.state.borrow_mut();
        let inbox = state
            .inboxes
            .get_mut(&peer)
            .ok_or(TransportError::UnknownPeer { peer })?;
        inbox.push_back(TransportEvent::Call {
            from: self.peer,
            call: call.clone(),
        });
        Ok(())
    }

    fn broadcast(&mut self, call: &RemoteCall) -> Result<(), TransportError> {
        let mut state = self.hub.state.borrow_mut();
        if !state.inboxes.contains_key(&self.peer) {
            return Err(TransportError::Send {
                target: "all peers".to_string(),
                reason: "this peer was disconnected".to_string(),
            });
        }
        for (peer, inbox) in state.inboxes.iter_mut() {
            if *peer != self.peer {
                inbox.push_back(TransportEvent::Call {
                    from: self.peer,
                    call: call.clone(),
                });
            }
        }
        Ok(())
    }

    fn receive(&mut self) -> Result<Option<TransportEvent>, TransportError> {
        let mut state = self.hub.state.borrow_mut();
        Ok(state
            .inboxes
            .get_mut(&self.peer)
            .and_then(VecDeque::pop_front))
    }
}

impl Drop for LocalTransport {
    fn drop(&mut self) {
        self.hub.state.borrow_mut().leave(self.peer);
    }
}
