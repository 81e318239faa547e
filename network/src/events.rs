use std::{mem, vec::IntoIter};

use canopy_shared::{ApplyFailure, PeerId};

use crate::NetworkError;

/// Everything the network observed during one `receive` call
pub struct NetworkEvents {
    connections: Vec<PeerId>,
    disconnections: Vec<PeerId>,
    updates: Vec<u64>,
    errors: Vec<NetworkError>,
    failures: Vec<(PeerId, ApplyFailure)>,
    empty: bool,
}

impl Default for NetworkEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkEvents {
    pub(crate) fn new() -> Self {
        Self {
            connections: Vec::new(),
            disconnections: Vec::new(),
            updates: Vec::new(),
            errors: Vec::new(),
            failures: Vec::new(),
            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: NetworkEvent>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: NetworkEvent>(&self) -> bool {
        V::has(self)
    }

    // Crate-public

    pub(crate) fn push_connection(&mut self, peer: PeerId) {
        self.connections.push(peer);
        self.empty = false;
    }

    pub(crate) fn push_disconnection(&mut self, peer: PeerId) {
        self.disconnections.push(peer);
        self.empty = false;
    }

    pub(crate) fn push_update(&mut self, tick: u64) {
        self.updates.push(tick);
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: NetworkError) {
        self.errors.push(error);
        self.empty = false;
    }

    pub(crate) fn push_failure(&mut self, peer: PeerId, failure: ApplyFailure) {
        self.failures.push((peer, failure));
        self.empty = false;
    }
}

// Event Trait
pub trait NetworkEvent {
    type Iter;

    fn iter(events: &mut NetworkEvents) -> Self::Iter;

    fn has(events: &NetworkEvents) -> bool;
}

// ConnectEvent
pub struct ConnectEvent;
impl NetworkEvent for ConnectEvent {
    type Iter = IntoIter<PeerId>;

    fn iter(events: &mut NetworkEvents) -> Self::Iter {
        let list = mem::take(&mut events.connections);
        IntoIterator::into_iter(list)
    }

    fn has(events: &NetworkEvents) -> bool {
        !events.connections.is_empty()
    }
}

// DisconnectEvent
pub struct DisconnectEvent;
impl NetworkEvent for DisconnectEvent {
    type Iter = IntoIter<PeerId>;

    fn iter(events: &mut NetworkEvents) -> Self::Iter {
        let list = mem::take(&mut events.disconnections);
        IntoIterator::into_iter(list)
    }

    fn has(events: &NetworkEvents) -> bool {
        !events.disconnections.is_empty()
    }
}

/// Fired by the update timer; yields the tick count
pub struct NetworkUpdateEvent;
impl NetworkEvent for NetworkUpdateEvent {
    type Iter = IntoIter<u64>;

    fn iter(events: &mut NetworkEvents) -> Self::Iter {
        let list = mem::take(&mut events.updates);
        IntoIterator::into_iter(list)
    }

    fn has(events: &NetworkEvents) -> bool {
        !events.updates.is_empty()
    }
}

// ErrorEvent
pub struct ErrorEvent;
impl NetworkEvent for ErrorEvent {
    type Iter = IntoIter<NetworkError>;

    fn iter(events: &mut NetworkEvents) -> Self::Iter {
        let list = mem::take(&mut events.errors);
        IntoIterator::into_iter(list)
    }

    fn has(events: &NetworkEvents) -> bool {
        !events.errors.is_empty()
    }
}

/// Nodes dropped while applying a batch from the given peer
pub struct ReplicationFailureEvent;
impl NetworkEvent for ReplicationFailureEvent {
    type Iter = IntoIter<(PeerId, ApplyFailure)>;

    fn iter(events: &mut NetworkEvents) -> Self::Iter {
        let list = mem::take(&mut events.failures);
        IntoIterator::into_iter(list)
    }

    fn has(events: &NetworkEvents) -> bool {
        !events.failures.is_empty()
    }
}
