use canopy_shared::PeerId;

use crate::{error::TransportError, messages::RemoteCall};

pub mod local;
pub mod tcp;

/// Something a transport observed since the last `receive`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    Connected(PeerId),
    Disconnected(PeerId),
    Call { from: PeerId, call: RemoteCall },
}

/// Reliable, ordered delivery of remote calls between peers
pub trait Transport {
    fn local_peer_id(&self) -> PeerId;

    fn send(&mut self, peer: PeerId, call: &RemoteCall) -> Result<(), TransportError>;

    /// Sends to every connected peer except this one
    fn broadcast(&mut self, call: &RemoteCall) -> Result<(), TransportError>;

    /// Next pending event, `Ok(None)` once the inbound queue is drained
    fn receive(&mut self) -> Result<Option<TransportEvent>, TransportError>;
}

/// Produces a transport, either as the session host or as a client
pub trait Socket {
    fn listen(self: Box<Self>) -> Result<Box<dyn Transport>, TransportError>;

    fn connect(self: Box<Self>) -> Result<Box<dyn Transport>, TransportError>;
}
