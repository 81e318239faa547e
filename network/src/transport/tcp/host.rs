use std::{
    collections::{BTreeMap, VecDeque},
    net::SocketAddr,
};

use futures::StreamExt;
use log::{debug, info, warn};
use tokio::{
    net::{tcp::OwnedReadHalf, TcpListener},
    runtime::Runtime,
    sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender},
};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

use canopy_shared::{PeerId, HOST_PEER_ID};

use super::{build_runtime, lines_codec, set_nodelay, write_lines, Frame};
use crate::{
    error::TransportError,
    messages::RemoteCall,
    transport::{Transport, TransportEvent},
};

/// What the I/O tasks hand to the polling side
enum HostInput {
    Accepted {
        peer: PeerId,
        address: SocketAddr,
        writer: UnboundedSender<String>,
    },
    Received {
        peer: PeerId,
        frame: Frame,
    },
    Closed {
        peer: PeerId,
    },
}

/// Hosting side: accepts clients and relays their calls
pub struct TcpHost {
    local_addr: SocketAddr,
    inbound: UnboundedReceiver<HostInput>,
    clients: BTreeMap<PeerId, UnboundedSender<String>>,
    pending: VecDeque<TransportEvent>,
    stopped: bool,
    // owns every connection task, dropping it closes the sockets
    _runtime: Runtime,
}

impl TcpHost {
    pub fn bind(address: SocketAddr) -> Result<Self, TransportError> {
        let bind_error = |error: std::io::Error| TransportError::Bind {
            address: address.to_string(),
            reason: error.to_string(),
        };
        let runtime = build_runtime().map_err(bind_error)?;
        let listener = runtime
            .block_on(TcpListener::bind(address))
            .map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;

        let (sender, inbound) = mpsc::unbounded_channel();
        runtime.spawn(accept_clients(listener, sender));

        info!("Listening on {}", local_addr);
        Ok(Self {
            local_addr,
            inbound,
            clients: BTreeMap::new(),
            pending: VecDeque::new(),
            stopped: false,
            _runtime: runtime,
        })
    }

    /// Address the listener is bound to, with the real port when bound to 0
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    fn poll_inputs(&mut self) -> Result<(), TransportError> {
        loop {
            match self.inbound.try_recv() {
                Ok(HostInput::Accepted {
                    peer,
                    address,
                    writer,
                }) => self.admit(peer, address, writer),
                Ok(HostInput::Received { peer, frame }) => self.route(peer, frame),
                Ok(HostInput::Closed { peer }) => self.drop_client(peer),
                Err(TryRecvError::Empty) => return Ok(()),
                Err(TryRecvError::Disconnected) => {
                    if self.stopped {
                        return Ok(());
                    }
                    self.stopped = true;
                    return Err(TransportError::Receive {
                        reason: "listener stopped".to_string(),
                    });
                }
            }
        }
    }

    fn admit(&mut self, peer: PeerId, address: SocketAddr, writer: UnboundedSender<String>) {
        for (existing, other) in self.clients.iter() {
            queue(&writer, peer, &Frame::Joined(*existing));
            queue(other, *existing, &Frame::Joined(peer));
        }
        self.clients.insert(peer, writer);

        info!("Peer {} connected from {}", peer, address);
        self.pending.push_back(TransportEvent::Connected(peer));
    }

    fn route(&mut self, sender: PeerId, frame: Frame) {
        if !self.clients.contains_key(&sender) {
            debug!("Dropping frame from departed peer {}", sender);
            return;
        }
        let Frame::Call { to, call, .. } = frame else {
            warn!("Peer {} sent a control frame, ignoring", sender);
            return;
        };

        // the sender id is taken from the connection, never trusted
        let relayed = Frame::Call {
            from: sender,
            to,
            call: call.clone(),
        };
        match to {
            Some(HOST_PEER_ID) => self
                .pending
                .push_back(TransportEvent::Call { from: sender, call }),
            Some(target) => match self.clients.get(&target) {
                Some(writer) => queue(writer, target, &relayed),
                None => warn!("Peer {} addressed unknown peer {}", sender, target),
            },
            None => {
                for (peer, writer) in self.clients.iter() {
                    if *peer != sender {
                        queue(writer, *peer, &relayed);
                    }
                }
                self.pending
                    .push_back(TransportEvent::Call { from: sender, call });
            }
        }
    }

    fn drop_client(&mut self, peer: PeerId) {
        if self.clients.remove(&peer).is_none() {
            return;
        }
        info!("Peer {} disconnected", peer);
        for (other, writer) in self.clients.iter() {
            queue(writer, *other, &Frame::Left(peer));
        }
        self.pending.push_back(TransportEvent::Disconnected(peer));
    }
}

/// A failed queue means the connection task ended, its `Closed` input
/// follows
fn queue(writer: &UnboundedSender<String>, peer: PeerId, frame: &Frame) {
    if writer.send(frame.encode()).is_err() {
        debug!("Peer {} is closing, frame dropped", peer);
    }
}

impl Transport for TcpHost {
    fn local_peer_id(&self) -> PeerId {
        HOST_PEER_ID
    }

    fn send(&mut self, peer: PeerId, call: &RemoteCall) -> Result<(), TransportError> {
        let writer = self
            .clients
            .get(&peer)
            .ok_or(TransportError::UnknownPeer { peer })?;
        let frame = Frame::Call {
            from: HOST_PEER_ID,
            to: Some(peer),
            call: call.clone(),
        };
        writer
            .send(frame.encode())
            .map_err(|_| TransportError::Send {
                target: peer.to_string(),
                reason: "connection closed".to_string(),
            })
    }

    fn broadcast(&mut self, call: &RemoteCall) -> Result<(), TransportError> {
        let frame = Frame::Call {
            from: HOST_PEER_ID,
            to: None,
            call: call.clone(),
        };
        for (peer, writer) in self.clients.iter() {
            queue(writer, *peer, &frame);
        }
        Ok(())
    }

    fn receive(&mut self) -> Result<Option<TransportEvent>, TransportError> {
        if self.pending.is_empty() {
            self.poll_inputs()?;
        }
        Ok(self.pending.pop_front())
    }
}

async fn accept_clients(listener: TcpListener, inbound: UnboundedSender<HostInput>) {
    let mut next_peer_id = HOST_PEER_ID + 1;
    loop {
        let (stream, address) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(error) => {
                warn!("Accept failed: {}", error);
                continue;
            }
        };
        set_nodelay(&stream, address);

        let peer = next_peer_id;
        next_peer_id += 1;

        let (read_half, write_half) = stream.into_split();
        let (writer, outbound) = mpsc::unbounded_channel();
        // the welcome leads, before anything the polling side queues
        queue(&writer, peer, &Frame::Welcome(peer));
        tokio::spawn(write_lines(FramedWrite::new(write_half, lines_codec()), outbound));

        // admit before reading, so no frame from this peer can overtake it
        if inbound
            .send(HostInput::Accepted {
                peer,
                address,
                writer,
            })
            .is_err()
        {
            debug!("Host dropped, accept loop stopping");
            return;
        }
        tokio::spawn(read_client(
            peer,
            FramedRead::new(read_half, lines_codec()),
            inbound.clone(),
        ));
    }
}

async fn read_client(
    peer: PeerId,
    mut lines: FramedRead<OwnedReadHalf, LinesCodec>,
    inbound: UnboundedSender<HostInput>,
) {
    while let Some(line) = lines.next().await {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                warn!("Peer {} read failed: {}", peer, error);
                break;
            }
        };
        if line.is_empty() {
            continue;
        }
        match Frame::decode(&line) {
            Ok(frame) => {
                if inbound.send(HostInput::Received { peer, frame }).is_err() {
                    return;
                }
            }
            Err(error) => warn!("Peer {}: {}", peer, error),
        }
    }

    if inbound.send(HostInput::Closed { peer }).is_err() {
        debug!("Host dropped before peer {} closed", peer);
    }
}
