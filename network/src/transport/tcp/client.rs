use std::{collections::VecDeque, net::SocketAddr};

use futures::StreamExt;
use log::{debug, info, warn};
use tokio::{
    net::{tcp::OwnedReadHalf, TcpStream},
    runtime::Runtime,
    sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender},
    time::timeout,
};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

use canopy_shared::{PeerId, HOST_PEER_ID};

use super::{
    build_runtime, lines_codec, set_nodelay, write_lines, Frame, CONNECT_TIMEOUT,
    WELCOME_TIMEOUT,
};
use crate::{
    error::TransportError,
    messages::RemoteCall,
    transport::{Transport, TransportEvent},
};

enum ClientInput {
    Received(Frame),
    Closed,
}

/// Client side: a single stream to the host
pub struct TcpClient {
    peer: PeerId,
    outbound: UnboundedSender<String>,
    inbound: UnboundedReceiver<ClientInput>,
    pending: VecDeque<TransportEvent>,
    closed: bool,
    // owns the reader and writer tasks
    _runtime: Runtime,
}

impl TcpClient {
    /// Connects and waits for the host's welcome, which carries this peer's
    /// id
    pub fn connect(address: SocketAddr) -> Result<Self, TransportError> {
        let connect_error = |reason: String| TransportError::Connect {
            address: address.to_string(),
            reason,
        };
        let runtime = build_runtime().map_err(|error| connect_error(error.to_string()))?;

        let (peer, reader, writer) = runtime.block_on(async {
            let stream = timeout(CONNECT_TIMEOUT, TcpStream::connect(address))
                .await
                .map_err(|_| connect_error("timed out".to_string()))?
                .map_err(|error| connect_error(error.to_string()))?;
            set_nodelay(&stream, address);

            let (read_half, write_half) = stream.into_split();
            let mut reader = FramedRead::new(read_half, lines_codec());
            let first = match timeout(WELCOME_TIMEOUT, reader.next()).await {
                Err(_) => return Err(connect_error("no welcome from host".to_string())),
                Ok(None) => return Err(connect_error("host closed the connection".to_string())),
                Ok(Some(Err(error))) => return Err(connect_error(error.to_string())),
                Ok(Some(Ok(line))) => line,
            };
            let Frame::Welcome(peer) = Frame::decode(&first)? else {
                return Err(connect_error(format!("expected a welcome, got '{}'", first)));
            };

            Ok::<_, TransportError>((peer, reader, FramedWrite::new(write_half, lines_codec())))
        })?;

        // frames right behind the welcome stay buffered in `reader`
        let (outbound, writer_queue) = mpsc::unbounded_channel();
        let (inbound_sender, inbound) = mpsc::unbounded_channel();
        runtime.spawn(write_lines(writer, writer_queue));
        runtime.spawn(read_host(reader, inbound_sender));

        info!("Connected to {} as peer {}", address, peer);
        let mut pending = VecDeque::new();
        pending.push_back(TransportEvent::Connected(HOST_PEER_ID));
        Ok(Self {
            peer,
            outbound,
            inbound,
            pending,
            closed: false,
            _runtime: runtime,
        })
    }

    fn poll_inputs(&mut self) {
        loop {
            match self.inbound.try_recv() {
                Ok(ClientInput::Received(frame)) => match frame {
                    Frame::Joined(peer) => self.pending.push_back(TransportEvent::Connected(peer)),
                    Frame::Left(peer) => self.pending.push_back(TransportEvent::Disconnected(peer)),
                    Frame::Call { from, call, .. } => {
                        self.pending.push_back(TransportEvent::Call { from, call })
                    }
                    Frame::Welcome(_) => warn!("Ignoring repeated welcome"),
                },
                Ok(ClientInput::Closed) | Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    info!("Host closed the connection");
                    self.pending
                        .push_back(TransportEvent::Disconnected(HOST_PEER_ID));
                    return;
                }
                Err(TryRecvError::Empty) => return,
            }
        }
    }

    fn write(&mut self, to: Option<PeerId>, call: &RemoteCall) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::UnknownPeer { peer: HOST_PEER_ID });
        }
        let frame = Frame::Call {
            from: self.peer,
            to,
            call: call.clone(),
        };
        self.outbound
            .send(frame.encode())
            .map_err(|_| TransportError::Send {
                target: HOST_PEER_ID.to_string(),
                reason: "connection closed".to_string(),
            })
    }
}

impl Transport for TcpClient {
    fn local_peer_id(&self) -> PeerId {
        self.peer
    }

    fn send(&mut self, peer: PeerId, call: &RemoteCall) -> Result<(), TransportError> {
        self.write(Some(peer), call)
    }

    fn broadcast(&mut self, call: &RemoteCall) -> Result<(), TransportError> {
        self.write(None, call)
    }

    fn receive(&mut self) -> Result<Option<TransportEvent>, TransportError> {
        if self.pending.is_empty() && !self.closed {
            self.poll_inputs();
        }
        Ok(self.pending.pop_front())
    }
}

async fn read_host(
    mut lines: FramedRead<OwnedReadHalf, LinesCodec>,
    inbound: UnboundedSender<ClientInput>,
) {
    while let Some(line) = lines.next().await {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                warn!("Host read failed: {}", error);
                break;
            }
        };
        if line.is_empty() {
            continue;
        }
        match Frame::decode(&line) {
            Ok(frame) => {
                if inbound.send(ClientInput::Received(frame)).is_err() {
                    return;
                }
            }
            Err(error) => warn!("{}", error),
        }
    }

    if inbound.send(ClientInput::Closed).is_err() {
        debug!("Client dropped before the host closed");
    }
}
