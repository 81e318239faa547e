//! Line-framed TCP transport.
//!
//! Socket I/O runs on a small tokio runtime owned by the transport. Reader
//! and writer tasks talk to the polling side over unbounded channels, so
//! `Transport::receive` never blocks.
//!
//! The host accepts clients, hands out peer ids starting at 2 and relays
//! calls between clients. Every frame is one line:
//!
//! ```text
//! @welcome <id>                      host -> new client
//! @joined <id>                       host -> clients
//! @left <id>                         host -> clients
//! <from> <to|*> <Method> <payload>   any direction
//! ```

use std::{io, net::SocketAddr, time::Duration};

use futures::SinkExt;
use log::warn;
use tokio::{
    net::tcp::OwnedWriteHalf,
    runtime::{Builder, Runtime},
    sync::mpsc::UnboundedReceiver,
};
use tokio_util::codec::{FramedWrite, LinesCodec};

use crate::{
    error::TransportError,
    network_config::NetworkConfig,
    transport::{Socket, Transport},
};

mod client;
mod frame;
mod host;

pub use client::TcpClient;
pub use frame::Frame;
pub use host::TcpHost;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const WELCOME_TIMEOUT: Duration = Duration::from_secs(5);
/// Full snapshots travel as a single line
const MAX_LINE_LENGTH: usize = 16 * 1024 * 1024;

/// Socket for the TCP transport
pub struct TcpSocket {
    address: SocketAddr,
}

impl TcpSocket {
    pub fn new(address: SocketAddr) -> Self {
        Self { address }
    }

    pub fn from_config(config: &NetworkConfig) -> Self {
        Self::new(config.host_socket_addr())
    }
}

impl From<TcpSocket> for Box<dyn Socket> {
    fn from(socket: TcpSocket) -> Self {
        Box::new(socket)
    }
}

impl Socket for TcpSocket {
    fn listen(self: Box<Self>) -> Result<Box<dyn Transport>, TransportError> {
        Ok(Box::new(TcpHost::bind(self.address)?))
    }

    fn connect(self: Box<Self>) -> Result<Box<dyn Transport>, TransportError> {
        Ok(Box::new(TcpClient::connect(self.address)?))
    }
}

fn build_runtime() -> io::Result<Runtime> {
    Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("canopy-tcp")
        .enable_all()
        .build()
}

fn lines_codec() -> LinesCodec {
    LinesCodec::new_with_max_length(MAX_LINE_LENGTH)
}

fn set_nodelay(stream: &tokio::net::TcpStream, address: SocketAddr) {
    if let Err(error) = stream.set_nodelay(true) {
        warn!("Could not disable Nagle for {}: {}", address, error);
    }
}

/// Writes queued lines until the polling side drops its sender or the
/// stream fails
async fn write_lines(
    mut sink: FramedWrite<OwnedWriteHalf, LinesCodec>,
    mut outbound: UnboundedReceiver<String>,
) {
    while let Some(line) = outbound.recv().await {
        if let Err(error) = sink.send(line).await {
            warn!("Write failed: {}", error);
            break;
        }
    }
}
