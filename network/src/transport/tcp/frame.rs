use canopy_shared::PeerId;

use crate::{error::TransportError, messages::RemoteCall};

/// One line on the wire
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    Welcome(PeerId),
    Joined(PeerId),
    Left(PeerId),
    Call {
        from: PeerId,
        /// `None` addresses every peer
        to: Option<PeerId>,
        call: RemoteCall,
    },
}

impl Frame {
    pub fn encode(&self) -> String {
        match self {
            Frame::Welcome(peer) => format!("@welcome {}", peer),
            Frame::Joined(peer) => format!("@joined {}", peer),
            Frame::Left(peer) => format!("@left {}", peer),
            Frame::Call { from, to, call } => {
                let to = match to {
                    Some(peer) => peer.to_string(),
                    None => "*".to_string(),
                };
                format!("{} {} {} {}", from, to, call.method, call.payload)
            }
        }
    }

    pub fn decode(line: &str) -> Result<Frame, TransportError> {
        let malformed = || TransportError::MalformedFrame {
            frame: line.to_string(),
        };
        let parse_peer = |text: &str| text.parse::<PeerId>().map_err(|_| malformed());

        if let Some(control) = line.strip_prefix('@') {
            let (kind, peer) = control.split_once(' ').ok_or_else(malformed)?;
            let peer = parse_peer(peer)?;
            return match kind {
                "welcome" => Ok(Frame::Welcome(peer)),
                "joined" => Ok(Frame::Joined(peer)),
                "left" => Ok(Frame::Left(peer)),
                _ => Err(malformed()),
            };
        }

        let mut parts = line.splitn(4, ' ');
        let (Some(from), Some(to), Some(method)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        if method.is_empty() {
            return Err(malformed());
        }
        let to = match to {
            "*" => None,
            peer => Some(parse_peer(peer)?),
        };

        Ok(Frame::Call {
            from: parse_peer(from)?,
            to,
            call: RemoteCall::new(method, parts.next().unwrap_or("")),
        })
    }
}
