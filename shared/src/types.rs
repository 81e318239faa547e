/// Identifier a transport assigns to each connected peer
pub type PeerId = u32;

/// The peer that hosts a session always takes this identifier
pub const HOST_PEER_ID: PeerId = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NetworkState {
    #[default]
    Inactive,
    Host,
    Client,
}

impl NetworkState {
    pub fn is_active(self) -> bool {
        self != NetworkState::Inactive
    }
}
