use std::{
    default::Default,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

/// Contains Config properties which will be used by the Network
#[derive(Clone, Debug)]
pub struct NetworkConfig {
    /// How many times per second a `NetworkUpdateEvent` is emitted
    pub update_rate: u32,
    /// Address clients connect to and the host binds
    pub host_address: IpAddr,
    pub host_port: u16,
}

impl NetworkConfig {
    /// Period of the update timer. A zero rate yields a zero interval, which
    /// never fires.
    pub fn update_interval(&self) -> Duration {
        if self.update_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs(1) / self.update_rate
    }

    pub fn host_socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host_address, self.host_port)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            update_rate: 20,
            host_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            host_port: 5555,
        }
    }
}
