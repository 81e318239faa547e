use canopy::{
    transport::{Transport, TransportEvent},
    RemoteCall,
};

use crate::PeerPair;

/// Lets both sides receive once
pub fn exchange(pair: &mut PeerPair) {
    pair.exchange();
}

/// Lets both sides receive `n` times, enough for relayed calls to settle
pub fn exchange_n_times(pair: &mut PeerPair, n: usize) {
    for _ in 0..n {
        pair.exchange();
    }
}

/// Every call waiting in a raw transport, connection events dropped
pub fn drain_calls(transport: &mut dyn Transport) -> Vec<RemoteCall> {
    let mut calls = Vec::new();
    while let Ok(Some(event)) = transport.receive() {
        if let TransportEvent::Call { call, .. } = event {
            calls.push(call);
        }
    }
    calls
}

pub fn calls_named(calls: &[RemoteCall], method: &str) -> Vec<RemoteCall> {
    calls
        .iter()
        .filter(|call| call.method == method)
        .cloned()
        .collect()
}
