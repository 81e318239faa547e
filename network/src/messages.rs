use std::{fmt, str::FromStr};

use canopy_shared::{
    keys, ApplyReport, NodeAddress, NodeDescriptor, ReplicationError, Value,
};

use crate::error::NetworkError;

/// The four reliable remote calls peers exchange
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RemoteMethod {
    AddEverything,
    AddNode,
    RemoveNode,
    ReparentNode,
}

impl RemoteMethod {
    pub const ALL: [RemoteMethod; 4] = [
        RemoteMethod::AddEverything,
        RemoteMethod::AddNode,
        RemoteMethod::RemoveNode,
        RemoteMethod::ReparentNode,
    ];

    /// Name of the handler on the wire
    pub fn name(self) -> &'static str {
        match self {
            RemoteMethod::AddEverything => "HandleAddEverything",
            RemoteMethod::AddNode => "HandleAddNode",
            RemoteMethod::RemoveNode => "HandleRemoveNode",
            RemoteMethod::ReparentNode => "HandleReparentNode",
        }
    }
}

impl fmt::Display for RemoteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RemoteMethod {
    type Err = NetworkError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        RemoteMethod::ALL
            .into_iter()
            .find(|method| method.name() == name)
            .ok_or_else(|| NetworkError::UnknownMethod {
                method: name.to_string(),
            })
    }
}

/// A remote call as carried by a transport: a handler name plus the
/// serialized document it receives
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteCall {
    pub method: String,
    pub payload: String,
}

impl RemoteCall {
    pub fn new(method: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            payload: payload.into(),
        }
    }
}

/// Decoded remote call
#[derive(Clone, Debug, PartialEq)]
pub enum NetworkMessage {
    /// Full snapshot for a newly connected peer
    AddEverything { nodes: Vec<NodeDescriptor> },
    AddNode {
        parent: NodeAddress,
        node: NodeDescriptor,
    },
    RemoveNode { node: NodeAddress },
    ReparentNode {
        node: NodeAddress,
        parent: NodeAddress,
    },
}

impl NetworkMessage {
    pub fn method(&self) -> RemoteMethod {
        match self {
            NetworkMessage::AddEverything { .. } => RemoteMethod::AddEverything,
            NetworkMessage::AddNode { .. } => RemoteMethod::AddNode,
            NetworkMessage::RemoveNode { .. } => RemoteMethod::RemoveNode,
            NetworkMessage::ReparentNode { .. } => RemoteMethod::ReparentNode,
        }
    }

    pub fn to_document(&self) -> Value {
        match self {
            NetworkMessage::AddEverything { nodes } => {
                let mut document = Value::object();
                for node in nodes {
                    document[keys::NODES].append(node.to_document());
                }
                document
            }
            NetworkMessage::AddNode { parent, node } => {
                // the descriptor keys sit next to the parent address
                let mut document = node.to_document();
                document[keys::PARENT].set(parent.to_string());
                document
            }
            NetworkMessage::RemoveNode { node } => {
                let mut document = Value::object();
                document[keys::NODE].set(node.to_string());
                document
            }
            NetworkMessage::ReparentNode { node, parent } => {
                let mut document = Value::object();
                document[keys::NODE].set(node.to_string());
                document[keys::PARENT].set(parent.to_string());
                document
            }
        }
    }

    pub fn to_call(&self) -> RemoteCall {
        RemoteCall::new(self.method().name(), self.to_document().serialize())
    }

    /// Decodes a call. Snapshot entries that fail to decode are recorded in
    /// `report` and left out; any other malformed payload is an error.
    pub fn from_call(call: &RemoteCall, report: &mut ApplyReport) -> Result<Self, NetworkError> {
        let method: RemoteMethod = call.method.parse()?;
        let document = Value::parse(&call.payload)?;

        let message = match method {
            RemoteMethod::AddEverything => {
                let mut nodes = Vec::new();
                for entry in document[keys::NODES].as_array() {
                    match NodeDescriptor::from_document(entry) {
                        Ok(node) => nodes.push(node),
                        Err(error) => report.record(entry[keys::NAME].as_str(), error),
                    }
                }
                NetworkMessage::AddEverything { nodes }
            }
            RemoteMethod::AddNode => NetworkMessage::AddNode {
                parent: read_address(&document, keys::PARENT)?,
                node: NodeDescriptor::from_document(&document)?,
            },
            RemoteMethod::RemoveNode => NetworkMessage::RemoveNode {
                node: read_address(&document, keys::NODE)?,
            },
            RemoteMethod::ReparentNode => NetworkMessage::ReparentNode {
                node: read_address(&document, keys::NODE)?,
                parent: read_address(&document, keys::PARENT)?,
            },
        };

        Ok(message)
    }
}

fn read_address(document: &Value, key: &str) -> Result<NodeAddress, ReplicationError> {
    let address = NodeAddress::parse(document[key].as_str());
    if address.is_empty() {
        return Err(ReplicationError::MalformedDescriptor {
            reason: "message is missing a node address",
        });
    }
    Ok(address)
}
