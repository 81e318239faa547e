use canopy_document::{Value, MAX_DEPTH};

use crate::{
    keys,
    replication::error::ReplicationError,
    scene::state::NodeKind,
};

/// How a node came to exist, which decides how a peer rebuilds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Root of a fresh template instance
    Template { path: String },
    /// Part of a template's (or the level's) predefined structure, already
    /// present on every peer
    Embedded,
    /// Built at runtime with no template
    FreeForm { kind: NodeKind },
}

/// Transient encoding of one node and its subtree
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDescriptor {
    pub name: String,
    pub provenance: Provenance,
    /// Primitive state document, an Object keyed by the transform, collision,
    /// shape and group keys
    pub state: Option<Value>,
    pub children: Vec<NodeDescriptor>,
}

impl NodeDescriptor {
    pub fn new(name: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            name: name.into(),
            provenance,
            state: None,
            children: Vec::new(),
        }
    }

    pub fn with_state(mut self, state: Value) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_child(mut self, child: NodeDescriptor) -> Self {
        self.children.push(child);
        self
    }

    pub fn to_document(&self) -> Value {
        let mut document = Value::object();

        match &self.provenance {
            Provenance::Template { path } => {
                document[keys::PACKED_SCENE].set(true);
                document[keys::FILE_PATH].set(path.as_str());
            }
            Provenance::Embedded => {
                document[keys::PACKED_SCENE_CHILD].set(true);
            }
            Provenance::FreeForm { kind } => {
                let node = &mut document[keys::NODE];
                node[keys::TYPE].set(kind.behavior.as_str());
                node[keys::DERIVED_TYPE].set(kind.base.as_str());
            }
        }

        document[keys::NAME].set(self.name.as_str());
        if let Some(state) = &self.state {
            document[keys::DATA].set(state.clone());
        }
        for child in &self.children {
            document[keys::CHILDREN].append(child.to_document());
        }

        document
    }

    /// Decodes a descriptor and its whole subtree
    pub fn from_document(document: &Value) -> Result<Self, ReplicationError> {
        Self::decode(document, 0)
    }

    fn decode(document: &Value, depth: usize) -> Result<Self, ReplicationError> {
        if depth >= MAX_DEPTH {
            return Err(ReplicationError::MalformedDescriptor {
                reason: "descriptor subtree nests too deeply",
            });
        }
        if !document.is_object() {
            return Err(ReplicationError::MalformedDescriptor {
                reason: "descriptor is not an object",
            });
        }

        let name = document[keys::NAME].as_str();
        if name.is_empty() {
            return Err(ReplicationError::MalformedDescriptor {
                reason: "descriptor has no name",
            });
        }

        let provenance = if document[keys::PACKED_SCENE].as_bool() {
            let path = document[keys::FILE_PATH].as_str();
            if path.is_empty() {
                return Err(ReplicationError::MalformedDescriptor {
                    reason: "template descriptor has no file path",
                });
            }
            Provenance::Template {
                path: path.to_string(),
            }
        } else if document[keys::PACKED_SCENE_CHILD].as_bool() {
            Provenance::Embedded
        } else {
            let node = &document[keys::NODE];
            let base = node[keys::DERIVED_TYPE].as_str();
            if base.is_empty() {
                return Err(ReplicationError::MalformedDescriptor {
                    reason: "free-form descriptor has no node type",
                });
            }
            let behavior = match node[keys::TYPE].as_str() {
                "" => base,
                behavior => behavior,
            };
            Provenance::FreeForm {
                kind: NodeKind::new(behavior, base),
            }
        };

        let state = match document.get(keys::DATA) {
            Some(data) if data.is_object() => Some(data.clone()),
            _ => None,
        };

        let children = document[keys::CHILDREN]
            .as_array()
            .iter()
            .map(|child| NodeDescriptor::decode(child, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.to_string(),
            provenance,
            state,
            children,
        })
    }
}
