use crate::replication::error::ReplicationError;

/// A node that was dropped while applying a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyFailure {
    pub name: String,
    pub error: ReplicationError,
}

/// Per-node failures gathered while applying descriptors. A failure drops
/// only the node it names; its siblings are still applied.
#[derive(Debug, Default, Clone)]
pub struct ApplyReport {
    failures: Vec<ApplyFailure>,
}

impl ApplyReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str, error: ReplicationError) {
        self.failures.push(ApplyFailure {
            name: name.to_string(),
            error,
        });
    }

    pub fn failures(&self) -> &[ApplyFailure] {
        &self.failures
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_failures(self) -> Vec<ApplyFailure> {
        self.failures
    }
}
