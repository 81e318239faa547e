use std::fmt;

use crate::scene::scene_traits::SceneRef;

/// Network address of a node: every name from the scene root down to the
/// node, root included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodeAddress {
    segments: Vec<String>,
}

impl NodeAddress {
    /// Reads a `/` separated address. Empty segments are skipped, so a
    /// leading or doubled separator is harmless.
    pub fn parse(text: &str) -> Self {
        Self {
            segments: text
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Address of a live node
    pub fn of<S: SceneRef>(scene: &S, node: S::Node) -> Self {
        let mut segments = Vec::new();
        let mut current = Some(node);
        while let Some(step) = current {
            segments.push(scene.name(step).to_string());
            current = scene.parent(step);
        }
        segments.reverse();
        Self { segments }
    }

    /// Walks the scene from its root, matching one name per level
    pub fn resolve<S: SceneRef>(&self, scene: &S) -> Option<S::Node> {
        let (first, rest) = self.segments.split_first()?;
        let root = scene.root();
        if scene.name(root) != first {
            return None;
        }

        let mut node = root;
        for segment in rest {
            node = scene.child_by_name(node, segment)?;
        }
        Some(node)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl From<&str> for NodeAddress {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}
