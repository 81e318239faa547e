use std::collections::HashSet;

use log::{debug, warn};

use canopy_shared::{
    CollisionObjectState, CollisionShapeState, Node2DState, Node3DState, NodeKind, PeerId,
    SceneError, SceneMut, SceneRef, Shape, HOST_PEER_ID,
};

use crate::{
    builtin::{capabilities, Capabilities},
    library::{TemplateLibrary, TemplateNode},
};

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct NodeId(usize);

#[derive(Debug)]
struct NodeData {
    name: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    owner: Option<NodeId>,
    template_path: Option<String>,
    groups: Vec<String>,
    authority: PeerId,
    capabilities: Capabilities,
}

/// Scene tree stored in a flat arena. Slots of destroyed nodes are never
/// reused, so a stale `NodeId` simply stops resolving.
pub struct ArenaScene {
    nodes: Vec<Option<NodeData>>,
    root: NodeId,
    library: TemplateLibrary,
    pending_free: Vec<NodeId>,
}

impl ArenaScene {
    /// A scene whose root is a plain `Node`
    pub fn new(root_name: &str, library: TemplateLibrary) -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            library,
            pending_free: Vec::new(),
        };
        let root = scene.alloc(root_name, NodeKind::builtin("Node"), Capabilities::default());
        scene.root = root;
        scene
    }

    /// A scene whose root is an instance of the level template at `path`.
    /// Nodes inside the level are owned by the root.
    pub fn with_level(library: TemplateLibrary, path: &str) -> Result<Self, SceneError> {
        let mut scene = Self::new("Root", library);
        let level = scene.instantiate_template(path)?;
        scene.free_now(scene.root);
        scene.root = level;
        Ok(scene)
    }

    pub fn library(&self) -> &TemplateLibrary {
        &self.library
    }

    /// Builds a node of a built-in type, names it and attaches it
    pub fn spawn(&mut self, parent: NodeId, name: &str, base: &str) -> Result<NodeId, SceneError> {
        let node = self.create_node(base)?;
        self.set_name(node, name);
        self.add_child(parent, node);
        Ok(node)
    }

    /// Instantiates a template, names its root and attaches it
    pub fn spawn_template(
        &mut self,
        parent: NodeId,
        path: &str,
        name: &str,
    ) -> Result<NodeId, SceneError> {
        let node = self.instantiate_template(path)?;
        self.set_name(node, name);
        self.add_child(parent, node);
        Ok(node)
    }

    /// Looks a node up by `/` separated names relative to `from`
    pub fn find(&self, from: NodeId, path: &str) -> Option<NodeId> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(from, |node, segment| self.child_by_name(node, segment))
    }

    /// Destroys every subtree queued with `queue_free`
    pub fn flush_freed(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending_free);
        let count = pending.len();
        for node in pending {
            self.free_now(node);
        }
        count
    }

    /// Number of live nodes, detached ones included
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    /// Every node attached below the root, depth first
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut output = Vec::new();
        let mut stack = self.children(node);
        stack.reverse();
        while let Some(next) = stack.pop() {
            output.push(next);
            let mut children = self.children(next);
            children.reverse();
            stack.extend(children);
        }
        output
    }

    /// Indented outline of the tree under `node`, one name per line
    pub fn outline(&self, node: NodeId) -> String {
        let mut output = String::new();
        self.write_outline(node, 0, &mut output);
        output
    }

    fn write_outline(&self, node: NodeId, depth: usize, output: &mut String) {
        output.push_str(&"  ".repeat(depth));
        output.push_str(self.name(node));
        output.push('\n');
        for child in self.children(node) {
            self.write_outline(child, depth + 1, output);
        }
    }

    fn alloc(&mut self, name: &str, kind: NodeKind, capabilities: Capabilities) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(NodeData {
            name: name.to_string(),
            kind,
            parent: None,
            children: Vec::new(),
            owner: None,
            template_path: None,
            groups: Vec::new(),
            authority: HOST_PEER_ID,
            capabilities,
        }));
        id
    }

    fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0).and_then(Option::as_ref)
    }

    fn data_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(node.0).and_then(Option::as_mut)
    }

    fn build_template_node(
        &mut self,
        blueprint: &TemplateNode,
        owner: Option<NodeId>,
    ) -> Result<NodeId, SceneError> {
        let node = self.create_node(&blueprint.kind.base)?;
        if blueprint.kind.has_behavior() {
            if let Err(error) = self.attach_behavior(node, &blueprint.kind.behavior) {
                self.free_now(node);
                return Err(error);
            }
        }
        if let Some(data) = self.data_mut(node) {
            data.name = blueprint.name.clone();
            data.owner = owner;
            data.groups = blueprint.groups.clone();
            if let Some(slot) = data.capabilities.collision_shape.as_mut() {
                slot.shape = blueprint.shape;
            }
        }

        let child_owner = owner.or(Some(node));
        for child in &blueprint.children {
            match self.build_template_node(child, child_owner) {
                Ok(built) => self.add_child(node, built),
                Err(error) => {
                    self.free_now(node);
                    return Err(error);
                }
            }
        }
        Ok(node)
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.data(node).and_then(|data| data.parent) else {
            return;
        };
        if let Some(parent_data) = self.data_mut(parent) {
            parent_data.children.retain(|child| *child != node);
        }
        if let Some(data) = self.data_mut(node) {
            data.parent = None;
        }
    }

    fn free_now(&mut self, node: NodeId) {
        self.detach(node);
        let mut stack = vec![node];
        while let Some(next) = stack.pop() {
            if let Some(data) = self.nodes.get_mut(next.0).and_then(Option::take) {
                stack.extend(data.children);
            }
        }
    }

    /// `name`, or `name` followed by the first free number among the
    /// children of `parent`
    fn unique_name(&self, parent: NodeId, node: NodeId, name: &str) -> String {
        let taken: HashSet<&str> = self
            .children(parent)
            .into_iter()
            .filter(|child| *child != node)
            .map(|child| self.name(child))
            .collect();
        if !taken.contains(name) {
            return name.to_string();
        }
        (2..)
            .map(|suffix| format!("{}{}", name, suffix))
            .find(|candidate| !taken.contains(candidate.as_str()))
            .unwrap_or_else(|| name.to_string())
    }
}

impl SceneRef for ArenaScene {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        self.root
    }

    fn contains(&self, node: NodeId) -> bool {
        self.data(node).is_some()
    }

    fn name(&self, node: NodeId) -> &str {
        self.data(node).map_or("", |data| data.name.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.data(node)?.parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.data(node)
            .map(|data| data.children.clone())
            .unwrap_or_default()
    }

    fn owner(&self, node: NodeId) -> Option<NodeId> {
        self.data(node)?.owner
    }

    fn template_path(&self, node: NodeId) -> Option<&str> {
        self.data(node)?.template_path.as_deref()
    }

    fn kind(&self, node: NodeId) -> NodeKind {
        self.data(node)
            .map(|data| data.kind.clone())
            .unwrap_or_else(|| NodeKind::builtin("Node"))
    }

    fn groups(&self, node: NodeId) -> Vec<String> {
        self.data(node)
            .map(|data| data.groups.clone())
            .unwrap_or_default()
    }

    fn is_in_group(&self, node: NodeId, group: &str) -> bool {
        self.data(node)
            .is_some_and(|data| data.groups.iter().any(|tag| tag == group))
    }

    fn authority(&self, node: NodeId) -> PeerId {
        self.data(node).map_or(HOST_PEER_ID, |data| data.authority)
    }

    fn node_2d(&self, node: NodeId) -> Option<Node2DState> {
        self.data(node)?.capabilities.node_2d
    }

    fn node_3d(&self, node: NodeId) -> Option<Node3DState> {
        self.data(node)?.capabilities.node_3d
    }

    fn collision_object(&self, node: NodeId) -> Option<CollisionObjectState> {
        self.data(node)?.capabilities.collision_object
    }

    fn collision_shape(&self, node: NodeId) -> Option<CollisionShapeState> {
        self.data(node)?.capabilities.collision_shape
    }
}

impl SceneMut for ArenaScene {
    fn create_node(&mut self, base: &str) -> Result<NodeId, SceneError> {
        let capabilities = capabilities(base).ok_or_else(|| SceneError::UnknownNodeType {
            type_name: base.to_string(),
        })?;
        Ok(self.alloc(base, NodeKind::builtin(base), capabilities))
    }

    fn attach_behavior(&mut self, node: NodeId, behavior: &str) -> Result<(), SceneError> {
        if !self.library.has_behavior(behavior) {
            return Err(SceneError::UnknownBehavior {
                behavior: behavior.to_string(),
            });
        }
        if let Some(data) = self.data_mut(node) {
            data.kind.behavior = behavior.to_string();
        }
        Ok(())
    }

    fn instantiate_template(&mut self, path: &str) -> Result<NodeId, SceneError> {
        let (path, blueprint) = self
            .library
            .template(path)
            .map(|(path, root)| (path.to_string(), root.clone()))
            .ok_or_else(|| SceneError::UnknownTemplate {
                path: path.to_string(),
            })?;

        let node = self.build_template_node(&blueprint, None)?;
        if let Some(data) = self.data_mut(node) {
            data.template_path = Some(path);
        }
        debug!("Instantiated template '{}'", blueprint.name);
        Ok(node)
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) {
            return;
        }
        if self.is_ancestor_of(child, parent) {
            warn!("Refusing to attach '{}' inside its own subtree", self.name(child));
            return;
        }
        self.detach(child);
        let name = self.unique_name(parent, child, self.name(child));
        if let Some(data) = self.data_mut(child) {
            data.name = name;
            data.parent = Some(parent);
        }
        if let Some(data) = self.data_mut(parent) {
            data.children.push(child);
        }
    }

    fn reparent(&mut self, node: NodeId, new_parent: NodeId) {
        self.add_child(new_parent, node);
    }

    fn queue_free(&mut self, node: NodeId) {
        self.detach(node);
        if !self.pending_free.contains(&node) {
            self.pending_free.push(node);
        }
    }

    fn set_name(&mut self, node: NodeId, name: &str) {
        let name = match self.parent(node) {
            Some(parent) => self.unique_name(parent, node, name),
            None => name.to_string(),
        };
        if let Some(data) = self.data_mut(node) {
            data.name = name;
        }
    }

    fn add_to_group(&mut self, node: NodeId, group: &str) {
        if let Some(data) = self.data_mut(node) {
            if !data.groups.iter().any(|tag| tag == group) {
                data.groups.push(group.to_string());
            }
        }
    }

    fn set_authority(&mut self, node: NodeId, peer: PeerId) {
        if let Some(data) = self.data_mut(node) {
            data.authority = peer;
        }
    }

    fn set_node_2d(&mut self, node: NodeId, state: Node2DState) {
        if let Some(slot) = self
            .data_mut(node)
            .and_then(|data| data.capabilities.node_2d.as_mut())
        {
            *slot = state;
        }
    }

    fn set_node_3d(&mut self, node: NodeId, state: Node3DState) {
        if let Some(slot) = self
            .data_mut(node)
            .and_then(|data| data.capabilities.node_3d.as_mut())
        {
            *slot = state;
        }
    }

    fn set_collision_object(&mut self, node: NodeId, state: CollisionObjectState) {
        if let Some(slot) = self
            .data_mut(node)
            .and_then(|data| data.capabilities.collision_object.as_mut())
        {
            *slot = state;
        }
    }

    fn set_shape(&mut self, node: NodeId, shape: Option<Shape>) {
        if let Some(slot) = self
            .data_mut(node)
            .and_then(|data| data.capabilities.collision_shape.as_mut())
        {
            slot.shape = shape;
        }
    }
}
