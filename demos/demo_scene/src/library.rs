use std::collections::HashMap;

use canopy_shared::{NodeKind, ResourceKind, ResourceManifest, Shape};

/// Blueprint of one node inside a template
#[derive(Clone, Debug)]
pub struct TemplateNode {
    pub name: String,
    pub kind: NodeKind,
    pub groups: Vec<String>,
    pub shape: Option<Shape>,
    pub children: Vec<TemplateNode>,
}

impl TemplateNode {
    pub fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            groups: Vec::new(),
            shape: None,
            children: Vec::new(),
        }
    }

    pub fn builtin(name: &str, base: &str) -> Self {
        Self::new(name, NodeKind::builtin(base))
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.groups.push(group.to_string());
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_child(mut self, child: TemplateNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Templates and behaviors a scene can build, indexed through a
/// `ResourceManifest` so they resolve by full path or by file name
#[derive(Clone, Debug, Default)]
pub struct TemplateLibrary {
    manifest: ResourceManifest,
    templates: HashMap<String, TemplateNode>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_template(&mut self, path: &str, root: TemplateNode) {
        self.manifest.register(path);
        self.templates.insert(path.to_string(), root);
    }

    /// Registers a behavior script, e.g. `scripts/Player.rs`
    pub fn register_behavior(&mut self, path: &str) {
        self.manifest.register(path);
    }

    /// Looks a template up by path, then by file name
    pub fn template(&self, path: &str) -> Option<(&str, &TemplateNode)> {
        if let Some((path, root)) = self.templates.get_key_value(path) {
            return Some((path.as_str(), root));
        }
        let resolved = self.manifest.path_for(path).ok()?;
        self.templates
            .get_key_value(resolved)
            .map(|(path, root)| (path.as_str(), root))
    }

    pub fn has_behavior(&self, behavior: &str) -> bool {
        ["rs", "cs", "gd"].iter().any(|extension| {
            self.manifest
                .path_in(ResourceKind::Script, &format!("{}.{}", behavior, extension))
                .is_some()
        })
    }

    pub fn manifest(&self) -> &ResourceManifest {
        &self.manifest
    }
}
