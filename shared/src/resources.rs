use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use canopy_document::Value;
use log::{debug, warn};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    Script,
    Scene,
    Level,
    Texture,
    Model,
    Resource,
    Audio,
    Shader,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Script,
        ResourceKind::Scene,
        ResourceKind::Level,
        ResourceKind::Texture,
        ResourceKind::Model,
        ResourceKind::Resource,
        ResourceKind::Audio,
        ResourceKind::Shader,
    ];

    // name lookups try categories in this order
    const LOOKUP_ORDER: [ResourceKind; 8] = [
        ResourceKind::Scene,
        ResourceKind::Model,
        ResourceKind::Texture,
        ResourceKind::Audio,
        ResourceKind::Level,
        ResourceKind::Shader,
        ResourceKind::Script,
        ResourceKind::Resource,
    ];

    /// Key of this category in the persisted manifest
    pub fn category(self) -> &'static str {
        match self {
            ResourceKind::Script => "scripts",
            ResourceKind::Scene => "scenes",
            ResourceKind::Level => "levels",
            ResourceKind::Texture => "textures",
            ResourceKind::Model => "models",
            ResourceKind::Resource => "resources",
            ResourceKind::Audio => "audios",
            ResourceKind::Shader => "shaders",
        }
    }

    /// Category of a project path, judged by extension. Scenes stored under a
    /// `levels` directory are levels.
    pub fn classify(path: &str) -> Option<ResourceKind> {
        let file_name = file_name(path);
        let extension = &file_name[file_name.rfind('.')? + 1..];

        let kind = match extension {
            "cs" | "gd" | "rs" => ResourceKind::Script,
            "tscn" => {
                let in_levels = path.split('/').rev().skip(1).any(|dir| dir == "levels");
                if in_levels {
                    ResourceKind::Level
                } else {
                    ResourceKind::Scene
                }
            }
            "png" | "svg" => ResourceKind::Texture,
            "glb" | "obj" => ResourceKind::Model,
            "tres" => ResourceKind::Resource,
            "wav" | "ogg" | "mp3" => ResourceKind::Audio,
            "gdshader" => ResourceKind::Shader,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Error)]
pub enum ResourceError {
    /// Lookups are by full file name, extension included
    #[error("Resource name '{name}' has no file extension")]
    MissingExtension { name: String },

    #[error("No resource named '{name}' is registered")]
    NotFound { name: String },

    #[error("Failed to scan '{path}': {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Index of project files by category, keyed by file name
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceManifest {
    entries: BTreeMap<ResourceKind, BTreeMap<String, String>>,
}

impl ResourceManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes one project path. A name that is already registered in the
    /// same category keeps its first path.
    pub fn register(&mut self, path: &str) -> Option<ResourceKind> {
        let kind = ResourceKind::classify(path)?;
        let name = file_name(path);
        let paths = self.entries.entry(kind).or_default();

        if let Some(existing) = paths.get(name) {
            warn!(
                "Duplicate {} name '{}': keeping '{}', ignoring '{}'",
                kind.category(),
                name,
                existing,
                path
            );
            return Some(kind);
        }

        paths.insert(name.to_string(), path.to_string());
        Some(kind)
    }

    /// Recursively registers every file under `dir`, skipping hidden files
    /// and directories. Paths are stored relative to `dir` with `/`
    /// separators. Returns how many files were registered.
    pub fn scan(&mut self, dir: &Path) -> Result<usize, ResourceError> {
        let mut count = 0;
        self.scan_dir(dir, "", &mut count)?;
        debug!("Registered {} resources from {}", count, dir.display());
        Ok(count)
    }

    fn scan_dir(&mut self, dir: &Path, prefix: &str, count: &mut usize) -> Result<(), ResourceError> {
        let scan_error = |source| ResourceError::Scan {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = fs::read_dir(dir)
            .map_err(scan_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(scan_error)?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let relative = if prefix.is_empty() {
                name
            } else {
                format!("{}/{}", prefix, name)
            };

            let file_type = entry.file_type().map_err(scan_error)?;
            if file_type.is_dir() {
                self.scan_dir(&entry.path(), &relative, count)?;
            } else if self.register(&relative).is_some() {
                *count += 1;
            }
        }

        Ok(())
    }

    /// Path registered under a file name, searching every category
    pub fn path_for(&self, name: &str) -> Result<&str, ResourceError> {
        if !name.contains('.') {
            return Err(ResourceError::MissingExtension {
                name: name.to_string(),
            });
        }

        ResourceKind::LOOKUP_ORDER
            .iter()
            .find_map(|kind| self.path_in(*kind, name))
            .ok_or_else(|| ResourceError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn path_in(&self, kind: ResourceKind, name: &str) -> Option<&str> {
        self.entries.get(&kind)?.get(name).map(String::as_str)
    }

    /// (name, path) pairs of one category, ordered by name
    pub fn entries(&self, kind: ResourceKind) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .get(&kind)
            .into_iter()
            .flat_map(|paths| paths.iter().map(|(name, path)| (name.as_str(), path.as_str())))
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_document(&self) -> Value {
        let mut document = Value::object();
        for (kind, paths) in &self.entries {
            for (name, path) in paths {
                document[kind.category()].add(name.as_str(), path.as_str());
            }
        }
        document
    }

    /// Rebuilds a manifest from `to_document` output. Unknown categories are
    /// ignored.
    pub fn from_document(document: &Value) -> Self {
        let mut manifest = Self::new();
        for kind in ResourceKind::ALL {
            let Some(paths) = document[kind.category()].as_object() else {
                continue;
            };
            let target = manifest.entries.entry(kind).or_default();
            for (name, path) in paths {
                target.insert(name.clone(), path.as_str().to_string());
            }
        }
        manifest
    }
}
