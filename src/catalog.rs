//! Local catalog of label templates: `<dir>/<name>.json`, each a JSON array of labels.

use crate::types::{Label, RepoRef};
use log::warn;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_TEMPLATE: &str = "default";

const EMBEDDED_DEFAULT: &str = include_str!("../labels/default.json");

#[derive(Debug, Clone)]
pub struct LabelCatalog {
    dir: PathBuf,
}

impl LabelCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Template names, sorted, `default` first. `default` is always present.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = match fs::read_dir(&self.dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().and_then(|x| x.to_str()) == Some("json"))
                .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
                .filter(|n| n != DEFAULT_TEMPLATE)
                .collect(),
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!("Failed to read label templates in {}: {}", self.dir.display(), e);
                }
                Vec::new()
            }
        };
        names.sort();
        names.insert(0, DEFAULT_TEMPLATE.to_string());
        names
    }

    pub fn default_labels() -> Vec<Label> {
        // Embedded at build time and covered by tests.
        serde_json::from_str(EMBEDDED_DEFAULT).unwrap_or_default()
    }

    /// Load a template. A missing or malformed file falls back to the default set.
    pub fn load(&self, name: &str) -> Vec<Label> {
        let path = self.path_for(name);
        match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Vec<Label>>(&text) {
                Ok(labels) => labels,
                Err(e) => {
                    warn!("Failed to load labels from {}: {}; using default labels.", path.display(), e);
                    Self::default_labels()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if name != DEFAULT_TEMPLATE {
                    warn!("File {} does not exist, using default labels.", path.display());
                }
                Self::default_labels()
            }
            Err(e) => {
                warn!("Failed to read {}: {}; using default labels.", path.display(), e);
                Self::default_labels()
            }
        }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    /// Persist labels fetched from `repo` as a reusable template.
    pub fn save(&self, repo: &RepoRef, labels: &[Label]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&repo.file_stem());
        write_labels(&path, labels)?;
        Ok(path)
    }
}

pub fn write_labels(path: &Path, labels: &[Label]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(labels)?;
    fs::write(path, json + "\n")
}
