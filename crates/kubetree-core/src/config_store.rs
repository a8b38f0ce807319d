use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::error::ConfigError;

pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// The subset of a kubeconfig this tool reads. Everything else in the file is
/// left alone and survives a rewrite untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Configuration {
    #[serde(rename = "current-context", default)]
    current_context: Option<String>,
    #[serde(default)]
    contexts: Option<Vec<ContextEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextEntry {
    pub name: String,
    #[serde(default)]
    context: Option<ContextAttributes>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ContextAttributes {
    #[serde(default)]
    namespace: Option<String>,
}

impl Configuration {
    pub fn new(active_context: impl Into<String>, contexts: Vec<ContextEntry>) -> Self {
        Self { current_context: Some(active_context.into()), contexts: Some(contexts) }
    }

    pub fn active_context(&self) -> &str {
        self.current_context.as_deref().unwrap_or_default()
    }

    pub fn contexts(&self) -> &[ContextEntry] {
        self.contexts.as_deref().unwrap_or_default()
    }

    pub fn find(&self, name: &str) -> Option<&ContextEntry> {
        self.contexts().iter().find(|c| c.name == name)
    }

    pub fn context_exists(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

impl ContextEntry {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self { name: name.into(), context: Some(ContextAttributes { namespace: Some(namespace.into()) }) }
    }

    /// Namespace recorded as current for this context; empty when unset.
    pub fn active_namespace(&self) -> &str {
        self.context.as_ref().and_then(|c| c.namespace.as_deref()).unwrap_or_default()
    }
}

/// A (context, namespace) pair to make current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTarget {
    pub context: String,
    pub namespace: String,
}

impl SelectionTarget {
    pub fn new(context: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self { context: context.into(), namespace: namespace.into() }
    }
}

impl fmt::Display for SelectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.context, self.namespace)
    }
}

/// Owns the kubeconfig path and the copy parsed at startup.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: Configuration,
}

impl ConfigStore {
    /// Picks the kubeconfig path: an explicit override, then the first entry of
    /// `$KUBECONFIG`, then `~/.kube/config`.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Some(paths) = std::env::var_os(KUBECONFIG_ENV) {
            if let Some(first) = std::env::split_paths(&paths).find(|p| !p.as_os_str().is_empty()) {
                return Ok(first);
            }
        }
        dirs::home_dir().map(|home| home.join(".kube").join("config")).ok_or(ConfigError::NoConfigPath)
    }

    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let raw = fs::read(&path).map_err(io_error(&path))?;
        if raw.is_empty() {
            return Err(ConfigError::EmptyFile { path });
        }
        let config = serde_yaml::from_slice(&raw).map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
        tracing::debug!(path = %path.display(), "loaded kubeconfig");
        Ok(Self { path, config })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn context_exists(&self, name: &str) -> bool {
        self.config.context_exists(name)
    }

    /// Makes `target` current in the file on disk.
    ///
    /// The file is re-read rather than reusing the startup copy so that edits
    /// made by other tools in the meantime are kept. Only `current-context` and
    /// the target context's `namespace` change.
    pub fn switch_to(&self, target: &SelectionTarget) -> Result<(), ConfigError> {
        let raw = fs::read(&self.path).map_err(io_error(&self.path))?;
        let mut doc: Value =
            serde_yaml::from_slice(&raw).map_err(|source| ConfigError::Parse { path: self.path.clone(), source })?;

        apply_target(&mut doc, target)?;

        let contents = serde_yaml::to_string(&doc).map_err(ConfigError::Serialize)?;
        write_atomic(&self.path, &contents)?;

        tracing::info!("switched to {target}");
        Ok(())
    }
}

fn apply_target(doc: &mut Value, target: &SelectionTarget) -> Result<(), ConfigError> {
    let not_found = || ConfigError::ContextNotFound(target.context.clone());
    let root = doc.as_mapping_mut().ok_or_else(not_found)?;

    {
        let entry = root
            .get_mut("contexts")
            .and_then(Value::as_sequence_mut)
            .and_then(|contexts| {
                contexts.iter_mut().find(|c| c.get("name").and_then(Value::as_str) == Some(target.context.as_str()))
            })
            .and_then(Value::as_mapping_mut)
            .ok_or_else(not_found)?;

        if !matches!(entry.get("context"), Some(Value::Mapping(_))) {
            entry.insert(Value::from("context"), Value::Mapping(Mapping::new()));
        }
        if let Some(Value::Mapping(attrs)) = entry.get_mut("context") {
            attrs.insert(Value::from("namespace"), Value::from(target.namespace.as_str()));
        }
    }

    root.insert(Value::from("current-context"), Value::from(target.context.as_str()));
    Ok(())
}

// Writes to a temp file beside the target and renames it over the original.
// Symlinks are resolved first so a linked kubeconfig stays a link.
fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new().prefix(".kubetree").suffix(".tmp").tempfile_in(dir).map_err(io_error(dir))?;
    tmp.write_all(contents.as_bytes()).and_then(|()| tmp.as_file().sync_all()).map_err(io_error(tmp.path()))?;
    if let Ok(meta) = fs::metadata(&target) {
        if let Err(e) = tmp.as_file().set_permissions(meta.permissions()) {
            tracing::warn!("could not copy permissions to {}: {e}", tmp.path().display());
        }
    }

    tmp.persist(&target).map_err(|e| ConfigError::Io { path: target.clone(), source: e.error })?;
    Ok(())
}

fn io_error(path: &Path) -> impl Fn(io::Error) -> ConfigError + '_ {
    move |source| ConfigError::Io { path: path.to_path_buf(), source }
}

#[cfg(test)]
mod tests;
