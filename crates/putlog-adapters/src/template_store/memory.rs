//! In-memory template store with built-in templates.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock},
};

use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use putlog_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::TemplateRef,
    error::PutlogResult,
};

use crate::builtin_templates;

/// Thread-safe in-memory template store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<HashMap<TemplateRef, String>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with built-in templates loaded, then overlaid with an
    /// override directory if one is found.
    pub fn with_builtin() -> PutlogResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        if let Some(dir) = builtin_templates::override_dir() {
            store.load_dir(&dir)?;
        }
        Ok(store)
    }

    /// Load built-in templates.
    pub fn load_builtin(&self) -> PutlogResult<()> {
        for (template, source) in builtin_templates::all_templates() {
            self.insert(template, source.to_string())?;
        }
        Ok(())
    }

    /// Load every `<namespace>/<name>` file under `root`, replacing
    /// templates with the same reference. Returns how many were loaded.
    ///
    /// Files at other depths are skipped with a warning.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn load_dir(&self, root: &Path) -> PutlogResult<usize> {
        let mut loaded = 0;

        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: root.to_path_buf(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some(template) = template_ref_for(root, path) else {
                warn!(path = %path.display(), "Not at <namespace>/<name>, skipping");
                continue;
            };

            let source =
                std::fs::read_to_string(path).map_err(|e| ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: format!("Failed to read template: {}", e),
                })?;

            debug!(template = %template, "Loaded template from disk");
            self.insert(template, source)?;
            loaded += 1;
        }

        info!(count = loaded, "Template directory loaded");
        Ok(loaded)
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn template_ref_for(root: &Path, path: &Path) -> Option<TemplateRef> {
    let relative = path.strip_prefix(root).ok()?;
    let mut parts = relative.iter().map(|p| p.to_str());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Some(namespace)), Some(Some(name)), None) => Some(TemplateRef::new(name, namespace)),
        _ => None,
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, template: &TemplateRef) -> PutlogResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(template).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                template: template.to_string(),
            }
            .into()
        })
    }

    fn insert(&self, template: TemplateRef, source: String) -> PutlogResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.insert(template, source);
        Ok(())
    }

    fn list(&self) -> PutlogResult<Vec<TemplateRef>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut templates: Vec<_> = inner.keys().cloned().collect();
        templates.sort();
        Ok(templates)
    }
}
