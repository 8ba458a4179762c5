//! In-memory project tree.
//!
//! A [`Structure`] maps a path segment to either a nested [`Structure`]
//! (a directory) or a [`ContentItem`] (a file). Actions build and reshape it
//! with [`merge`](Structure::merge) and [`reject`](Structure::reject); the
//! materializer walks the final tree through [`leaves`](Structure::leaves).
//!
//! Both operations take the structure by value and return the new one, so a
//! caller that still needs the original has to clone it first. The free
//! functions [`merge`] and [`reject`] do exactly that.

use std::collections::BTreeMap;
use std::collections::btree_map;

use tracing::debug;

use super::{common::StructPath, content::ContentItem};

/// A single entry in a [`Structure`].
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Leaf(ContentItem),
    Tree(Structure),
}

impl Entry {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&ContentItem> {
        match self {
            Self::Leaf(item) => Some(item),
            Self::Tree(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Structure> {
        match self {
            Self::Tree(tree) => Some(tree),
            Self::Leaf(_) => None,
        }
    }
}

impl From<ContentItem> for Entry {
    fn from(item: ContentItem) -> Self {
        Self::Leaf(item)
    }
}

impl From<Structure> for Entry {
    fn from(tree: Structure) -> Self {
        Self::Tree(tree)
    }
}

/// Recursive directory model. Iteration order is by segment name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    entries: BTreeMap<String, Entry>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Add a file directly under this directory.
    pub fn with_file(mut self, name: impl Into<String>, item: impl Into<ContentItem>) -> Self {
        self.entries.insert(name.into(), Entry::Leaf(item.into()));
        self
    }

    /// Add a subdirectory directly under this directory.
    pub fn with_dir(mut self, name: impl Into<String>, tree: Structure) -> Self {
        self.entries.insert(name.into(), Entry::Tree(tree));
        self
    }

    /// Put `entry` at `path`, creating intermediate directories.
    ///
    /// Whatever sat at `path` is replaced. A file standing where a directory
    /// is needed is replaced by that directory.
    pub fn insert(&mut self, path: &StructPath, entry: impl Into<Entry>) {
        let mut current = self;
        for segment in path.parent_segments() {
            let slot = current
                .entries
                .entry(segment.clone())
                .or_insert_with(|| Entry::Tree(Structure::new()));
            if slot.is_leaf() {
                debug!(path = %path, segment = %segment, "Replacing file with directory");
                *slot = Entry::Tree(Structure::new());
            }
            current = match slot {
                Entry::Tree(tree) => tree,
                Entry::Leaf(_) => unreachable!("leaf replaced above"),
            };
        }
        current
            .entries
            .insert(path.file_name().to_string(), entry.into());
    }

    /// Builder-style [`insert`](Self::insert) of a file.
    pub fn with_leaf(mut self, path: &StructPath, item: impl Into<ContentItem>) -> Self {
        self.insert(path, Entry::Leaf(item.into()));
        self
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Deep union of `self` and `incoming`.
    ///
    /// - directory + directory: merged recursively
    /// - file + file: `incoming` wins, policy included
    /// - file + directory (either way round): `incoming`'s kind wins
    pub fn merge(mut self, incoming: Structure) -> Structure {
        for (name, theirs) in incoming.entries {
            let merged = match (self.entries.remove(&name), theirs) {
                (Some(Entry::Tree(ours)), Entry::Tree(theirs)) => Entry::Tree(ours.merge(theirs)),
                (Some(Entry::Leaf(_)), Entry::Tree(theirs)) => {
                    debug!(entry = %name, "Merge replaces file with directory");
                    Entry::Tree(theirs)
                }
                (Some(Entry::Tree(_)), Entry::Leaf(theirs)) => {
                    debug!(entry = %name, "Merge replaces directory with file");
                    Entry::Leaf(theirs)
                }
                (Some(Entry::Leaf(_)) | None, theirs) => theirs,
            };
            self.entries.insert(name, merged);
        }
        self
    }

    /// Remove the entry at `path`, pruning directories left empty.
    ///
    /// Absent paths are a no-op.
    pub fn reject(mut self, path: &StructPath) -> Structure {
        if !remove_path(&mut self.entries, path.segments()) {
            debug!(path = %path, "Nothing to reject");
        }
        self
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn get(&self, path: &StructPath) -> Option<&Entry> {
        let (first, rest) = path.segments().split_first()?;
        let mut entry = self.entries.get(first)?;
        for segment in rest {
            entry = entry.as_tree()?.entries.get(segment)?;
        }
        Some(entry)
    }

    pub fn get_leaf(&self, path: &StructPath) -> Option<&ContentItem> {
        self.get(path).and_then(Entry::as_leaf)
    }

    pub fn contains(&self, path: &StructPath) -> bool {
        self.get(path).is_some()
    }

    /// Direct children.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Entry> {
        self.entries.iter()
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattened `{path -> content}` view, depth-first in name order.
    pub fn leaves(&self) -> Vec<(StructPath, &ContentItem)> {
        let mut out = Vec::new();
        collect_leaves(self, &mut Vec::new(), &mut out);
        out
    }

    /// Paths of directories that contain no entries at all.
    pub fn empty_dirs(&self) -> Vec<StructPath> {
        let mut out = Vec::new();
        collect_empty_dirs(self, &mut Vec::new(), &mut out);
        out
    }

    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|e| match e {
                Entry::Leaf(_) => 1,
                Entry::Tree(tree) => tree.leaf_count(),
            })
            .sum()
    }
}

impl<'a> IntoIterator for &'a Structure {
    type Item = (&'a String, &'a Entry);
    type IntoIter = btree_map::Iter<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Non-consuming [`Structure::merge`].
pub fn merge(base: &Structure, incoming: &Structure) -> Structure {
    base.clone().merge(incoming.clone())
}

/// Non-consuming [`Structure::reject`].
pub fn reject(structure: &Structure, path: &StructPath) -> Structure {
    structure.clone().reject(path)
}

/// Returns true if something was removed.
fn remove_path(entries: &mut BTreeMap<String, Entry>, segments: &[String]) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return false;
    };

    if rest.is_empty() {
        return entries.remove(first).is_some();
    }

    let Some(Entry::Tree(subtree)) = entries.get_mut(first) else {
        return false;
    };
    let removed = remove_path(&mut subtree.entries, rest);
    if removed && subtree.is_empty() {
        entries.remove(first);
    }
    removed
}

fn collect_leaves<'a>(
    tree: &'a Structure,
    prefix: &mut Vec<String>,
    out: &mut Vec<(StructPath, &'a ContentItem)>,
) {
    for (name, entry) in &tree.entries {
        prefix.push(name.clone());
        match entry {
            Entry::Leaf(item) => out.push((StructPath::from_trusted(prefix.clone()), item)),
            Entry::Tree(sub) => collect_leaves(sub, prefix, out),
        }
        prefix.pop();
    }
}

fn collect_empty_dirs(tree: &Structure, prefix: &mut Vec<String>, out: &mut Vec<StructPath>) {
    for (name, entry) in &tree.entries {
        if let Entry::Tree(sub) = entry {
            prefix.push(name.clone());
            if sub.is_empty() {
                out.push(StructPath::from_trusted(prefix.clone()));
            } else {
                collect_empty_dirs(sub, prefix, out);
            }
            prefix.pop();
        }
    }
}
