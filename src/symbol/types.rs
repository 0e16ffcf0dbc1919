//! Value types shared by fragments and the merged index.

use serde::{Deserialize, Serialize};

/// A resolvable pointer to one documented location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    /// Document path relative to the documentation root
    pub path: String,
    /// In-document anchor, without the leading `#`
    #[serde(default)]
    pub anchor: String,
    /// Fully-qualified name or signature shown to the user
    #[serde(default)]
    pub descriptor: String,
}

impl Locator {
    pub fn new(
        path: impl Into<String>,
        anchor: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            anchor: anchor.into().trim_start_matches('#').to_string(),
            descriptor: descriptor.into(),
        }
    }

    /// Link target as it would appear in an `href`.
    pub fn href(&self) -> String {
        if self.anchor.is_empty() {
            self.path.clone()
        } else {
            format!("{}#{}", self.path, self.anchor)
        }
    }
}

/// One symbol and every location it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    /// Lookup key; normalized once the entry is part of a [`SymbolIndex`](super::SymbolIndex)
    pub key: String,
    /// Display name
    pub label: String,
    /// Documented locations, in generator order
    #[serde(default)]
    pub targets: Vec<Locator>,
}

impl SymbolEntry {
    pub fn new(key: impl Into<String>, label: impl Into<String>, targets: Vec<Locator>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            targets,
        }
    }

    /// Build an entry from `(label, path, anchor, descriptor)` tuples.
    ///
    /// The entry takes the label of its first tuple.
    pub fn from_tuples<I, S>(key: impl Into<String>, tuples: I) -> Self
    where
        I: IntoIterator<Item = (S, S, S, S)>,
        S: Into<String>,
    {
        let mut label = None;
        let mut targets = Vec::new();

        for (tuple_label, path, anchor, descriptor) in tuples {
            if label.is_none() {
                label = Some(tuple_label.into());
            }
            targets.push(Locator::new(path, anchor, descriptor));
        }

        Self {
            key: key.into(),
            label: label.unwrap_or_default(),
            targets,
        }
    }
}

/// One externally supplied shard of index data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexFragment {
    /// Shard name, usually the file stem it was read from
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub entries: Vec<SymbolEntry>,
}

impl IndexFragment {
    pub fn new(name: impl Into<String>, entries: Vec<SymbolEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }
}
