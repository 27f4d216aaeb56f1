//! Short ID system for easier record selection
//!
//! Provides per-kind aliases like `PARAM@1`, `DATA@12` that map to full
//! record IDs. The index is persisted in `.sqt/shortids.json` and grows as
//! records are created or listed.

use std::collections::{BTreeMap, HashMap};
use std::fs;

use crate::core::identity::EntityPrefix;
use crate::core::project::Project;

/// Index file location within a project
const INDEX_FILE: &str = ".sqt/shortids.json";

/// A mapping of short IDs (PREFIX@N) to full record IDs
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ShortIdIndex {
    /// Maps "PREFIX@N" to full record ID string
    entries: BTreeMap<String, String>,
    /// Maps full record ID to short ID (reverse lookup)
    #[serde(skip)]
    reverse: HashMap<String, String>,
    /// Next available number per prefix
    next_ids: BTreeMap<String, u32>,
}

impl ShortIdIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the index from a project, or create empty if not found
    pub fn load(project: &Project) -> Self {
        let path = project.root().join(INDEX_FILE);
        if let Ok(content) = fs::read_to_string(&path) {
            if let Ok(mut index) = serde_json::from_str::<ShortIdIndex>(&content) {
                index.reverse = index
                    .entries
                    .iter()
                    .map(|(k, v)| (v.clone(), k.clone()))
                    .collect();
                return index;
            }
            tracing::warn!(path = %path.display(), "short id index is corrupt, starting fresh");
        }
        Self::new()
    }

    /// Save the index to a project
    pub fn save(&self, project: &Project) -> std::io::Result<()> {
        let path = project.root().join(INDEX_FILE);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
    }

    /// Add a record ID and return its short ID
    ///
    /// Returns `None` when the ID does not start with a known prefix.
    pub fn add(&mut self, entity_id: String) -> Option<String> {
        if let Some(short_id) = self.reverse.get(&entity_id) {
            return Some(short_id.clone());
        }

        let prefix = EntityPrefix::from_filename(&entity_id)?;
        let counter = self.next_ids.entry(prefix.to_string()).or_insert(1);
        let short_id = format!("{}@{}", prefix, counter);
        *counter += 1;

        self.entries.insert(short_id.clone(), entity_id.clone());
        self.reverse.insert(entity_id, short_id.clone());
        Some(short_id)
    }

    /// Register many IDs at once
    pub fn ensure_all(&mut self, entity_ids: impl IntoIterator<Item = String>) {
        for id in entity_ids {
            self.add(id);
        }
    }

    /// Resolve a short ID reference to a full record ID
    ///
    /// `PREFIX@N` is looked up (case-insensitive prefix); anything else is
    /// passed through for partial matching.
    pub fn resolve(&self, reference: &str) -> Option<String> {
        match reference.split_once('@') {
            Some((prefix, num)) => {
                let key = format!("{}@{}", prefix.to_uppercase(), num);
                self.entries.get(&key).cloned()
            }
            None => Some(reference.to_string()),
        }
    }

    /// Get the short ID for a full record ID
    pub fn get_short_id(&self, entity_id: &str) -> Option<String> {
        self.reverse.get(entity_id).cloned()
    }

    /// Number of entries in the index
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
