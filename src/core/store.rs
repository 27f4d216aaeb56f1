//! Record store - lookup of referenced records by name
//!
//! Rules that need data from another record (spec limits of a parameter,
//! display name of an item) go through [`RecordStore`] instead of touching
//! the filesystem, so the same rule runs against a project directory or an
//! in-memory fixture.

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::entity::Entity;
use crate::core::identity::EntityPrefix;
use crate::core::loader::exact_entity_file;
use crate::core::project::Project;

/// Errors raised while resolving a reference
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    #[error("{} '{name}' not found", .kind.label())]
    NotFound { kind: EntityPrefix, name: String },

    #[error("failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("{} '{name}' is malformed: {message}", .kind.label())]
    Malformed {
        kind: EntityPrefix,
        name: String,
        message: String,
    },
}

/// Synchronous, fallible access to stored records
pub trait RecordStore {
    /// Fetch a whole record by name
    fn get_doc(&self, prefix: EntityPrefix, name: &str) -> Result<JsonValue, LookupError>;

    /// Fetch a single field of a record by name
    ///
    /// A missing or null field is `Ok(None)`; a missing record is an error.
    fn get_value(
        &self,
        prefix: EntityPrefix,
        name: &str,
        field: &str,
    ) -> Result<Option<JsonValue>, LookupError> {
        let doc = self.get_doc(prefix, name)?;
        Ok(doc.get(field).filter(|v| !v.is_null()).cloned())
    }
}

/// Fetch a record and deserialize it into its typed form
pub fn fetch<T: Entity>(store: &dyn RecordStore, name: &str) -> Result<T, LookupError> {
    let doc = store.get_doc(T::PREFIX, name)?;
    from_doc(T::PREFIX, name, doc)
}

fn from_doc<T: DeserializeOwned>(
    kind: EntityPrefix,
    name: &str,
    doc: JsonValue,
) -> Result<T, LookupError> {
    serde_json::from_value(doc).map_err(|e| LookupError::Malformed {
        kind,
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// Record store backed by the YAML files of a project
#[derive(Debug, Clone)]
pub struct ProjectStore {
    project: Project,
}

impl ProjectStore {
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }
}

impl RecordStore for ProjectStore {
    fn get_doc(&self, prefix: EntityPrefix, name: &str) -> Result<JsonValue, LookupError> {
        let not_found = || LookupError::NotFound {
            kind: prefix,
            name: name.to_string(),
        };

        if name.trim().is_empty() {
            return Err(not_found());
        }

        let path = exact_entity_file(&self.project.entity_dir(prefix), name.trim())
            .ok_or_else(not_found)?;
        tracing::debug!(kind = %prefix, name, path = %path.display(), "resolved reference");

        let content = std::fs::read_to_string(&path).map_err(|e| LookupError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;

        serde_yml::from_str::<JsonValue>(&content).map_err(|e| LookupError::Malformed {
            kind: prefix,
            name: name.to_string(),
            message: e.to_string(),
        })
    }
}

/// In-memory record store, keyed by kind and name
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    docs: HashMap<(EntityPrefix, String), JsonValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw document under a name
    pub fn insert(&mut self, prefix: EntityPrefix, name: impl Into<String>, doc: JsonValue) {
        self.docs.insert((prefix, name.into()), doc);
    }

    /// Insert a typed record under its own ID
    pub fn insert_entity<T: Entity>(&mut self, entity: &T) -> Result<(), LookupError> {
        let name = entity.id().to_string();
        let doc = serde_json::to_value(entity).map_err(|e| LookupError::Malformed {
            kind: T::PREFIX,
            name: name.clone(),
            message: e.to_string(),
        })?;
        self.insert(T::PREFIX, name, doc);
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn get_doc(&self, prefix: EntityPrefix, name: &str) -> Result<JsonValue, LookupError> {
        self.docs
            .get(&(prefix, name.to_string()))
            .cloned()
            .ok_or_else(|| LookupError::NotFound {
                kind: prefix,
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Item;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_get_value() {
        let mut store = MemoryStore::new();
        store.insert(EntityPrefix::Item, "ITEM-1", json!({"item_name": "Bolt", "uom": null}));

        assert_eq!(
            store.get_value(EntityPrefix::Item, "ITEM-1", "item_name").unwrap(),
            Some(json!("Bolt"))
        );
        assert_eq!(store.get_value(EntityPrefix::Item, "ITEM-1", "uom").unwrap(), None);
        assert_eq!(store.get_value(EntityPrefix::Item, "ITEM-1", "missing").unwrap(), None);
    }

    #[test]
    fn test_memory_store_missing_record() {
        let store = MemoryStore::new();
        let err = store.get_doc(EntityPrefix::Param, "PARAM-X").unwrap_err();
        assert!(matches!(err, LookupError::NotFound { .. }));
        assert_eq!(err.to_string(), "parameter 'PARAM-X' not found");
    }

    #[test]
    fn test_fetch_typed_record() {
        let mut store = MemoryStore::new();
        let item = Item::new("Hex Bolt".to_string(), "qa".to_string());
        store.insert_entity(&item).unwrap();

        let fetched: Item = fetch(&store, &item.id.to_string()).unwrap();
        assert_eq!(fetched.item_name, "Hex Bolt");
    }

    #[test]
    fn test_fetch_malformed_record() {
        let mut store = MemoryStore::new();
        store.insert(EntityPrefix::Item, "ITEM-1", json!({"item_name": 42}));

        let err = fetch::<Item>(&store, "ITEM-1").unwrap_err();
        assert!(matches!(err, LookupError::Malformed { .. }));
    }

    #[test]
    fn test_project_store_reads_yaml() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        let item = Item::new("Gasket".to_string(), "qa".to_string());
        crate::core::loader::write_entity(&project.entity_path(&item.id), &item).unwrap();

        let store = ProjectStore::new(project);
        let name = store
            .get_value(EntityPrefix::Item, &item.id.to_string(), "item_name")
            .unwrap();
        assert_eq!(name, Some(json!("Gasket")));

        let err = store.get_doc(EntityPrefix::Item, "ITEM-NOPE").unwrap_err();
        assert!(matches!(err, LookupError::NotFound { .. }));
        assert!(store.get_doc(EntityPrefix::Item, "  ").is_err());
    }

    #[test]
    fn test_project_store_requires_full_id() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        let item = Item::new("Gasket".to_string(), "qa".to_string());
        crate::core::loader::write_entity(&project.entity_path(&item.id), &item).unwrap();

        let store = ProjectStore::new(project);
        let full = item.id.to_string();
        for fragment in ["ITEM-", &full[..8], &full[5..]] {
            let err = store.get_doc(EntityPrefix::Item, fragment).unwrap_err();
            assert!(matches!(err, LookupError::NotFound { .. }), "{fragment} resolved");
        }
        assert!(store.get_doc(EntityPrefix::Item, &full).is_ok());
    }
}
