//! Denormalized display-name population

use crate::core::entity::is_blank;
use crate::core::identity::EntityPrefix;
use crate::core::store::RecordStore;

/// Copy a referenced record's name field into a blank display field
///
/// Nothing happens when the display field already holds a value or the
/// reference is unset. A failed lookup or an empty/non-string name leaves
/// the display field untouched. Returns whether the field was written.
pub fn fill_from_reference(
    store: &dyn RecordStore,
    display: &mut Option<String>,
    reference: Option<&str>,
    prefix: EntityPrefix,
    field: &str,
) -> bool {
    if !is_blank(display.as_deref()) {
        return false;
    }
    let reference = match reference {
        Some(r) if !r.trim().is_empty() => r,
        _ => return false,
    };

    match store.get_value(prefix, reference, field) {
        Ok(Some(serde_json::Value::String(name))) if !name.trim().is_empty() => {
            tracing::debug!(kind = %prefix, reference, field, "populated display name");
            *display = Some(name);
            true
        }
        Ok(_) => false,
        Err(e) => {
            tracing::debug!(kind = %prefix, reference, error = %e, "display name lookup failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use serde_json::json;

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert(EntityPrefix::Item, "ITEM-1", json!({"item_name": "Amber Vial"}));
        store.insert(EntityPrefix::Item, "ITEM-2", json!({"item_name": ""}));
        store
    }

    #[test]
    fn test_fills_blank_field() {
        let mut name = None;
        assert!(fill_from_reference(&store(), &mut name, Some("ITEM-1"), EntityPrefix::Item, "item_name"));
        assert_eq!(name.as_deref(), Some("Amber Vial"));
    }

    #[test]
    fn test_fills_whitespace_field() {
        let mut name = Some("  ".to_string());
        fill_from_reference(&store(), &mut name, Some("ITEM-1"), EntityPrefix::Item, "item_name");
        assert_eq!(name.as_deref(), Some("Amber Vial"));
    }

    #[test]
    fn test_never_overwrites_existing_value() {
        for reference in [Some("ITEM-1"), Some("ITEM-404"), None] {
            let mut name = Some("Custom".to_string());
            assert!(!fill_from_reference(&store(), &mut name, reference, EntityPrefix::Item, "item_name"));
            assert_eq!(name.as_deref(), Some("Custom"));
        }
    }

    #[test]
    fn test_failed_lookup_leaves_blank() {
        let mut name = None;
        assert!(!fill_from_reference(&store(), &mut name, Some("ITEM-404"), EntityPrefix::Item, "item_name"));
        assert!(name.is_none());
    }

    #[test]
    fn test_empty_name_leaves_blank() {
        let mut name = None;
        fill_from_reference(&store(), &mut name, Some("ITEM-2"), EntityPrefix::Item, "item_name");
        assert!(name.is_none());
    }

    #[test]
    fn test_missing_reference_is_noop() {
        let mut name = None;
        assert!(!fill_from_reference(&store(), &mut name, Some(" "), EntityPrefix::Item, "item_name"));
        assert!(name.is_none());
    }
}
