//! Record identity system using type-prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Record type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityPrefix {
    /// SPC parameter master (spec limits)
    Param,
    /// Parameter specification (per product/customer)
    Pspec,
    /// Control chart definition
    Chart,
    /// Process data point
    Data,
    /// Process capability study
    Study,
    /// SPC alert
    Alrt,
    /// Corrective action
    Capa,
    /// SPC report
    Rpt,
    /// Production batch
    Batch,
    /// Batch processing history entry
    Hist,
    /// Shop-floor transaction
    Txn,
    /// Shop-floor operator
    Opr,
    /// Item master
    Item,
    /// Employee master
    Emp,
}

impl EntityPrefix {
    /// Get the string representation of the prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Param => "PARAM",
            EntityPrefix::Pspec => "PSPEC",
            EntityPrefix::Chart => "CHART",
            EntityPrefix::Data => "DATA",
            EntityPrefix::Study => "STUDY",
            EntityPrefix::Alrt => "ALRT",
            EntityPrefix::Capa => "CAPA",
            EntityPrefix::Rpt => "RPT",
            EntityPrefix::Batch => "BATCH",
            EntityPrefix::Hist => "HIST",
            EntityPrefix::Txn => "TXN",
            EntityPrefix::Opr => "OPR",
            EntityPrefix::Item => "ITEM",
            EntityPrefix::Emp => "EMP",
        }
    }

    /// Get all valid prefixes
    pub fn all() -> &'static [EntityPrefix] {
        &[
            EntityPrefix::Param,
            EntityPrefix::Pspec,
            EntityPrefix::Chart,
            EntityPrefix::Data,
            EntityPrefix::Study,
            EntityPrefix::Alrt,
            EntityPrefix::Capa,
            EntityPrefix::Rpt,
            EntityPrefix::Batch,
            EntityPrefix::Hist,
            EntityPrefix::Txn,
            EntityPrefix::Opr,
            EntityPrefix::Item,
            EntityPrefix::Emp,
        ]
    }

    /// Human-readable record kind, used in messages
    pub fn label(&self) -> &'static str {
        match self {
            EntityPrefix::Param => "parameter",
            EntityPrefix::Pspec => "parameter specification",
            EntityPrefix::Chart => "control chart",
            EntityPrefix::Data => "data point",
            EntityPrefix::Study => "capability study",
            EntityPrefix::Alrt => "alert",
            EntityPrefix::Capa => "corrective action",
            EntityPrefix::Rpt => "report",
            EntityPrefix::Batch => "batch",
            EntityPrefix::Hist => "history entry",
            EntityPrefix::Txn => "transaction",
            EntityPrefix::Opr => "operator",
            EntityPrefix::Item => "item",
            EntityPrefix::Emp => "employee",
        }
    }

    /// Try to determine record prefix from a filename
    /// Looks for patterns like "PARAM-xxx.sqt.yaml"
    pub fn from_filename(filename: &str) -> Option<Self> {
        let upper = filename.to_uppercase();
        Self::all()
            .iter()
            .find(|prefix| upper.starts_with(&format!("{}-", prefix.as_str())))
            .copied()
    }

    /// Try to determine record prefix from a file path by examining parent directories
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        if let Some(filename) = path.file_name() {
            if let Some(prefix) = Self::from_filename(&filename.to_string_lossy()) {
                return Some(prefix);
            }
        }

        for component in path.components().rev() {
            if let std::path::Component::Normal(os_str) = component {
                let dir_name = os_str.to_string_lossy().to_lowercase();
                match dir_name.as_str() {
                    "parameters" => return Some(EntityPrefix::Param),
                    "specifications" => return Some(EntityPrefix::Pspec),
                    "charts" => return Some(EntityPrefix::Chart),
                    "data" => return Some(EntityPrefix::Data),
                    "studies" => return Some(EntityPrefix::Study),
                    "alerts" => return Some(EntityPrefix::Alrt),
                    "capas" => return Some(EntityPrefix::Capa),
                    "reports" => return Some(EntityPrefix::Rpt),
                    "batches" => return Some(EntityPrefix::Batch),
                    "history" => return Some(EntityPrefix::Hist),
                    "transactions" => return Some(EntityPrefix::Txn),
                    "operators" => return Some(EntityPrefix::Opr),
                    "items" => return Some(EntityPrefix::Item),
                    "employees" => return Some(EntityPrefix::Emp),
                    _ => {}
                }
            }
        }
        None
    }
}

impl fmt::Display for EntityPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::all()
            .iter()
            .find(|prefix| prefix.as_str() == upper)
            .copied()
            .ok_or_else(|| IdParseError::InvalidPrefix(s.to_string()))
    }
}

/// A unique record identifier combining a type prefix and ULID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId {
    prefix: EntityPrefix,
    ulid: Ulid,
}

impl EntityId {
    /// Create a new EntityId with the given prefix
    pub fn new(prefix: EntityPrefix) -> Self {
        Self {
            prefix,
            ulid: Ulid::new(),
        }
    }

    /// Create an EntityId from a prefix and existing ULID
    pub fn from_parts(prefix: EntityPrefix, ulid: Ulid) -> Self {
        Self { prefix, ulid }
    }

    pub fn prefix(&self) -> EntityPrefix {
        self.prefix
    }

    pub fn ulid(&self) -> Ulid {
        self.ulid
    }

    /// Parse an EntityId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.ulid)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        let prefix = prefix_str.parse()?;
        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self { prefix, ulid })
    }
}

impl Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing record IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid record prefix: '{0}' (valid: PARAM, PSPEC, CHART, DATA, STUDY, ALRT, CAPA, RPT, BATCH, HIST, TXN, OPR, ITEM, EMP)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in record ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_entity_id_generation() {
        let id = EntityId::new(EntityPrefix::Param);
        assert!(id.to_string().starts_with("PARAM-"));
        assert_eq!(id.to_string().len(), 32); // PARAM- (6) + ULID (26)
    }

    #[test]
    fn test_entity_id_parsing() {
        let original = EntityId::new(EntityPrefix::Data);
        let parsed = EntityId::parse(&original.to_string()).unwrap();
        assert_eq!(parsed, original);
        assert_eq!(parsed.prefix(), EntityPrefix::Data);
    }

    #[test]
    fn test_entity_id_invalid_prefix() {
        let err = EntityId::parse("REQ-01HQ3K4N5M6P7Q8R9S0T1U2V3W").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidPrefix(_)));
    }

    #[test]
    fn test_entity_id_missing_delimiter() {
        let err = EntityId::parse("PARAM01HQ3K4N").unwrap_err();
        assert!(matches!(err, IdParseError::MissingDelimiter(_)));
    }

    #[test]
    fn test_prefix_case_insensitive() {
        assert_eq!("chart".parse::<EntityPrefix>().unwrap(), EntityPrefix::Chart);
        assert_eq!("Batch".parse::<EntityPrefix>().unwrap(), EntityPrefix::Batch);
    }

    #[test]
    fn test_prefix_from_filename() {
        assert_eq!(
            EntityPrefix::from_filename("PSPEC-01HQ.sqt.yaml"),
            Some(EntityPrefix::Pspec)
        );
        assert_eq!(
            EntityPrefix::from_filename("PARAM-01HQ.sqt.yaml"),
            Some(EntityPrefix::Param)
        );
        assert_eq!(EntityPrefix::from_filename("notes.yaml"), None);
    }

    #[test]
    fn test_prefix_from_path_uses_directory() {
        let path = Path::new("project/manufacturing/batches/custom.sqt.yaml");
        assert_eq!(EntityPrefix::from_path(path), Some(EntityPrefix::Batch));
    }
}
