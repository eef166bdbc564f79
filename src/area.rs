//! Administrative division lookup.
//!
//! Identity numbers only carry region *codes*. Names come from an
//! [`AreaDirectory`], which an [`IdentityNumber`](crate::IdentityNumber)
//! opens lazily on the first name query. [`AreaTable`] is the default
//! directory: the built-in province table, optionally extended from a JSON
//! file of `{ "code": "name" }` pairs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Province-level divisions (GB/T 2260), always present in an [`AreaTable`]
/// unless disabled in its config.
pub const BUILTIN_PROVINCES: [(&str, &str); 34] = [
    ("110000", "北京市"),
    ("120000", "天津市"),
    ("130000", "河北省"),
    ("140000", "山西省"),
    ("150000", "内蒙古自治区"),
    ("210000", "辽宁省"),
    ("220000", "吉林省"),
    ("230000", "黑龙江省"),
    ("310000", "上海市"),
    ("320000", "江苏省"),
    ("330000", "浙江省"),
    ("340000", "安徽省"),
    ("350000", "福建省"),
    ("360000", "江西省"),
    ("370000", "山东省"),
    ("410000", "河南省"),
    ("420000", "湖北省"),
    ("430000", "湖南省"),
    ("440000", "广东省"),
    ("450000", "广西壮族自治区"),
    ("460000", "海南省"),
    ("500000", "重庆市"),
    ("510000", "四川省"),
    ("520000", "贵州省"),
    ("530000", "云南省"),
    ("540000", "西藏自治区"),
    ("610000", "陕西省"),
    ("620000", "甘肃省"),
    ("630000", "青海省"),
    ("640000", "宁夏回族自治区"),
    ("650000", "新疆维吾尔自治区"),
    ("710000", "台湾省"),
    ("810000", "香港特别行政区"),
    ("820000", "澳门特别行政区"),
];

/// Error type for directory operations.
#[derive(Debug, thiserror::Error)]
pub enum AreaError {
    /// The code has no entry in the directory.
    #[error("Area code not found: {0}")]
    NotFound(String),

    /// The data file could not be read.
    #[error("Failed to read area data from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data file is not a JSON object of code/name pairs.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A named administrative division.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub code: String,
    pub name: String,
}

/// Source of region names.
///
/// `open` receives the config an identity number was built with, untouched.
/// `get` must report unknown codes as [`AreaError::NotFound`].
pub trait AreaDirectory: Sized {
    type Config: Default;

    /// Opens the directory.
    ///
    /// # Errors
    /// Returns `AreaError` if the backing data cannot be loaded.
    fn open(config: &Self::Config) -> Result<Self, AreaError>;

    /// Looks up a six-digit code.
    ///
    /// # Errors
    /// Returns `AreaError::NotFound` if the code is unknown.
    fn get(&self, code: &str) -> Result<Region, AreaError>;
}

const fn default_builtin() -> bool {
    true
}

/// Options for [`AreaTable::open`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaConfig {
    /// JSON file with `{ "code": "name" }` pairs
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Extra entries, applied after the file
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
    /// Seed the table with [`BUILTIN_PROVINCES`]
    #[serde(default = "default_builtin")]
    pub builtin: bool,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            path: None,
            entries: BTreeMap::new(),
            builtin: default_builtin(),
        }
    }
}

impl AreaConfig {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Adds an inline entry.
    #[must_use]
    pub fn entry(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.entries.insert(code.into(), name.into());
        self
    }
}

/// In-memory code to name table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaTable {
    entries: BTreeMap<String, String>,
}

impl AreaTable {
    /// Table holding only the built-in provinces
    pub fn builtin() -> Self {
        BUILTIN_PROVINCES.iter().copied().collect()
    }

    /// Parses a JSON object of code/name pairs.
    ///
    /// # Errors
    /// Returns `AreaError::Json` on malformed input.
    pub fn from_json_str(json: &str) -> Result<Self, AreaError> {
        let entries: BTreeMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Reads a JSON object of code/name pairs from disk.
    ///
    /// # Errors
    /// Returns `AreaError::Io` if the file cannot be read and
    /// `AreaError::Json` if it cannot be parsed.
    pub fn from_path(path: &Path) -> Result<Self, AreaError> {
        let json = std::fs::read_to_string(path).map_err(|source| AreaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.entries.insert(code.into(), name.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C: Into<String>, N: Into<String>> FromIterator<(C, N)> for AreaTable {
    fn from_iter<I: IntoIterator<Item = (C, N)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(code, name)| (code.into(), name.into()))
                .collect(),
        }
    }
}

impl AreaDirectory for AreaTable {
    type Config = AreaConfig;

    fn open(config: &AreaConfig) -> Result<Self, AreaError> {
        let mut table = if config.builtin {
            Self::builtin()
        } else {
            Self::default()
        };
        if let Some(path) = &config.path {
            table.entries.extend(Self::from_path(path)?.entries);
        }
        table
            .entries
            .extend(config.entries.iter().map(|(c, n)| (c.clone(), n.clone())));
        debug!(entries = table.len(), path = ?config.path, "area table opened");
        Ok(table)
    }

    fn get(&self, code: &str) -> Result<Region, AreaError> {
        trace!(code, "area lookup");
        self.entries
            .get(code)
            .map(|name| Region {
                code: code.to_owned(),
                name: name.clone(),
            })
            .ok_or_else(|| AreaError::NotFound(code.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_provinces() {
        let table = AreaTable::builtin();
        assert_eq!(table.len(), BUILTIN_PROVINCES.len());
        assert_eq!(table.get("110000").unwrap().name, "北京市");
        assert_eq!(table.get("440000").unwrap().name, "广东省");
        assert!(BUILTIN_PROVINCES.iter().all(|(c, _)| c.ends_with("0000")));
    }

    #[test]
    fn test_not_found() {
        let table = AreaTable::builtin();
        let err = table.get("110101").unwrap_err();
        assert!(matches!(err, AreaError::NotFound(ref c) if c == "110101"));
        assert_eq!(err.to_string(), "Area code not found: 110101");
    }

    #[test]
    fn test_open_default_config() {
        let table = AreaTable::open(&AreaConfig::default()).unwrap();
        assert_eq!(table, AreaTable::builtin());
    }

    #[test]
    fn test_open_with_inline_entries() {
        let config = AreaConfig::default()
            .entry("110100", "市辖区")
            .entry("110000", "Beijing");
        let table = AreaTable::open(&config).unwrap();
        assert_eq!(table.get("110100").unwrap().name, "市辖区");
        // Inline entries override the built-in table
        assert_eq!(table.get("110000").unwrap().name, "Beijing");
    }

    #[test]
    fn test_open_without_builtin() {
        let config = AreaConfig {
            builtin: false,
            ..AreaConfig::default()
        };
        let table = AreaTable::open(&config).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_open_from_file() {
        let path = std::env::temp_dir().join(format!("areas-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"110101": "东城区", "110100": "市辖区"}"#).unwrap();

        let table = AreaTable::open(&AreaConfig::with_path(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(table.get("110101").unwrap().name, "东城区");
        assert_eq!(table.get("110000").unwrap().name, "北京市");
    }

    #[test]
    fn test_open_missing_file() {
        let config = AreaConfig::with_path("/nonexistent/areas.json");
        assert!(matches!(
            AreaTable::open(&config),
            Err(AreaError::Io { .. })
        ));
    }

    #[test]
    fn test_from_json_str_rejects_non_object() {
        assert!(matches!(
            AreaTable::from_json_str("[1, 2]"),
            Err(AreaError::Json(_))
        ));
    }

    #[test]
    fn test_config_deserialize() {
        let config: AreaConfig =
            serde_json::from_str(r#"{"path": "/data/areas.json"}"#).unwrap();
        assert_eq!(config.path, Some(PathBuf::from("/data/areas.json")));
        assert!(config.builtin);
        assert!(config.entries.is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let table: AreaTable = [("320100", "南京市")].into_iter().collect();
        assert_eq!(
            table.get("320100").unwrap(),
            Region {
                code: "320100".to_owned(),
                name: "南京市".to_owned()
            }
        );
    }
}
