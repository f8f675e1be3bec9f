use crate::error::ConfigError;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// One element of an action's argument list
///
/// `mkdir` expects bare paths, the copy actions expect `[src, dest]` lists.
/// The shape is checked when the action runs, not when the config is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Path(PathBuf),
    List(Vec<PathBuf>),
}

impl Entry {
    pub fn path<P: Into<PathBuf>>(path: P) -> Self {
        Entry::Path(path.into())
    }

    pub fn pair<P: Into<PathBuf>, Q: Into<PathBuf>>(source: P, destination: Q) -> Self {
        Entry::List(vec![source.into(), destination.into()])
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Entry::Path(path) => Some(path),
            Entry::List(_) => None,
        }
    }

    /// View this entry as a copy pair; only a list of exactly two paths qualifies
    pub fn as_copy(&self) -> Option<CopyEntry<'_>> {
        match self {
            Entry::List(paths) => match paths.as_slice() {
                [source, destination] => Some(CopyEntry {
                    source,
                    destination,
                }),
                _ => None,
            },
            Entry::Path(_) => None,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Path(path) => write!(f, "'{}'", path.display()),
            Entry::List(paths) => {
                let items: Vec<String> = paths
                    .iter()
                    .map(|p| format!("'{}'", p.display()))
                    .collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

/// A `[source, destination]` pair borrowed from an [`Entry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyEntry<'a> {
    pub source: &'a Path,
    pub destination: &'a Path,
}

/// Ordered mapping of action names to their argument lists
///
/// Keys run in insertion order. Names are not validated here, so an unknown
/// action only surfaces when the batch is executed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncConfig {
    actions: Vec<(String, Vec<Entry>)>,
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entries for `action`. An existing key keeps its position.
    pub fn insert(&mut self, action: impl Into<String>, entries: Vec<Entry>) -> &mut Self {
        let action = action.into();
        match self.actions.iter_mut().find(|(name, _)| *name == action) {
            Some((_, existing)) => *existing = entries,
            None => self.actions.push((action, entries)),
        }
        self
    }

    pub fn with(mut self, action: impl Into<String>, entries: Vec<Entry>) -> Self {
        self.insert(action, entries);
        self
    }

    pub fn get(&self, action: &str) -> Option<&[Entry]> {
        self.actions
            .iter()
            .find(|(name, _)| name == action)
            .map(|(_, entries)| entries.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Entry])> {
        self.actions
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a configuration file; `.json` is parsed as JSON, anything else as YAML
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_path_buf(),
            error,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }
}

impl Serialize for SyncConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.actions.len()))?;
        for (action, entries) in &self.actions {
            map.serialize_entry(action, entries)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SyncConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SyncConfigVisitor;

        impl<'de> Visitor<'de> for SyncConfigVisitor {
            type Value = SyncConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of action names to entry lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SyncConfig, A::Error> {
                let mut config = SyncConfig::new();
                while let Some((action, entries)) = map.next_entry::<String, Vec<Entry>>()? {
                    if config.get(&action).is_some() {
                        return Err(de::Error::custom(format!("duplicate action '{action}'")));
                    }
                    config.actions.push((action, entries));
                }
                Ok(config)
            }
        }

        deserializer.deserialize_map(SyncConfigVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_preserves_key_order() {
        let yaml = "copy_opt:\n  - [a.txt, out/a.txt]\nmkdir:\n  - out\ncopy_req:\n  - [b.txt, out/b.txt]\n";
        let config = SyncConfig::from_yaml_str(yaml).unwrap();
        let names: Vec<&str> = config.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["copy_opt", "mkdir", "copy_req"]);
        assert_eq!(config.get("mkdir").unwrap(), &[Entry::path("out")]);
    }

    #[test]
    fn test_json_preserves_key_order() {
        let json = r#"{"mkdir": ["d1", "d2"], "copy": [["d1/a.txt", "d2/a.txt"]]}"#;
        let config = SyncConfig::from_json_str(json).unwrap();
        let names: Vec<&str> = config.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["mkdir", "copy"]);
        assert_eq!(
            config.get("copy").unwrap(),
            &[Entry::pair("d1/a.txt", "d2/a.txt")]
        );
    }

    #[test]
    fn test_duplicate_action_is_rejected() {
        let json = r#"{"mkdir": ["a"], "mkdir": ["b"]}"#;
        assert!(matches!(
            SyncConfig::from_json_str(json),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_unknown_action_is_kept() {
        let config = SyncConfig::from_yaml_str("link:\n  - [a, b]\n").unwrap();
        assert_eq!(config.len(), 1);
        assert!(config.get("link").is_some());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut config = SyncConfig::new()
            .with("mkdir", vec![Entry::path("a")])
            .with("copy_opt", vec![]);
        config.insert("mkdir", vec![Entry::path("b")]);

        let names: Vec<&str> = config.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["mkdir", "copy_opt"]);
        assert_eq!(config.get("mkdir").unwrap(), &[Entry::path("b")]);
    }

    #[test]
    fn test_copy_entry_requires_exactly_two_paths() {
        assert!(Entry::pair("a", "b").as_copy().is_some());
        assert!(Entry::List(vec!["only_one_element".into()]).as_copy().is_none());
        assert!(Entry::List(vec!["a".into(), "b".into(), "c".into()]).as_copy().is_none());
        assert!(Entry::path("a").as_copy().is_none());
    }

    #[test]
    fn test_entry_display() {
        assert_eq!(Entry::List(vec!["only_one_element".into()]).to_string(), "['only_one_element']");
        assert_eq!(Entry::path("d1").to_string(), "'d1'");
    }

    #[test]
    fn test_serialize_keeps_order() {
        let config = SyncConfig::new()
            .with("mkdir", vec![Entry::path("d1")])
            .with("copy_req", vec![Entry::pair("a", "b")]);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"mkdir":["d1"],"copy_req":[["a","b"]]}"#);
    }
}
