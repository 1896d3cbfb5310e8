//! Parameter frames

use anyhow::{anyhow, bail, Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::ParamValue;
use crate::expr::is_identifier;

/// One scope level of parameters, keeping insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamFrame {
    values: IndexMap<String, ParamValue>,
}

impl ParamFrame {
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    pub fn set<V: Into<ParamValue>>(&mut self, name: &str, value: V) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.values.iter()
    }

    /// Load a frame from a JSON or YAML file holding a flat object
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read parameter file {:?}", path))?;

        let ext = path.extension().and_then(|e| e.to_str());
        let frame: ParamFrame = match ext {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse parameter file {:?}", path))?,
            Some("yml") | Some("yaml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse parameter file {:?}", path))?,
            _ => bail!(
                "Unsupported parameter file {:?}: expected .json, .yml or .yaml",
                path
            ),
        };

        if let Some(bad) = frame.values.keys().find(|k| !is_identifier(k)) {
            bail!("Invalid parameter name {:?} in {:?}", bad, path);
        }

        tracing::debug!("Loaded {} parameter(s) from {:?}", frame.len(), path);
        Ok(frame)
    }

    /// Build a frame from `name=value` assignments; values are kept as strings
    pub fn from_assignments<S: AsRef<str>>(assignments: &[S]) -> Result<Self> {
        let mut frame = ParamFrame::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (name, value) = assignment
                .split_once('=')
                .ok_or_else(|| anyhow!("Expected name=value, got {:?}", assignment))?;
            let name = name.trim();
            if !is_identifier(name) {
                bail!("Invalid parameter name {:?}", name);
            }
            frame.set(name, value);
        }
        Ok(frame)
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParamFrame {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// First frame that defines every name in `names`
pub fn select_frame<'a>(frames: &'a [ParamFrame], names: &[String]) -> Option<&'a ParamFrame> {
    frames
        .iter()
        .find(|frame| names.iter().all(|name| frame.contains(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_set_and_get() {
        let mut frame = ParamFrame::new();
        frame.set("b", "x");
        frame.set("a", 1);
        assert_eq!(frame.get("a"), Some(&ParamValue::Number(1.0)));
        assert!(frame.contains("b"));
        assert!(!frame.contains("c"));
        let keys: Vec<_> = frame.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_select_frame() {
        let outer: ParamFrame = [("a", "1")].into_iter().collect();
        let inner: ParamFrame = [("a", "2"), ("b", "3")].into_iter().collect();
        let frames = [outer, inner];

        let names = vec!["a".to_string()];
        assert_eq!(select_frame(&frames, &names), Some(&frames[0]));
        let names = vec!["a".to_string(), "b".to_string()];
        assert_eq!(select_frame(&frames, &names), Some(&frames[1]));
        let names = vec!["c".to_string()];
        assert_eq!(select_frame(&frames, &names), None);
    }

    #[test]
    fn test_from_assignments() {
        let frame = ParamFrame::from_assignments(&["a=1", "greeting = hi=there"]).unwrap();
        assert_eq!(frame.get("a"), Some(&ParamValue::from("1")));
        assert_eq!(frame.get("greeting"), Some(&ParamValue::from(" hi=there")));

        assert!(ParamFrame::from_assignments(&["novalue"]).is_err());
        assert!(ParamFrame::from_assignments(&["1x=2"]).is_err());
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"name": "Ada", "score": 3}}"#).unwrap();

        let frame = ParamFrame::load(file.path()).unwrap();
        assert_eq!(frame.get("name"), Some(&ParamValue::from("Ada")));
        assert_eq!(frame.get("score"), Some(&ParamValue::from(3)));
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.yml");
        fs::write(&path, "name: Ada\nscore: 2.5\n").unwrap();

        let frame = ParamFrame::load(&path).unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.get("score"), Some(&ParamValue::from(2.5)));
    }

    #[test]
    fn test_load_rejects_bad_files() {
        let dir = tempfile::tempdir().unwrap();

        let txt = dir.path().join("params.txt");
        fs::write(&txt, "a=1").unwrap();
        assert!(ParamFrame::load(&txt).is_err());

        let nested = dir.path().join("nested.json");
        fs::write(&nested, r#"{"a": {"b": 1}}"#).unwrap();
        assert!(ParamFrame::load(&nested).is_err());

        let bad_name = dir.path().join("bad.json");
        fs::write(&bad_name, r#"{"not a name": 1}"#).unwrap();
        assert!(ParamFrame::load(&bad_name).is_err());

        assert!(ParamFrame::load(dir.path().join("missing.json")).is_err());
    }
}
