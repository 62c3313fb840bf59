//! Dataset loading.
//!
//! The chart input is a nested `{ name, category, value, children }` document:
//! a root, one child per platform, one leaf per game. The default dataset is
//! embedded in the binary; a JSON file of the same shape can replace it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// The embedded top-selling games dataset, grouped by platform.
const EMBEDDED_DATASET: &str = include_str!("videogames.json");

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dataset JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One node of the raw input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Numeric value. Numeric strings (`"82.53"`) are accepted; anything else
    /// is treated as missing.
    #[serde(
        default,
        deserialize_with = "lenient_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DatasetNode>>,
}

impl DatasetNode {
    pub fn leaf(name: &str, category: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            category: Some(category.to_string()),
            value: Some(value),
            children: None,
        }
    }

    pub fn group(name: &str, children: Vec<DatasetNode>) -> Self {
        Self {
            name: name.to_string(),
            category: None,
            value: None,
            children: Some(children),
        }
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[DatasetNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Number of leaves below (or at) this node.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                count += 1;
            }
            stack.extend(node.children());
        }
        count
    }
}

fn lenient_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawValue {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<RawValue>::deserialize(deserializer)? {
        Some(RawValue::Number(n)) => Some(n),
        Some(RawValue::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}

/// Parse a dataset from a JSON document.
pub fn from_json_str(json: &str) -> Result<DatasetNode, DataError> {
    Ok(serde_json::from_str(json)?)
}

/// The dataset compiled into the binary.
pub fn embedded() -> Result<DatasetNode, DataError> {
    from_json_str(EMBEDDED_DATASET)
}

/// Read a dataset from a JSON file.
pub fn load_path(path: &Path) -> Result<DatasetNode, DataError> {
    let json = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_json_str(&json)
}

/// Load the dataset at `path`, or the embedded one when no path is given.
pub fn load(path: Option<&Path>) -> Result<DatasetNode, DataError> {
    let dataset = match path {
        Some(path) => {
            tracing::info!("Loading dataset from {}", path.display());
            load_path(path)?
        }
        None => embedded()?,
    };

    tracing::info!(
        "Dataset '{}': {} groups, {} leaves",
        dataset.name,
        dataset.children().len(),
        dataset.leaf_count()
    );

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dataset_parses() {
        let data = embedded().unwrap();
        assert_eq!(data.name, "Video Game Sales Data Top 100");
        assert!(!data.children().is_empty());
        for platform in data.children() {
            assert!(!platform.is_leaf());
            for game in platform.children() {
                assert!(game.is_leaf());
                assert!(game.value.is_some(), "{} has no value", game.name);
                assert_eq!(game.category.as_deref(), Some(platform.name.as_str()));
            }
        }
    }

    #[test]
    fn string_values_are_coerced() {
        let json = r#"{"name":"Wii Sports","category":"Wii","value":"82.53"}"#;
        let node = from_json_str(json).unwrap();
        assert_eq!(node.value, Some(82.53));
    }

    #[test]
    fn non_numeric_value_is_missing() {
        let json = r#"{"name":"Broken","category":"Wii","value":"n/a"}"#;
        let node = from_json_str(json).unwrap();
        assert_eq!(node.value, None);
    }

    #[test]
    fn null_children_is_a_leaf() {
        let json = r#"{"name":"Tetris","category":"GB","value":30.26,"children":null}"#;
        let node = from_json_str(json).unwrap();
        assert!(node.is_leaf());
        assert_eq!(node.leaf_count(), 1);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(from_json_str("{"), Err(DataError::Parse(_))));
    }
}
