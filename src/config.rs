use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::analyzers::snapshots::DEFAULT_PALETTE;

/// Where a comparison set is shown. Each view caps its set differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ComparisonContext {
    /// The course overview page.
    Overview,
    /// The dedicated grades page.
    #[default]
    Grades,
}

impl ComparisonContext {
    pub fn default_max_snapshots(self) -> usize {
        match self {
            ComparisonContext::Overview => 4,
            ComparisonContext::Grades => 3,
        }
    }
}

/// Limits and colors for a comparison set.
///
/// Stored as a plain JSON object on disk; both fields are optional:
/// ```json
/// {
///   "max_snapshots": 3,
///   "palette": ["#8884d8", "#82ca9d", "#ffc658"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareConfig {
    pub max_snapshots: usize,
    pub palette: Vec<String>,
}

impl CompareConfig {
    pub fn for_context(context: ComparisonContext) -> Self {
        Self {
            max_snapshots: context.default_max_snapshots(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Loads the config from a JSON file at `path`, filling missing fields
    /// from the defaults of `context`.
    pub fn load(path: &str, context: ComparisonContext) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content, context)
    }

    pub fn from_json(content: &str, context: ComparisonContext) -> Result<Self> {
        #[derive(Deserialize)]
        struct Partial {
            max_snapshots: Option<usize>,
            palette: Option<Vec<String>>,
        }

        let partial: Partial = serde_json::from_str(content)?;
        let defaults = Self::for_context(context);
        let config = Self {
            max_snapshots: partial.max_snapshots.unwrap_or(defaults.max_snapshots),
            palette: partial.palette.unwrap_or(defaults.palette),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_snapshots == 0 {
            bail!("max_snapshots must be at least 1");
        }
        if self.palette.is_empty() {
            bail!("palette must contain at least one color");
        }
        Ok(())
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self::for_context(ComparisonContext::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_caps() {
        assert_eq!(CompareConfig::for_context(ComparisonContext::Overview).max_snapshots, 4);
        assert_eq!(CompareConfig::for_context(ComparisonContext::Grades).max_snapshots, 3);
        assert_eq!(CompareConfig::default().palette.len(), DEFAULT_PALETTE.len());
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = CompareConfig::from_json(r#"{"max_snapshots": 2}"#, ComparisonContext::Overview)
            .unwrap();
        assert_eq!(config.max_snapshots, 2);
        assert_eq!(config.palette[0], DEFAULT_PALETTE[0]);

        let config =
            CompareConfig::from_json(r#"{"palette": ["red"]}"#, ComparisonContext::Overview).unwrap();
        assert_eq!(config.max_snapshots, 4);
        assert_eq!(config.palette, vec!["red".to_string()]);
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        assert!(CompareConfig::from_json(r#"{"max_snapshots": 0}"#, ComparisonContext::Grades).is_err());
        assert!(CompareConfig::from_json(r#"{"palette": []}"#, ComparisonContext::Grades).is_err());
        assert!(CompareConfig::from_json("not json", ComparisonContext::Grades).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = format!("{}/grade_compare_test_config.json", std::env::temp_dir().display());
        std::fs::write(&path, r#"{"max_snapshots": 5}"#).unwrap();

        let config = CompareConfig::load(&path, ComparisonContext::Grades).unwrap();
        assert_eq!(config.max_snapshots, 5);

        std::fs::remove_file(&path).unwrap();
    }
}
