//! Ordered category rules, the ignore list, and the policy for time that
//! no rule claims.
//!
//! A taxonomy can be loaded from a JSON file so categories can change
//! without a rebuild:
//!
//! ```json
//! {
//!   "categories": ["Research", "Support"],
//!   "rules": [
//!     {"pattern": "R&D -", "category": "Research"},
//!     {"pattern": "Support -", "category": "Support"}
//!   ],
//!   "ignore": ["Office", "Home"],
//!   "unclassified": {"name": "Other", "include": true, "position": 1}
//! }
//! ```
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::AllocationError;

const RESEARCH: &str = "R&D / Pre-Sales (Solution building, Internal team standups)";
const ENGINEERING: &str = "Engineering framework support (Team CDCC & Simplistic)";
const CONRADX: &str = "ConradX / Substack";
const FYP_ADVISORY: &str = "Fast FYP Advisory";

/// Summaries containing `pattern` are assigned to `category`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRule {
    pub pattern: String,
    pub category: String,
}

impl CategoryRule {
    pub fn new(pattern: &str, category: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            category: category.to_string(),
        }
    }

    pub fn matches(&self, summary: &str) -> bool {
        summary.contains(&self.pattern)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Unclassified {
    #[serde(default = "default_unclassified_name")]
    pub name: String,
    /// Report the unclassified bucket alongside the declared categories
    #[serde(default)]
    pub include: bool,
    /// Index among the reported buckets, appended last when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

fn default_unclassified_name() -> String {
    "Other".to_string()
}

impl Default for Unclassified {
    fn default() -> Self {
        Self {
            name: default_unclassified_name(),
            include: false,
            position: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Taxonomy {
    /// Category names in the order they are reported
    pub categories: Vec<String>,
    /// Rules in the order they are tried
    pub rules: Vec<CategoryRule>,
    /// Event summaries excluded outright (exact, case-sensitive)
    #[serde(default)]
    pub ignore: BTreeSet<String>,
    #[serde(default)]
    pub unclassified: Unclassified,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            categories: [RESEARCH, ENGINEERING, CONRADX, FYP_ADVISORY]
                .into_iter()
                .map(String::from)
                .collect(),
            rules: vec![
                CategoryRule::new("FYP Advisory -", FYP_ADVISORY),
                CategoryRule::new("R&D -", RESEARCH),
                CategoryRule::new("Engineering Framework Support -", ENGINEERING),
                CategoryRule::new("ConradX -", CONRADX),
            ],
            ignore: [
                "Office",
                "Home",
                "Break - Lunch Time",
                "Break - Table Tennis",
                "Break - Jumma Prayer",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            unclassified: Unclassified::default(),
        }
    }
}

impl Taxonomy {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AllocationError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            AllocationError::ConfigurationError(format!(
                "Unable to read taxonomy {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, AllocationError> {
        let taxonomy: Taxonomy = serde_json::from_str(json).map_err(|e| {
            AllocationError::ConfigurationError(format!("Invalid taxonomy: {}", e))
        })?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    pub fn validate(&self) -> Result<(), AllocationError> {
        let mut seen = HashSet::new();
        for name in &self.categories {
            if !seen.insert(name.as_str()) {
                return Err(AllocationError::ConfigurationError(format!(
                    "Duplicate category '{}'",
                    name
                )));
            }
        }

        if seen.contains(self.unclassified.name.as_str()) {
            return Err(AllocationError::ConfigurationError(format!(
                "Unclassified bucket '{}' collides with a declared category",
                self.unclassified.name
            )));
        }

        for rule in &self.rules {
            if rule.pattern.is_empty() {
                return Err(AllocationError::ConfigurationError(format!(
                    "Rule for '{}' has an empty pattern",
                    rule.category
                )));
            }
            if !seen.contains(rule.category.as_str()) {
                return Err(AllocationError::ConfigurationError(format!(
                    "Rule '{}' targets undeclared category '{}'",
                    rule.pattern, rule.category
                )));
            }
        }

        Ok(())
    }

    pub fn is_ignored(&self, summary: &str) -> bool {
        self.ignore.contains(summary)
    }

    /// Category of the first rule matching `summary`, if any.
    pub fn classify(&self, summary: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(summary))
            .map(|rule| rule.category.as_str())
    }
}
