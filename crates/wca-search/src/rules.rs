use std::collections::HashSet;
use std::path::Path;

use tracing::warn;

use crate::error::AppError;
use crate::model::RuleEntry;

pub const NOT_FOUND_MESSAGE: &str = "Couldn't find the Regulation or Guideline";

/// The WCA Regulations and Guidelines, loaded once and never mutated.
#[derive(Debug, Default)]
pub struct RulesIndex {
    entries: Vec<RuleEntry>,
}

/// Outcome of [`RulesIndex::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleLookup<'a> {
    Found(&'a RuleEntry),
    NotFound,
}

impl<'a> RuleLookup<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, RuleLookup::Found(_))
    }

    pub fn entry(&self) -> Option<&'a RuleEntry> {
        match *self {
            RuleLookup::Found(entry) => Some(entry),
            RuleLookup::NotFound => None,
        }
    }

    /// The rule text, or the fallback message when nothing matched.
    pub fn message(&self) -> &'a str {
        match *self {
            RuleLookup::Found(entry) => &entry.content_html,
            RuleLookup::NotFound => NOT_FOUND_MESSAGE,
        }
    }
}

impl RulesIndex {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let dataset_error = |message: String| AppError::Dataset {
            path: path.display().to_string(),
            message,
        };
        let content = std::fs::read_to_string(path)
            .map_err(|e| dataset_error(format!("failed to read: {e}")))?;
        let entries: Vec<RuleEntry> = serde_json::from_str(&content)
            .map_err(|e| dataset_error(format!("invalid JSON: {e}")))?;

        if let Some(pos) = entries.iter().position(|e| e.id.is_empty()) {
            return Err(dataset_error(format!("entry #{pos} has an empty id")));
        }

        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: Vec<RuleEntry>) -> Self {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                warn!(id = %entry.id, "duplicate rule id, first entry wins");
            }
        }
        Self { entries }
    }

    /// Exact, case-sensitive match on the rule id. First match wins.
    pub fn lookup(&self, id: &str) -> RuleLookup<'_> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map_or(RuleLookup::NotFound, RuleLookup::Found)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
