//! Procrastination patterns and the operating-system summary built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoachError, Result};

/// A recurring situation in which the user postpones work, with its remedy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcrastinationPattern {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub pattern_type: String,
    /// First action small enough to take in under five minutes.
    pub micro_step: String,
    pub trigger_phrases: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternInput {
    pub description: String,
    pub pattern_type: String,
    pub micro_step: String,
    #[serde(default)]
    pub trigger_phrases: Vec<String>,
}

impl PatternInput {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("description", &self.description),
            ("patternType", &self.pattern_type),
            ("microStep", &self.micro_step),
        ] {
            if value.trim().is_empty() {
                return Err(CoachError::InvalidInput(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Personal working rules distilled at the end of the course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OperatingSystem {
    pub user_id: String,
    pub planning_rules: Vec<String>,
    pub anti_procrastination_rules: Vec<String>,
    pub visible_changes: Vec<String>,
    pub ai_summary: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingSystemInput {
    #[serde(default)]
    pub planning_rules: Vec<String>,
    #[serde(default)]
    pub anti_procrastination_rules: Vec<String>,
    #[serde(default)]
    pub visible_changes: Vec<String>,
    pub ai_summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_input_requires_text() {
        let input = PatternInput {
            description: "Odkládám reporty".to_owned(),
            pattern_type: "Nejasné zadání".to_owned(),
            micro_step: " ".to_owned(),
            trigger_phrases: vec![],
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_pattern_input_trigger_phrases_default() {
        let input: PatternInput = serde_json::from_str(
            r#"{"description":"d","patternType":"Velký úkol","microStep":"Otevřít dokument"}"#,
        )
        .unwrap();
        assert!(input.trigger_phrases.is_empty());
        assert!(input.validate().is_ok());
    }
}
