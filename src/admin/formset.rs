use serde::Deserialize;
use std::collections::HashSet;

use super::fields::FormErrors;
use crate::utils::error::AppError;

/// One submitted row of the event configuration inline.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigurationSubmission {
    #[serde(default)]
    pub key: String,
    pub value: Option<String>,
    /// Remove the stored row with this key.
    #[serde(default)]
    pub delete: bool,
}

/// Rows to write and keys to remove after cleaning a submitted inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedConfigurations {
    pub upserts: Vec<(String, Option<String>)>,
    pub deletions: Vec<String>,
}

/// Drops untouched blank rows, trims keys and rejects duplicates.
pub fn clean_configuration_rows(
    rows: Vec<ConfigurationSubmission>,
) -> Result<CleanedConfigurations, AppError> {
    let mut cleaned = CleanedConfigurations::default();
    let mut seen = HashSet::new();
    let mut errors = FormErrors::new();

    for row in rows {
        let key = row.key.trim().to_string();
        if key.is_empty() {
            continue;
        }

        errors.max_length("key", &key).optional("value", &row.value);
        if !seen.insert(key.clone()) {
            errors.check(false, &format!("Duplicate configuration key '{}'", key));
            continue;
        }

        if row.delete {
            cleaned.deletions.push(key);
        } else {
            cleaned.upserts.push((key, row.value));
        }
    }

    errors.finish()?;
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, value: Option<&str>, delete: bool) -> ConfigurationSubmission {
        ConfigurationSubmission {
            key: key.to_string(),
            value: value.map(str::to_string),
            delete,
        }
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let cleaned = clean_configuration_rows(vec![
            row(" HAS_DEFAULT_TICKET ", Some("false"), false),
            row("", Some("ignored"), false),
            row("   ", None, true),
            row("OLD_KEY", None, true),
        ])
        .unwrap();

        assert_eq!(
            cleaned.upserts,
            vec![("HAS_DEFAULT_TICKET".to_string(), Some("false".to_string()))]
        );
        assert_eq!(cleaned.deletions, vec!["OLD_KEY".to_string()]);
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let result = clean_configuration_rows(vec![
            row("DEFAULT_TICKET_ID", Some("a"), false),
            row("DEFAULT_TICKET_ID", Some("b"), false),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_oversized_value_is_rejected() {
        let long = "x".repeat(300);
        let result = clean_configuration_rows(vec![row("K", Some(&long), false)]);
        assert!(result.is_err());
    }
}
