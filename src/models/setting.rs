use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SettingItem {
    pub id: i64,
    pub key: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// PUT /api/settings/:key
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingValue {
    pub value: Option<String>,
}

/// Settings keys are compared and stored without surrounding whitespace.
pub fn normalize_key(raw: &str) -> &str {
    raw.trim()
}

/// One element of the bulk update array. Anything that does not fit is skipped, not rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingEntry {
    pub key: String,
    pub value: String,
}

impl SettingEntry {
    /// Accepts only an object with a non-blank string `key` and `value`.
    pub fn from_json(raw: &serde_json::Value) -> Option<Self> {
        let key = normalize_key(raw.get("key")?.as_str()?);
        let value = raw.get("value")?.as_str()?;
        if key.is_empty() || value.trim().is_empty() {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn well_formed_entry_is_accepted() {
        let entry = SettingEntry::from_json(&json!({"key": "primary-color", "value": "#ff0000"}));
        assert_eq!(
            entry,
            Some(SettingEntry {
                key: "primary-color".into(),
                value: "#ff0000".into()
            })
        );
    }

    #[test]
    fn entry_keys_are_normalized() {
        let entry = SettingEntry::from_json(&json!({"key": " site-name ", "value": "Janur"}));
        assert_eq!(entry.map(|e| e.key).as_deref(), Some("site-name"));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        assert!(SettingEntry::from_json(&json!({"key": "", "value": "x"})).is_none());
        assert!(SettingEntry::from_json(&json!({"key": "site-name"})).is_none());
        assert!(SettingEntry::from_json(&json!({"key": "site-name", "value": 3})).is_none());
        assert!(SettingEntry::from_json(&json!({"key": "site-name", "value": " "})).is_none());
        assert!(SettingEntry::from_json(&json!("primary-color")).is_none());
    }
}
