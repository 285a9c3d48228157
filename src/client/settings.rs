use std::collections::BTreeMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{ClientError, ContentClient};
use crate::models::setting::{SettingEntry, SettingItem};

/// Setting key to value.
pub type Settings = BTreeMap<String, String>;

/// Setting keys that drive the site's theme, and the CSS variable each one sets.
pub const THEME_VARIABLES: &[(&str, &str)] = &[
    ("primary-color", "--primary"),
    ("secondary-color", "--secondary"),
    ("accent-color", "--accent"),
    ("background-color", "--background"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn load_settings(client: &ContentClient) -> Result<Settings, ClientError> {
    let req = client.request(Method::GET, "/settings");
    let rows: Vec<SettingItem> = client
        .send(req)
        .await?
        .data
        .ok_or(ClientError::MissingData)?;
    Ok(rows.into_iter().map(|s| (s.key, s.value)).collect())
}

/// Saves `partial` through the bulk endpoint. Failures are reported, not raised.
pub async fn update_settings(client: &ContentClient, partial: &Settings) -> UpdateOutcome {
    let entries: Vec<SettingEntry> = partial
        .iter()
        .map(|(key, value)| SettingEntry {
            key: key.clone(),
            value: value.clone(),
        })
        .collect();

    let req = client.request(Method::POST, "/settings").json(&entries);
    match client.send::<Vec<SettingItem>>(req).await {
        Ok(_) => UpdateOutcome {
            success: true,
            error: None,
        },
        Err(ClientError::Api { message, .. }) => UpdateOutcome {
            success: false,
            error: Some(message),
        },
        Err(e) => {
            tracing::warn!(error = %e, "settings update failed");
            UpdateOutcome {
                success: false,
                error: Some("Failed to update settings".to_string()),
            }
        }
    }
}

/// CSS variable assignments for the theme keys present in `settings`.
/// Values that are not `#rrggbb` colors are skipped.
pub fn theme_variables(settings: &Settings) -> Vec<(&'static str, String)> {
    THEME_VARIABLES
        .iter()
        .filter_map(|(key, variable)| {
            let hsl = hex_to_hsl(settings.get(*key)?)?;
            Some((*variable, hsl))
        })
        .collect()
}

/// `#rrggbb` (hash optional) to the `"H S% L%"` form the stylesheet expects.
pub fn hex_to_hsl(hex: &str) -> Option<String> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| -> Option<f64> {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|v| f64::from(v) / 255.0)
    };
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (mut h, mut s) = (0.0, 0.0);
    if max != min {
        let d = max - min;
        s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        h /= 6.0;
    }

    Some(format!(
        "{} {}% {}%",
        (h * 360.0).round(),
        (s * 100.0).round(),
        (l * 100.0).round()
    ))
}
