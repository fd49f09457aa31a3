//! Online presence configuration
//!
//! Display settings for the "who's online" widget. Stored through the same
//! document store as the SEO document and normalized on every read and write.
//! The live roster itself comes from the game database and is not served here.

use crate::store::StoredDocument;
use serde::{Deserialize, Deserializer, Serialize};

pub const REFRESH_SECONDS_MIN: u32 = 5;
pub const REFRESH_SECONDS_MAX: u32 = 300;
pub const LIST_LIMIT_MIN: u32 = 1;
pub const LIST_LIMIT_MAX: u32 = 50;
pub const LABEL_MAX_CHARS: usize = 40;

const DEFAULT_LABEL: &str = "Online now";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresenceConfig {
    pub enabled: bool,
    pub show_count: bool,
    pub show_list: bool,
    #[serde(deserialize_with = "saturating_u32")]
    pub refresh_seconds: u32,
    #[serde(deserialize_with = "saturating_u32")]
    pub list_limit: u32,
    pub label: String,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            show_count: true,
            show_list: false,
            refresh_seconds: 30,
            list_limit: 10,
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

/// Any JSON number, rounded and saturated into `u32`; `normalize` clamps it
/// into range afterwards so one bad number never discards the whole config.
fn saturating_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    // float-to-int casts saturate and map NaN to 0
    Ok(value.round() as u32)
}

impl StoredDocument for PresenceConfig {
    const KIND: &'static str = "presence";

    fn fallback() -> Self {
        Self::default()
    }

    fn normalize(self) -> Self {
        let label = self.label.trim();
        let label = if label.is_empty() {
            DEFAULT_LABEL.to_string()
        } else {
            label.chars().take(LABEL_MAX_CHARS).collect()
        };

        Self {
            refresh_seconds: self
                .refresh_seconds
                .clamp(REFRESH_SECONDS_MIN, REFRESH_SECONDS_MAX),
            list_limit: self.list_limit.clamp(LIST_LIMIT_MIN, LIST_LIMIT_MAX),
            label,
            ..self
        }
    }
}
