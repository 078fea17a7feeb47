use serde::{Deserialize, Serialize};

use crate::infrastructure::storage::KeyValueStore;

/// Fixed key the preference object is persisted under.
pub const STORAGE_KEY: &str = "rubyroo-a11y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    /// CSS class this size activates on the document root.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Small => "font-size-small",
            Self::Medium => "font-size-medium",
            Self::Large => "font-size-large",
        }
    }

    /// Get all available sizes
    pub fn all() -> &'static [FontSize] {
        &[Self::Small, Self::Medium, Self::Large]
    }
}

/// The persisted accessibility preference set.
///
/// Always fully populated after [`AccessibilitySettings::load`]: missing
/// fields are filled with defaults, and the deprecated `dyslexiaFont` field
/// from old payloads is folded into `bionic_reading` and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilitySettings {
    pub font_size: FontSize,
    pub high_contrast: bool,
    pub reduced_motion: bool,
    pub bionic_reading: bool,
    pub highlight_links: bool,
}

fn default_font_size() -> FontSize {
    FontSize::Medium
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            high_contrast: false,
            reduced_motion: false,
            bionic_reading: false,
            highlight_links: false,
        }
    }
}

/// On-disk shape, including the deprecated bionic-reading field name.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSettings {
    #[serde(default = "default_font_size")]
    font_size: FontSize,
    #[serde(default)]
    high_contrast: bool,
    #[serde(default)]
    reduced_motion: bool,
    #[serde(default)]
    bionic_reading: bool,
    #[serde(default)]
    highlight_links: bool,
    /// Pre-0.2 name for bionic reading. When present it wins.
    #[serde(default)]
    dyslexia_font: Option<bool>,
}

impl From<StoredSettings> for AccessibilitySettings {
    fn from(stored: StoredSettings) -> Self {
        Self {
            font_size: stored.font_size,
            high_contrast: stored.high_contrast,
            reduced_motion: stored.reduced_motion,
            bionic_reading: stored.dyslexia_font.unwrap_or(stored.bionic_reading),
            highlight_links: stored.highlight_links,
        }
    }
}

impl AccessibilitySettings {
    /// Load settings from the store, or defaults if absent or unreadable.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(STORAGE_KEY) {
            Some(raw) => match serde_json::from_str::<StoredSettings>(&raw) {
                Ok(stored) => stored.into(),
                Err(e) => {
                    log::warn!("failed to parse stored settings: {e}; using defaults");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Save settings to the store. Failures are logged and swallowed; the
    /// session continues with in-memory state only.
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("failed to serialize settings: {e}");
                return;
            }
        };
        if let Err(e) = store.set(STORAGE_KEY, &json) {
            log::warn!("failed to persist settings: {e}");
        }
    }
}
