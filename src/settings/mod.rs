//! User settings
//!
//! Settings are loaded once from a [`KeyValueStore`], fall back to defaults
//! when absent or unreadable, and are written back on every change.

use crate::error::{Result, TaxwiseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod store;

pub use store::{JsonFileStore, KeyValueStore, MemoryStore};

/// Storage key holding the serialized settings
pub const SETTINGS_KEY: &str = "taxAssistantSettings";

/// How much detail the assistant should give
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerbosityLevel {
    Low,
    #[default]
    Medium,
    High,
}

/// Accent colour for the interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Blue,
    Green,
    Neutral,
}

/// Deduction method preferred in calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMethod {
    #[default]
    Standard,
    Itemized,
}

macro_rules! lowercase_enum_str {
    ($ty:ty, $label:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Lowercase name as stored
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = TaxwiseError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($name => Ok(Self::$variant),)+
                    other => Err(TaxwiseError::Validation(format!(
                        "invalid {} '{}': expected one of {}",
                        $label,
                        other,
                        [$($name),+].join(", ")
                    ))),
                }
            }
        }
    };
}

lowercase_enum_str!(VerbosityLevel, "verbosity level", {
    Low => "low",
    Medium => "medium",
    High => "high",
});

lowercase_enum_str!(ColorTheme, "color theme", {
    Blue => "blue",
    Green => "green",
    Neutral => "neutral",
});

lowercase_enum_str!(CalculationMethod, "calculation method", {
    Standard => "standard",
    Itemized => "itemized",
});

impl VerbosityLevel {
    /// Short explanation shown next to the option
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Brief answers with minimal detail",
            Self::Medium => "Moderate detail with explanations",
            Self::High => "Thorough explanations with examples",
        }
    }

    /// Extra system prompt instruction for this level
    pub fn prompt_hint(&self) -> Option<&'static str> {
        match self {
            Self::Low => Some("Keep answers brief and skip detailed derivations."),
            Self::Medium => None,
            Self::High => Some("Give thorough explanations and include worked examples."),
        }
    }
}

impl CalculationMethod {
    /// Short explanation shown next to the option
    pub fn description(&self) -> &'static str {
        match self {
            Self::Standard => "Uses standard deductions by default",
            Self::Itemized => "Focuses on itemized deductions",
        }
    }
}

/// Persisted user preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub dark_mode: bool,

    #[serde(default)]
    pub verbosity_level: VerbosityLevel,

    #[serde(default)]
    pub color_theme: ColorTheme,

    #[serde(default)]
    pub preferred_calculation_method: CalculationMethod,

    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

fn default_notifications() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            verbosity_level: VerbosityLevel::default(),
            color_theme: ColorTheme::default(),
            preferred_calculation_method: CalculationMethod::default(),
            notifications: default_notifications(),
        }
    }
}

impl Settings {
    /// Current value of `key`, formatted as it would be typed
    pub fn value_of(&self, key: SettingKey) -> String {
        match key {
            SettingKey::DarkMode => self.dark_mode.to_string(),
            SettingKey::VerbosityLevel => self.verbosity_level.to_string(),
            SettingKey::ColorTheme => self.color_theme.to_string(),
            SettingKey::PreferredCalculationMethod => {
                self.preferred_calculation_method.to_string()
            }
            SettingKey::Notifications => self.notifications.to_string(),
        }
    }

    /// Parse `value` and assign it to the field named by `key`
    ///
    /// # Errors
    ///
    /// Returns a validation error if `value` is not valid for the field
    pub fn apply(&mut self, key: SettingKey, value: &str) -> Result<()> {
        match key {
            SettingKey::DarkMode => self.dark_mode = parse_bool(key, value)?,
            SettingKey::VerbosityLevel => self.verbosity_level = value.parse()?,
            SettingKey::ColorTheme => self.color_theme = value.parse()?,
            SettingKey::PreferredCalculationMethod => {
                self.preferred_calculation_method = value.parse()?
            }
            SettingKey::Notifications => self.notifications = parse_bool(key, value)?,
        }
        Ok(())
    }
}

fn parse_bool(key: SettingKey, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(TaxwiseError::Validation(format!(
            "invalid value '{}' for {}: expected true or false",
            other, key
        ))
        .into()),
    }
}

/// Name of a single setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    DarkMode,
    VerbosityLevel,
    ColorTheme,
    PreferredCalculationMethod,
    Notifications,
}

impl SettingKey {
    /// Every setting in display order
    pub const ALL: [SettingKey; 5] = [
        SettingKey::DarkMode,
        SettingKey::VerbosityLevel,
        SettingKey::ColorTheme,
        SettingKey::PreferredCalculationMethod,
        SettingKey::Notifications,
    ];

    /// camelCase name used in storage and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DarkMode => "darkMode",
            Self::VerbosityLevel => "verbosityLevel",
            Self::ColorTheme => "colorTheme",
            Self::PreferredCalculationMethod => "preferredCalculationMethod",
            Self::Notifications => "notifications",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::DarkMode => "Dark mode",
            Self::VerbosityLevel => "Response detail",
            Self::ColorTheme => "Color theme",
            Self::PreferredCalculationMethod => "Calculation method",
            Self::Notifications => "Notifications",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = TaxwiseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(SettingKey::as_str).collect();
                TaxwiseError::Validation(format!(
                    "unknown setting '{}': expected one of {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// Loads, mutates, and persists [`Settings`]
pub struct SettingsManager {
    store: Box<dyn KeyValueStore>,
    settings: Settings,
}

impl SettingsManager {
    /// Load settings from `store`
    ///
    /// Missing or unparsable data yields the defaults; nothing is written
    /// until the first change.
    ///
    /// # Examples
    ///
    /// ```
    /// use taxwise::settings::{MemoryStore, Settings, SettingsManager};
    ///
    /// let manager = SettingsManager::load(Box::new(MemoryStore::new()));
    /// assert_eq!(manager.settings(), &Settings::default());
    /// ```
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let settings = match store.get(SETTINGS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Stored settings are unreadable, using defaults: {}", e);
                Settings::default()
            }),
            Ok(None) => {
                tracing::debug!("No stored settings, using defaults");
                Settings::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read settings store, using defaults: {}", e);
                Settings::default()
            }
        };
        Self { store, settings }
    }

    /// Current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Change one setting and persist the result
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad value (settings unchanged) or a
    /// storage error if the write fails
    pub fn update(&mut self, key: SettingKey, value: &str) -> Result<&Settings> {
        let mut next = self.settings;
        next.apply(key, value)?;
        self.persist(&next)?;
        self.settings = next;
        tracing::info!(setting = %key, value = %self.settings.value_of(key), "Setting updated");
        Ok(&self.settings)
    }

    /// Restore defaults and persist them
    pub fn reset(&mut self) -> Result<&Settings> {
        let defaults = Settings::default();
        self.persist(&defaults)?;
        self.settings = defaults;
        tracing::info!("Settings reset to defaults");
        Ok(&self.settings)
    }

    fn persist(&self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_string(settings).map_err(TaxwiseError::Serialization)?;
        self.store.set(SETTINGS_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_error_contains;
    use std::sync::Arc;

    /// Store handle that can be shared between a manager and the test
    struct SharedStore(Arc<MemoryStore>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> Result<()> {
            self.0.remove(key)
        }
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(TaxwiseError::Storage("unavailable".into()).into())
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(TaxwiseError::Storage("read-only".into()).into())
        }
        fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.dark_mode);
        assert_eq!(settings.verbosity_level, VerbosityLevel::Medium);
        assert_eq!(settings.color_theme, ColorTheme::Blue);
        assert_eq!(
            settings.preferred_calculation_method,
            CalculationMethod::Standard
        );
        assert!(settings.notifications);
    }

    #[test]
    fn test_serialized_shape_is_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["darkMode"], false);
        assert_eq!(json["verbosityLevel"], "medium");
        assert_eq!(json["colorTheme"], "blue");
        assert_eq!(json["preferredCalculationMethod"], "standard");
        assert_eq!(json["notifications"], true);
    }

    #[test]
    fn test_partial_stored_object_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"darkMode":true}"#).unwrap();
        assert!(settings.dark_mode);
        assert!(settings.notifications);
        assert_eq!(settings.color_theme, ColorTheme::Blue);
    }

    #[test]
    fn test_setting_key_parse() {
        assert_eq!(
            "verbosityLevel".parse::<SettingKey>().unwrap(),
            SettingKey::VerbosityLevel
        );
        assert_eq!(
            "darkmode".parse::<SettingKey>().unwrap(),
            SettingKey::DarkMode
        );
        assert!("fontSize".parse::<SettingKey>().is_err());
    }

    #[test]
    fn test_update_persists_each_change() {
        let shared = Arc::new(MemoryStore::new());
        let mut manager = SettingsManager::load(Box::new(SharedStore(Arc::clone(&shared))));

        manager.update(SettingKey::DarkMode, "true").unwrap();
        manager.update(SettingKey::ColorTheme, "green").unwrap();

        let raw = shared.get(SETTINGS_KEY).unwrap().unwrap();
        let stored: Settings = serde_json::from_str(&raw).unwrap();
        assert!(stored.dark_mode);
        assert_eq!(stored.color_theme, ColorTheme::Green);

        let reloaded = SettingsManager::load(Box::new(SharedStore(shared)));
        assert_eq!(reloaded.settings(), manager.settings());
    }

    #[test]
    fn test_invalid_value_leaves_settings_unchanged() {
        let shared = Arc::new(MemoryStore::new());
        let mut manager = SettingsManager::load(Box::new(SharedStore(Arc::clone(&shared))));

        let err = manager
            .update(SettingKey::VerbosityLevel, "extreme")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaxwiseError>(),
            Some(TaxwiseError::Validation(_))
        ));
        assert_error_contains(
            manager.update(SettingKey::Notifications, "maybe").map(|_| ()),
            "invalid value 'maybe' for notifications: expected true or false",
        );
        assert_eq!(manager.settings(), &Settings::default());
        assert!(shared.get(SETTINGS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_reset_overwrites_store() {
        let shared = Arc::new(MemoryStore::new());
        let mut manager = SettingsManager::load(Box::new(SharedStore(Arc::clone(&shared))));
        manager.update(SettingKey::Notifications, "off").unwrap();
        assert!(!manager.settings().notifications);

        manager.reset().unwrap();
        assert_eq!(manager.settings(), &Settings::default());
        let stored: Settings =
            serde_json::from_str(&shared.get(SETTINGS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored, Settings::default());
    }

    #[test]
    fn test_corrupt_value_loads_defaults() {
        let store = MemoryStore::new();
        store.set(SETTINGS_KEY, "{not json").unwrap();
        let manager = SettingsManager::load(Box::new(store));
        assert_eq!(manager.settings(), &Settings::default());
    }

    #[test]
    fn test_unreadable_store_loads_defaults_and_write_fails() {
        let mut manager = SettingsManager::load(Box::new(FailingStore));
        assert_eq!(manager.settings(), &Settings::default());

        assert!(manager.update(SettingKey::DarkMode, "true").is_err());
        assert!(!manager.settings().dark_mode);
    }

    #[test]
    fn test_value_of() {
        let settings = Settings::default();
        assert_eq!(settings.value_of(SettingKey::DarkMode), "false");
        assert_eq!(
            settings.value_of(SettingKey::PreferredCalculationMethod),
            "standard"
        );
    }
}
