use std::{
    collections::BTreeMap,
    fmt,
};

use serde::{
    Deserialize,
    Serialize,
};

pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_SOURCE: &str = "source";
pub const FIELD_ORIGIN: &str = "origin";
pub const FIELD_ROAST: &str = "roast";
pub const FIELD_PROCESS: &str = "process";
pub const FIELD_NOTES: &str = "notes";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_TEMPERATURE: &str = "temperature";
pub const FIELD_GRIND_SIZE: &str = "grind_size";
pub const FIELD_BREW_RATIO: &str = "brew_ratio";
pub const FIELD_RATIO: &str = "ratio";
pub const FIELD_BREW_TIME: &str = "brew_time";

/// One ordered line of CSV cells.
pub type Row = Vec<String>;

/// A single coffee brewing record.
///
/// Every column of the sheet is kept as free text under its normalized header
/// name, so columns the application does not know about survive a trip through
/// the cache. Serializes as a flat JSON object of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoffeeProfile {
    fields: BTreeMap<String, String>,
}

impl CoffeeProfile {
    pub fn new() -> Self {
        Self { fields: BTreeMap::new() }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self { fields: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Value of `field`, or `""` when the field is absent.
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    /// True when the field is absent or holds an empty string.
    pub fn is_blank(&self, field: &str) -> bool {
        self.value(field).is_empty()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn id(&self) -> &str {
        self.value(FIELD_ID)
    }

    pub fn name(&self) -> &str {
        self.value(FIELD_NAME)
    }

    pub fn source(&self) -> &str {
        self.value(FIELD_SOURCE)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Reads a stored preference. Anything other than `"light"` or `"dark"`
    /// falls back to the default theme.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            _ => Theme::default(),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serializes_as_flat_object() {
        let profile = CoffeeProfile::from_pairs([("id", "coffee-1"), ("name", "Kenya AA")]);
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(json, r#"{"id":"coffee-1","name":"Kenya AA"}"#);

        let back: CoffeeProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn missing_fields_read_as_blank() {
        let profile = CoffeeProfile::from_pairs([("name", "Minimal")]);
        assert_eq!(profile.source(), "");
        assert!(profile.is_blank(FIELD_SOURCE));
        assert!(!profile.is_blank(FIELD_NAME));
    }

    #[test]
    fn theme_reads_unknown_values_as_default() {
        assert_eq!(Theme::from_stored("light"), Theme::Light);
        assert_eq!(Theme::from_stored("dark"), Theme::Dark);
        assert_eq!(Theme::from_stored("sepia"), Theme::Dark);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_str(), "light");
    }
}
