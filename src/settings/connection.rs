use tracing::warn;

use super::{
    SETTING_CONNECTION, Setting, dictionary_from_properties, parse_bool, parse_string, parse_u32,
};
use crate::error::SettingError;
use crate::wire::{SettingDictionary, Value};

pub(crate) const PROP_ID: &str = "id";
pub(crate) const PROP_TYPE: &str = "type";
const PROP_AUTOCONNECT: &str = "autoconnect";
const PROP_TIMESTAMP: &str = "timestamp";

/// Core identification properties of a connection profile.
///
/// Every usable profile carries one of these; the `type` property names the
/// base setting the profile activates (e.g. `802-3-ethernet`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionSetting {
    /// Human-readable name of the profile.
    pub id: Option<String>,
    /// Type name of the base setting this profile activates.
    pub connection_type: Option<String>,
    /// Whether the profile may be activated automatically.
    pub autoconnect: Option<bool>,
    /// Unix timestamp of the last successful activation.
    pub timestamp: Option<u32>,
}

impl ConnectionSetting {
    /// Parses a `connection` setting out of its wire dictionary.
    ///
    /// Unknown properties are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::InvalidProperty`] if a known property carries
    /// a value of the wrong kind.
    pub fn from_dictionary(dict: &SettingDictionary) -> Result<Self, SettingError> {
        let mut setting = Self::default();
        for (key, value) in dict {
            match key.as_str() {
                PROP_ID => setting.id = Some(parse_string(SETTING_CONNECTION, key, value)?),
                PROP_TYPE => {
                    setting.connection_type = Some(parse_string(SETTING_CONNECTION, key, value)?);
                }
                PROP_AUTOCONNECT => {
                    setting.autoconnect = Some(parse_bool(SETTING_CONNECTION, key, value)?);
                }
                PROP_TIMESTAMP => {
                    setting.timestamp = Some(parse_u32(SETTING_CONNECTION, key, value)?);
                }
                other => warn!("Unknown property '{other}' in setting '{SETTING_CONNECTION}'"),
            }
        }
        Ok(setting)
    }

    pub(crate) fn construct(dict: &SettingDictionary) -> Result<Box<dyn Setting>, SettingError> {
        Ok(Box::new(Self::from_dictionary(dict)?))
    }

    fn properties(&self) -> Vec<(&'static str, Value)> {
        let mut properties = Vec::new();
        if let Some(id) = &self.id {
            properties.push((PROP_ID, Value::from(id.clone())));
        }
        if let Some(connection_type) = &self.connection_type {
            properties.push((PROP_TYPE, Value::from(connection_type.clone())));
        }
        if let Some(autoconnect) = self.autoconnect {
            properties.push((PROP_AUTOCONNECT, Value::from(autoconnect)));
        }
        if let Some(timestamp) = self.timestamp {
            properties.push((PROP_TIMESTAMP, Value::from(timestamp)));
        }
        properties
    }
}

impl Setting for ConnectionSetting {
    fn name(&self) -> &'static str {
        SETTING_CONNECTION
    }

    fn to_dictionary(&self) -> Option<SettingDictionary> {
        dictionary_from_properties(self.properties())
    }

    fn enumerate_values(&self, visitor: &mut dyn FnMut(&str, &Value)) {
        for (name, value) in self.properties() {
            visitor(name, &value);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn dict(entries: &[(&str, Value)]) -> SettingDictionary {
        entries
            .iter()
            .map(|(key, value)| ((*key).to_owned(), value.clone()))
            .collect()
    }

    #[test]
    fn parses_known_properties() {
        let setting = ConnectionSetting::from_dictionary(&dict(&[
            ("id", Value::from("Home wired")),
            ("type", Value::from("802-3-ethernet")),
            ("autoconnect", Value::from(true)),
            ("timestamp", Value::from(1_188_000_000u32)),
        ]))
        .unwrap();

        assert_eq!(setting.id.as_deref(), Some("Home wired"));
        assert_eq!(setting.connection_type.as_deref(), Some("802-3-ethernet"));
        assert_eq!(setting.autoconnect, Some(true));
        assert_eq!(setting.timestamp, Some(1_188_000_000));
    }

    #[test]
    fn skips_unknown_properties() {
        let setting = ConnectionSetting::from_dictionary(&dict(&[
            ("id", Value::from("Cafe")),
            ("future-knob", Value::from(3u32)),
        ]))
        .unwrap();

        assert_eq!(setting.id.as_deref(), Some("Cafe"));
        assert!(setting.to_dictionary().unwrap().get("future-knob").is_none());
    }

    #[test]
    fn rejects_wrong_value_kind() {
        let error = ConnectionSetting::from_dictionary(&dict(&[("id", Value::from(1u32))]))
            .unwrap_err();
        assert!(matches!(error, SettingError::InvalidProperty { .. }));
    }

    #[test]
    fn empty_setting_has_nothing_to_serialize() {
        assert!(ConnectionSetting::default().to_dictionary().is_none());
    }

    #[test]
    fn enumerates_in_declared_order() {
        let setting = ConnectionSetting {
            id: Some("Cafe".to_owned()),
            connection_type: Some("802-11-wireless".to_owned()),
            autoconnect: Some(false),
            timestamp: None,
        };

        let mut seen = Vec::new();
        setting.enumerate_values(&mut |name, _| seen.push(name.to_owned()));
        assert_eq!(seen, ["id", "type", "autoconnect"]);
    }

    #[test]
    fn offered_secrets_are_rejected() {
        let mut setting = ConnectionSetting::default();
        let error = setting
            .update_secrets(&dict(&[("psk", Value::from("hunter2"))]))
            .unwrap_err();
        assert!(matches!(error, SettingError::NotASecret { .. }));
        assert!(setting.need_secrets().is_empty());
    }
}
