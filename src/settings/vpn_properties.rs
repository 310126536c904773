use std::collections::BTreeMap;

use super::{SETTING_VPN_PROPERTIES, Setting};
use crate::error::SettingError;
use crate::wire::{SettingDictionary, Value};

/// Opaque configuration bag for a VPN service plugin.
///
/// The property namespace belongs to the service named by the companion
/// [`vpn`](super::VpnSetting) setting, so every entry is accepted as-is.
/// Secrets arrive only through the secrets protocol and are kept apart from
/// ordinary entries so they can be cleared without touching configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VpnPropertiesSetting {
    /// Service-defined configuration entries.
    pub data: BTreeMap<String, Value>,
    secrets: BTreeMap<String, Value>,
}

impl VpnPropertiesSetting {
    /// Parses a `vpn-properties` setting out of its wire dictionary.
    ///
    /// Every entry is taken verbatim; the core has no schema for a service
    /// plugin's namespace.
    ///
    /// # Errors
    ///
    /// Infallible today; the signature matches the registry's constructor
    /// contract.
    pub fn from_dictionary(dict: &SettingDictionary) -> Result<Self, SettingError> {
        Ok(Self {
            data: dict
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            secrets: BTreeMap::new(),
        })
    }

    pub(crate) fn construct(dict: &SettingDictionary) -> Result<Box<dyn Setting>, SettingError> {
        Ok(Box::new(Self::from_dictionary(dict)?))
    }

    /// The secret entries currently held, for callers routing them onward to
    /// the VPN service.
    pub fn secrets(&self) -> &BTreeMap<String, Value> {
        &self.secrets
    }
}

impl Setting for VpnPropertiesSetting {
    fn name(&self) -> &'static str {
        SETTING_VPN_PROPERTIES
    }

    fn to_dictionary(&self) -> Option<SettingDictionary> {
        if self.data.is_empty() && self.secrets.is_empty() {
            return None;
        }
        let mut dict = SettingDictionary::new();
        for (key, value) in &self.data {
            dict.insert(key.clone(), value.clone());
        }
        for (key, value) in &self.secrets {
            dict.insert(key.clone(), value.clone());
        }
        Some(dict)
    }

    fn enumerate_values(&self, visitor: &mut dyn FnMut(&str, &Value)) {
        for (key, value) in &self.data {
            visitor(key, value);
        }
        for (key, value) in &self.secrets {
            visitor(key, value);
        }
    }

    fn update_secrets(&mut self, secrets: &SettingDictionary) -> Result<(), SettingError> {
        // The plugin owns the namespace, so any key is a valid secret here.
        for (key, value) in secrets {
            self.secrets.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn clear_secrets(&mut self) {
        self.secrets.clear();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn accepts_arbitrary_entries() {
        let mut dict = SettingDictionary::new();
        dict.insert("remote".to_owned(), Value::from("vpn.example.net"));
        dict.insert("port".to_owned(), Value::from(1194u32));

        let setting = VpnPropertiesSetting::from_dictionary(&dict).unwrap();
        assert_eq!(setting.to_dictionary().unwrap(), dict);
    }

    #[test]
    fn secrets_merge_into_the_wire_form_and_clear_out() {
        let mut dict = SettingDictionary::new();
        dict.insert("remote".to_owned(), Value::from("vpn.example.net"));
        let mut setting = VpnPropertiesSetting::from_dictionary(&dict).unwrap();

        let mut secrets = SettingDictionary::new();
        secrets.insert("password".to_owned(), Value::from("hunter2"));
        setting.update_secrets(&secrets).unwrap();

        let serialized = setting.to_dictionary().unwrap();
        assert_eq!(serialized.len(), 2);
        assert_eq!(
            serialized.get("password").and_then(Value::as_str),
            Some("hunter2")
        );

        setting.clear_secrets();
        let serialized = setting.to_dictionary().unwrap();
        assert!(serialized.get("password").is_none());
        assert!(serialized.get("remote").is_some());
    }
}
