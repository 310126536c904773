use tracing::warn;

use super::{
    SETTING_WIRELESS_SECURITY, Setting, dictionary_from_properties, parse_string,
    parse_string_list, parse_u32,
};
use crate::error::SettingError;
use crate::wire::{SettingDictionary, Value};

const PROP_KEY_MGMT: &str = "key-mgmt";
const PROP_WEP_TX_KEYIDX: &str = "wep-tx-keyidx";
const PROP_AUTH_ALG: &str = "auth-alg";
const PROP_PROTO: &str = "proto";
const PROP_PAIRWISE: &str = "pairwise";
const PROP_GROUP: &str = "group";
const PROP_EAP: &str = "eap";
const PROP_IDENTITY: &str = "identity";
const PROP_ANONYMOUS_IDENTITY: &str = "anonymous-identity";
const PROP_PSK: &str = "psk";
const PROP_LEAP_PASSWORD: &str = "leap-password";

const WEP_KEY_PROPS: [&str; 4] = ["wep-key0", "wep-key1", "wep-key2", "wep-key3"];

/// Names of this variant's secret properties.
const SECRET_PROPS: [&str; 6] = [
    WEP_KEY_PROPS[0],
    WEP_KEY_PROPS[1],
    WEP_KEY_PROPS[2],
    WEP_KEY_PROPS[3],
    PROP_PSK,
    PROP_LEAP_PASSWORD,
];

/// Security configuration for a protected Wi-Fi network.
///
/// The WEP keys, the pre-shared key, and the LEAP password are secrets:
/// they parse from the wire like any other property but are otherwise only
/// touched through the secrets protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WirelessSecuritySetting {
    /// Key management scheme: `none` (static WEP), `ieee8021x`, `wpa-psk`,
    /// `wpa-none` or `wpa-eap`.
    pub key_mgmt: Option<String>,
    /// Index of the WEP key to transmit with (0-3).
    pub wep_tx_keyidx: Option<u32>,
    /// 802.11 authentication algorithm: `open`, `shared` or `leap`.
    pub auth_alg: Option<String>,
    /// WPA protocol version, `wpa` or `rsn`.
    pub proto: Option<String>,
    /// Allowed pairwise ciphers.
    pub pairwise: Option<Vec<String>>,
    /// Allowed group ciphers.
    pub group: Option<Vec<String>>,
    /// Allowed EAP methods.
    pub eap: Option<Vec<String>>,
    /// EAP identity.
    pub identity: Option<String>,
    /// Anonymous EAP identity sent in the clear.
    pub anonymous_identity: Option<String>,
    /// Static WEP keys, indexed by `wep_tx_keyidx`. Secret.
    pub wep_keys: [Option<String>; 4],
    /// WPA pre-shared key. Secret.
    pub psk: Option<String>,
    /// LEAP password. Secret.
    pub leap_password: Option<String>,
}

impl WirelessSecuritySetting {
    /// Parses an `802-11-wireless-security` setting out of its wire
    /// dictionary.
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
            if let Some(index) = wep_key_index(key) {
                setting.wep_keys[index] =
                    Some(parse_string(SETTING_WIRELESS_SECURITY, key, value)?);
                continue;
            }
            match key.as_str() {
                PROP_KEY_MGMT => {
                    setting.key_mgmt = Some(parse_string(SETTING_WIRELESS_SECURITY, key, value)?);
                }
                PROP_WEP_TX_KEYIDX => {
                    setting.wep_tx_keyidx = Some(parse_u32(SETTING_WIRELESS_SECURITY, key, value)?);
                }
                PROP_AUTH_ALG => {
                    setting.auth_alg = Some(parse_string(SETTING_WIRELESS_SECURITY, key, value)?);
                }
                PROP_PROTO => {
                    setting.proto = Some(parse_string(SETTING_WIRELESS_SECURITY, key, value)?);
                }
                PROP_PAIRWISE => {
                    setting.pairwise =
                        Some(parse_string_list(SETTING_WIRELESS_SECURITY, key, value)?);
                }
                PROP_GROUP => {
                    setting.group = Some(parse_string_list(SETTING_WIRELESS_SECURITY, key, value)?);
                }
                PROP_EAP => {
                    setting.eap = Some(parse_string_list(SETTING_WIRELESS_SECURITY, key, value)?);
                }
                PROP_IDENTITY => {
                    setting.identity = Some(parse_string(SETTING_WIRELESS_SECURITY, key, value)?);
                }
                PROP_ANONYMOUS_IDENTITY => {
                    setting.anonymous_identity =
                        Some(parse_string(SETTING_WIRELESS_SECURITY, key, value)?);
                }
                PROP_PSK => {
                    setting.psk = Some(parse_string(SETTING_WIRELESS_SECURITY, key, value)?);
                }
                PROP_LEAP_PASSWORD => {
                    setting.leap_password =
                        Some(parse_string(SETTING_WIRELESS_SECURITY, key, value)?);
                }
                other => {
                    warn!("Unknown property '{other}' in setting '{SETTING_WIRELESS_SECURITY}'");
                }
            }
        }
        Ok(setting)
    }

    pub(crate) fn construct(dict: &SettingDictionary) -> Result<Box<dyn Setting>, SettingError> {
        Ok(Box::new(Self::from_dictionary(dict)?))
    }

    /// Index of the WEP key selected for transmission, clamped to the valid
    /// range. Defaults to key 0 when unset.
    fn tx_key_index(&self) -> usize {
        self.wep_tx_keyidx.unwrap_or(0).min(3) as usize
    }

    fn set_secret(&mut self, property: &str, secret: String) {
        if let Some(index) = wep_key_index(property) {
            self.wep_keys[index] = Some(secret);
        } else if property == PROP_PSK {
            self.psk = Some(secret);
        } else if property == PROP_LEAP_PASSWORD {
            self.leap_password = Some(secret);
        }
    }

    fn properties(&self) -> Vec<(&'static str, Value)> {
        let mut properties = Vec::new();
        if let Some(key_mgmt) = &self.key_mgmt {
            properties.push((PROP_KEY_MGMT, Value::from(key_mgmt.clone())));
        }
        if let Some(wep_tx_keyidx) = self.wep_tx_keyidx {
            properties.push((PROP_WEP_TX_KEYIDX, Value::from(wep_tx_keyidx)));
        }
        if let Some(auth_alg) = &self.auth_alg {
            properties.push((PROP_AUTH_ALG, Value::from(auth_alg.clone())));
        }
        if let Some(proto) = &self.proto {
            properties.push((PROP_PROTO, Value::from(proto.clone())));
        }
        if let Some(pairwise) = &self.pairwise {
            properties.push((PROP_PAIRWISE, Value::from(pairwise.clone())));
        }
        if let Some(group) = &self.group {
            properties.push((PROP_GROUP, Value::from(group.clone())));
        }
        if let Some(eap) = &self.eap {
            properties.push((PROP_EAP, Value::from(eap.clone())));
        }
        if let Some(identity) = &self.identity {
            properties.push((PROP_IDENTITY, Value::from(identity.clone())));
        }
        if let Some(anonymous_identity) = &self.anonymous_identity {
            properties.push((PROP_ANONYMOUS_IDENTITY, Value::from(anonymous_identity.clone())));
        }
        for (index, key) in self.wep_keys.iter().enumerate() {
            if let Some(key) = key {
                properties.push((WEP_KEY_PROPS[index], Value::from(key.clone())));
            }
        }
        if let Some(psk) = &self.psk {
            properties.push((PROP_PSK, Value::from(psk.clone())));
        }
        if let Some(leap_password) = &self.leap_password {
            properties.push((PROP_LEAP_PASSWORD, Value::from(leap_password.clone())));
        }
        properties
    }
}

impl Setting for WirelessSecuritySetting {
    fn name(&self) -> &'static str {
        SETTING_WIRELESS_SECURITY
    }

    fn to_dictionary(&self) -> Option<SettingDictionary> {
        dictionary_from_properties(self.properties())
    }

    fn enumerate_values(&self, visitor: &mut dyn FnMut(&str, &Value)) {
        for (name, value) in self.properties() {
            visitor(name, &value);
        }
    }

    fn need_secrets(&self) -> Vec<&'static str> {
        match self.key_mgmt.as_deref() {
            Some("none") => {
                let index = self.tx_key_index();
                if self.wep_keys[index].is_none() {
                    vec![WEP_KEY_PROPS[index]]
                } else {
                    Vec::new()
                }
            }
            Some("wpa-psk" | "wpa-none") => {
                if self.psk.is_none() {
                    vec![PROP_PSK]
                } else {
                    Vec::new()
                }
            }
            Some("ieee8021x") if self.auth_alg.as_deref() == Some("leap") => {
                if self.leap_password.is_none() {
                    vec![PROP_LEAP_PASSWORD]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    fn update_secrets(&mut self, secrets: &SettingDictionary) -> Result<(), SettingError> {
        // Validate the whole batch before committing anything.
        for (property, value) in secrets {
            if !SECRET_PROPS.contains(&property.as_str()) {
                return Err(SettingError::NotASecret {
                    setting: SETTING_WIRELESS_SECURITY.to_owned(),
                    property: property.clone(),
                });
            }
            if value.as_str().is_none() {
                return Err(SettingError::invalid_property(
                    SETTING_WIRELESS_SECURITY,
                    property,
                    format!("expected a string, got {}", value.kind()),
                ));
            }
        }
        for (property, value) in secrets {
            if let Some(secret) = value.as_str() {
                self.set_secret(property, secret.to_owned());
            }
        }
        Ok(())
    }

    fn clear_secrets(&mut self) {
        self.wep_keys = [None, None, None, None];
        self.psk = None;
        self.leap_password = None;
    }
}

fn wep_key_index(property: &str) -> Option<usize> {
    WEP_KEY_PROPS.iter().position(|name| *name == property)
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
    fn static_wep_needs_selected_key() {
        let setting = WirelessSecuritySetting {
            key_mgmt: Some("none".to_owned()),
            wep_tx_keyidx: Some(2),
            ..Default::default()
        };
        assert_eq!(setting.need_secrets(), ["wep-key2"]);
    }

    #[test]
    fn wpa_psk_needs_psk_until_set() {
        let mut setting = WirelessSecuritySetting {
            key_mgmt: Some("wpa-psk".to_owned()),
            ..Default::default()
        };
        assert_eq!(setting.need_secrets(), ["psk"]);

        setting
            .update_secrets(&dict(&[("psk", Value::from("correct horse battery"))]))
            .unwrap();
        assert!(setting.need_secrets().is_empty());
    }

    #[test]
    fn leap_needs_password() {
        let setting = WirelessSecuritySetting {
            key_mgmt: Some("ieee8021x".to_owned()),
            auth_alg: Some("leap".to_owned()),
            ..Default::default()
        };
        assert_eq!(setting.need_secrets(), ["leap-password"]);
    }

    #[test]
    fn update_with_unknown_key_changes_nothing() {
        let mut setting = WirelessSecuritySetting {
            key_mgmt: Some("wpa-psk".to_owned()),
            ..Default::default()
        };

        let error = setting
            .update_secrets(&dict(&[
                ("psk", Value::from("valid")),
                ("identity", Value::from("not a secret")),
            ]))
            .unwrap_err();

        assert!(matches!(error, SettingError::NotASecret { .. }));
        assert!(setting.psk.is_none());
    }

    #[test]
    fn update_with_malformed_value_changes_nothing() {
        let mut setting = WirelessSecuritySetting::default();

        let error = setting
            .update_secrets(&dict(&[
                ("wep-key0", Value::from("abcde")),
                ("wep-key1", Value::from(1u32)),
            ]))
            .unwrap_err();

        assert!(matches!(error, SettingError::InvalidProperty { .. }));
        assert!(setting.wep_keys.iter().all(Option::is_none));
    }

    #[test]
    fn clear_secrets_is_idempotent() {
        let mut setting = WirelessSecuritySetting {
            key_mgmt: Some("wpa-psk".to_owned()),
            psk: Some("hunter2".to_owned()),
            wep_keys: [Some("k0".to_owned()), None, None, None],
            ..Default::default()
        };

        setting.clear_secrets();
        assert!(setting.psk.is_none());
        assert!(setting.wep_keys.iter().all(Option::is_none));
        assert_eq!(setting.key_mgmt.as_deref(), Some("wpa-psk"));

        setting.clear_secrets();
        assert!(setting.psk.is_none());
    }

    #[test]
    fn secrets_survive_the_wire_round_trip() {
        let dict = dict(&[
            ("key-mgmt", Value::from("wpa-psk")),
            ("psk", Value::from("hunter2")),
        ]);
        let setting = WirelessSecuritySetting::from_dictionary(&dict).unwrap();
        assert_eq!(setting.to_dictionary().unwrap(), dict);
    }
}
