//! Coherence checks over a fully assembled set of settings.
//!
//! Verification runs once, at whole-connection construction from a wire
//! dictionary. Incremental building through
//! [`add_setting`](crate::Connection::add_setting) is deliberately
//! unchecked so callers can assemble in any order before a final check.

use thiserror::Error;

use crate::settings::{
    PROP_CONNECTION_ID, PROP_CONNECTION_TYPE, PROP_WIRELESS_SECURITY_REF, SETTING_CONNECTION,
    SETTING_WIRELESS, SETTING_WIRELESS_SECURITY, SettingsMap,
};
use crate::wire::Value;

/// Reasons a set of settings does not form a usable connection.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// A setting required by the combination is absent.
    #[error("Missing required setting '{0}'")]
    MissingSetting(String),

    /// A required property of a present setting is unset or empty.
    #[error("Setting '{setting}' is missing required property '{property}'")]
    MissingProperty {
        /// Setting the property belongs to.
        setting: String,
        /// Name of the missing property.
        property: String,
    },

    /// A property references a setting that is not part of the connection.
    #[error("Property '{property}' of setting '{setting}' references missing setting '{target}'")]
    DanglingReference {
        /// Setting holding the reference.
        setting: String,
        /// Property holding the reference.
        property: String,
        /// The referenced setting type name.
        target: String,
    },
}

/// Standard verifier: checks that the settings form a coherent connection.
///
/// Requires a `connection` setting with a non-empty `id` and a `type` naming
/// a setting present in the map, and that a protected wireless profile pairs
/// its security reference with an actual security setting.
///
/// # Errors
///
/// Returns the first [`VerifyError`] encountered.
pub fn verify_settings(settings: &SettingsMap) -> Result<(), VerifyError> {
    let connection = settings
        .get(SETTING_CONNECTION)
        .ok_or_else(|| VerifyError::MissingSetting(SETTING_CONNECTION.to_owned()))?;
    let connection_dict = connection.to_dictionary().unwrap_or_default();

    let id = connection_dict
        .get(PROP_CONNECTION_ID)
        .and_then(Value::as_str)
        .unwrap_or_default();
    if id.is_empty() {
        return Err(VerifyError::MissingProperty {
            setting: SETTING_CONNECTION.to_owned(),
            property: PROP_CONNECTION_ID.to_owned(),
        });
    }

    let base_type = connection_dict
        .get(PROP_CONNECTION_TYPE)
        .and_then(Value::as_str)
        .unwrap_or_default();
    if base_type.is_empty() {
        return Err(VerifyError::MissingProperty {
            setting: SETTING_CONNECTION.to_owned(),
            property: PROP_CONNECTION_TYPE.to_owned(),
        });
    }
    if !settings.contains_key(base_type) {
        return Err(VerifyError::DanglingReference {
            setting: SETTING_CONNECTION.to_owned(),
            property: PROP_CONNECTION_TYPE.to_owned(),
            target: base_type.to_owned(),
        });
    }

    if let Some(wireless) = settings.get(SETTING_WIRELESS) {
        let wireless_dict = wireless.to_dictionary().unwrap_or_default();
        if let Some(security) = wireless_dict
            .get(PROP_WIRELESS_SECURITY_REF)
            .and_then(Value::as_str)
        {
            if security != SETTING_WIRELESS_SECURITY || !settings.contains_key(security) {
                return Err(VerifyError::DanglingReference {
                    setting: SETTING_WIRELESS.to_owned(),
                    property: PROP_WIRELESS_SECURITY_REF.to_owned(),
                    target: security.to_owned(),
                });
            }
        }
    }

    // A security setting without a wireless setting is orphaned.
    if settings.contains_key(SETTING_WIRELESS_SECURITY) && !settings.contains_key(SETTING_WIRELESS)
    {
        return Err(VerifyError::MissingSetting(SETTING_WIRELESS.to_owned()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::settings::{
        ConnectionSetting, SETTING_WIRED, Setting, WiredSetting, WirelessSecuritySetting,
        WirelessSetting,
    };

    fn connection_setting(id: &str, base_type: &str) -> Box<dyn Setting> {
        Box::new(ConnectionSetting {
            id: Some(id.to_owned()),
            connection_type: Some(base_type.to_owned()),
            ..Default::default()
        })
    }

    fn map(settings: Vec<Box<dyn Setting>>) -> SettingsMap {
        settings
            .into_iter()
            .map(|setting| (setting.name().to_owned(), setting))
            .collect()
    }

    #[test]
    fn accepts_wired_profile() {
        let settings = map(vec![
            connection_setting("Home wired", SETTING_WIRED),
            Box::new(WiredSetting::default()),
        ]);
        // An all-default wired setting still counts as present.
        assert!(verify_settings(&settings).is_ok());
    }

    #[test]
    fn rejects_missing_connection_setting() {
        let settings = map(vec![Box::new(WiredSetting::default())]);
        assert!(matches!(
            verify_settings(&settings),
            Err(VerifyError::MissingSetting(_))
        ));
    }

    #[test]
    fn rejects_empty_id() {
        let settings = map(vec![
            connection_setting("", SETTING_WIRED),
            Box::new(WiredSetting::default()),
        ]);
        assert!(matches!(
            verify_settings(&settings),
            Err(VerifyError::MissingProperty { .. })
        ));
    }

    #[test]
    fn rejects_dangling_base_type() {
        let settings = map(vec![connection_setting("Cafe", SETTING_WIRELESS)]);
        assert!(matches!(
            verify_settings(&settings),
            Err(VerifyError::DanglingReference { .. })
        ));
    }

    #[test]
    fn rejects_security_reference_without_security_setting() {
        let settings = map(vec![
            connection_setting("Cafe", SETTING_WIRELESS),
            Box::new(WirelessSetting {
                ssid: Some(b"Cafe".to_vec()),
                security: Some(SETTING_WIRELESS_SECURITY.to_owned()),
                ..Default::default()
            }),
        ]);
        assert!(matches!(
            verify_settings(&settings),
            Err(VerifyError::DanglingReference { .. })
        ));
    }

    #[test]
    fn rejects_orphaned_security_setting() {
        let settings = map(vec![
            connection_setting("Cafe", SETTING_CONNECTION),
            Box::new(WirelessSecuritySetting::default()),
        ]);
        assert!(matches!(
            verify_settings(&settings),
            Err(VerifyError::MissingSetting(_))
        ));
    }

    #[test]
    fn accepts_paired_wireless_security() {
        let settings = map(vec![
            connection_setting("Cafe", SETTING_WIRELESS),
            Box::new(WirelessSetting {
                ssid: Some(b"Cafe".to_vec()),
                security: Some(SETTING_WIRELESS_SECURITY.to_owned()),
                ..Default::default()
            }),
            Box::new(WirelessSecuritySetting {
                key_mgmt: Some("wpa-psk".to_owned()),
                ..Default::default()
            }),
        ]);
        assert!(verify_settings(&settings).is_ok());
    }
}
