use tracing::warn;

use super::{SETTING_VPN, Setting, dictionary_from_properties, parse_string, parse_string_list};
use crate::error::SettingError;
use crate::wire::{SettingDictionary, Value};

const PROP_SERVICE_TYPE: &str = "service-type";
const PROP_USER_NAME: &str = "user-name";
const PROP_ROUTES: &str = "routes";

/// VPN plumbing: which service handles the tunnel and on whose behalf.
///
/// Service-specific configuration lives in the companion
/// [`vpn-properties`](super::VpnPropertiesSetting) setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VpnSetting {
    /// Identifier of the VPN service that handles this connection.
    pub service_type: Option<String>,
    /// User name to authenticate as.
    pub user_name: Option<String>,
    /// Routes to direct through the tunnel, in `address/prefix` form.
    pub routes: Option<Vec<String>>,
}

impl VpnSetting {
    /// Parses a `vpn` setting out of its wire dictionary.
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
                PROP_SERVICE_TYPE => {
                    setting.service_type = Some(parse_string(SETTING_VPN, key, value)?);
                }
                PROP_USER_NAME => setting.user_name = Some(parse_string(SETTING_VPN, key, value)?),
                PROP_ROUTES => setting.routes = Some(parse_string_list(SETTING_VPN, key, value)?),
                other => warn!("Unknown property '{other}' in setting '{SETTING_VPN}'"),
            }
        }
        Ok(setting)
    }

    pub(crate) fn construct(dict: &SettingDictionary) -> Result<Box<dyn Setting>, SettingError> {
        Ok(Box::new(Self::from_dictionary(dict)?))
    }

    fn properties(&self) -> Vec<(&'static str, Value)> {
        let mut properties = Vec::new();
        if let Some(service_type) = &self.service_type {
            properties.push((PROP_SERVICE_TYPE, Value::from(service_type.clone())));
        }
        if let Some(user_name) = &self.user_name {
            properties.push((PROP_USER_NAME, Value::from(user_name.clone())));
        }
        if let Some(routes) = &self.routes {
            properties.push((PROP_ROUTES, Value::from(routes.clone())));
        }
        properties
    }
}

impl Setting for VpnSetting {
    fn name(&self) -> &'static str {
        SETTING_VPN
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
