use tracing::warn;

use super::{
    SETTING_WIRED, Setting, dictionary_from_properties, parse_bool, parse_bytes, parse_string,
    parse_u32,
};
use crate::error::SettingError;
use crate::wire::{SettingDictionary, Value};

const PROP_PORT: &str = "port";
const PROP_SPEED: &str = "speed";
const PROP_DUPLEX: &str = "duplex";
const PROP_AUTO_NEGOTIATE: &str = "auto-negotiate";
const PROP_MAC_ADDRESS: &str = "mac-address";
const PROP_MTU: &str = "mtu";

/// Wired (Ethernet) link configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WiredSetting {
    /// Port type to use, e.g. `tp` or `aui`.
    pub port: Option<String>,
    /// Forced link speed in Mbit/s.
    pub speed: Option<u32>,
    /// Forced duplex mode, `half` or `full`.
    pub duplex: Option<String>,
    /// Whether to auto-negotiate speed and duplex.
    pub auto_negotiate: Option<bool>,
    /// Hardware address the profile is locked to.
    pub mac_address: Option<Vec<u8>>,
    /// Maximum transmission unit, in bytes.
    pub mtu: Option<u32>,
}

impl WiredSetting {
    /// Parses an `802-3-ethernet` setting out of its wire dictionary.
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
                PROP_PORT => setting.port = Some(parse_string(SETTING_WIRED, key, value)?),
                PROP_SPEED => setting.speed = Some(parse_u32(SETTING_WIRED, key, value)?),
                PROP_DUPLEX => setting.duplex = Some(parse_string(SETTING_WIRED, key, value)?),
                PROP_AUTO_NEGOTIATE => {
                    setting.auto_negotiate = Some(parse_bool(SETTING_WIRED, key, value)?);
                }
                PROP_MAC_ADDRESS => {
                    setting.mac_address = Some(parse_bytes(SETTING_WIRED, key, value)?);
                }
                PROP_MTU => setting.mtu = Some(parse_u32(SETTING_WIRED, key, value)?),
                other => warn!("Unknown property '{other}' in setting '{SETTING_WIRED}'"),
            }
        }
        Ok(setting)
    }

    pub(crate) fn construct(dict: &SettingDictionary) -> Result<Box<dyn Setting>, SettingError> {
        Ok(Box::new(Self::from_dictionary(dict)?))
    }

    fn properties(&self) -> Vec<(&'static str, Value)> {
        let mut properties = Vec::new();
        if let Some(port) = &self.port {
            properties.push((PROP_PORT, Value::from(port.clone())));
        }
        if let Some(speed) = self.speed {
            properties.push((PROP_SPEED, Value::from(speed)));
        }
        if let Some(duplex) = &self.duplex {
            properties.push((PROP_DUPLEX, Value::from(duplex.clone())));
        }
        if let Some(auto_negotiate) = self.auto_negotiate {
            properties.push((PROP_AUTO_NEGOTIATE, Value::from(auto_negotiate)));
        }
        if let Some(mac_address) = &self.mac_address {
            properties.push((PROP_MAC_ADDRESS, Value::from(mac_address.clone())));
        }
        if let Some(mtu) = self.mtu {
            properties.push((PROP_MTU, Value::from(mtu)));
        }
        properties
    }
}

impl Setting for WiredSetting {
    fn name(&self) -> &'static str {
        SETTING_WIRED
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
