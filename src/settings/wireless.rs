use tracing::warn;

use super::{
    SETTING_WIRELESS, Setting, dictionary_from_properties, parse_byte_array_list, parse_bytes,
    parse_string, parse_u32,
};
use crate::error::SettingError;
use crate::wire::{SettingDictionary, Value};

const PROP_SSID: &str = "ssid";
const PROP_MODE: &str = "mode";
const PROP_BAND: &str = "band";
const PROP_CHANNEL: &str = "channel";
const PROP_BSSID: &str = "bssid";
const PROP_RATE: &str = "rate";
const PROP_TX_POWER: &str = "tx-power";
const PROP_MAC_ADDRESS: &str = "mac-address";
const PROP_MTU: &str = "mtu";
const PROP_SEEN_BSSIDS: &str = "seen-bssids";
pub(crate) const PROP_SECURITY: &str = "security";

/// Wi-Fi link configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WirelessSetting {
    /// Service set identifier of the network, as raw bytes.
    pub ssid: Option<Vec<u8>>,
    /// Operating mode, `infrastructure` or `adhoc`.
    pub mode: Option<String>,
    /// Frequency band, `a` or `bg`.
    pub band: Option<String>,
    /// Channel within the band.
    pub channel: Option<u32>,
    /// Access point hardware address the profile is locked to.
    pub bssid: Option<Vec<u8>>,
    /// Forced bitrate, in Kbit/s.
    pub rate: Option<u32>,
    /// Transmit power, in dBm.
    pub tx_power: Option<u32>,
    /// Device hardware address the profile is locked to.
    pub mac_address: Option<Vec<u8>>,
    /// Maximum transmission unit, in bytes.
    pub mtu: Option<u32>,
    /// Hardware addresses of access points this network was seen at.
    pub seen_bssids: Option<Vec<Vec<u8>>>,
    /// Type name of the security setting paired with this one, when the
    /// network is protected.
    pub security: Option<String>,
}

impl WirelessSetting {
    /// Parses an `802-11-wireless` setting out of its wire dictionary.
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
                PROP_SSID => setting.ssid = Some(parse_bytes(SETTING_WIRELESS, key, value)?),
                PROP_MODE => setting.mode = Some(parse_string(SETTING_WIRELESS, key, value)?),
                PROP_BAND => setting.band = Some(parse_string(SETTING_WIRELESS, key, value)?),
                PROP_CHANNEL => setting.channel = Some(parse_u32(SETTING_WIRELESS, key, value)?),
                PROP_BSSID => setting.bssid = Some(parse_bytes(SETTING_WIRELESS, key, value)?),
                PROP_RATE => setting.rate = Some(parse_u32(SETTING_WIRELESS, key, value)?),
                PROP_TX_POWER => setting.tx_power = Some(parse_u32(SETTING_WIRELESS, key, value)?),
                PROP_MAC_ADDRESS => {
                    setting.mac_address = Some(parse_bytes(SETTING_WIRELESS, key, value)?);
                }
                PROP_MTU => setting.mtu = Some(parse_u32(SETTING_WIRELESS, key, value)?),
                PROP_SEEN_BSSIDS => {
                    setting.seen_bssids = Some(parse_byte_array_list(SETTING_WIRELESS, key, value)?);
                }
                PROP_SECURITY => {
                    setting.security = Some(parse_string(SETTING_WIRELESS, key, value)?);
                }
                other => warn!("Unknown property '{other}' in setting '{SETTING_WIRELESS}'"),
            }
        }
        Ok(setting)
    }

    pub(crate) fn construct(dict: &SettingDictionary) -> Result<Box<dyn Setting>, SettingError> {
        Ok(Box::new(Self::from_dictionary(dict)?))
    }

    fn properties(&self) -> Vec<(&'static str, Value)> {
        let mut properties = Vec::new();
        if let Some(ssid) = &self.ssid {
            properties.push((PROP_SSID, Value::from(ssid.clone())));
        }
        if let Some(mode) = &self.mode {
            properties.push((PROP_MODE, Value::from(mode.clone())));
        }
        if let Some(band) = &self.band {
            properties.push((PROP_BAND, Value::from(band.clone())));
        }
        if let Some(channel) = self.channel {
            properties.push((PROP_CHANNEL, Value::from(channel)));
        }
        if let Some(bssid) = &self.bssid {
            properties.push((PROP_BSSID, Value::from(bssid.clone())));
        }
        if let Some(rate) = self.rate {
            properties.push((PROP_RATE, Value::from(rate)));
        }
        if let Some(tx_power) = self.tx_power {
            properties.push((PROP_TX_POWER, Value::from(tx_power)));
        }
        if let Some(mac_address) = &self.mac_address {
            properties.push((PROP_MAC_ADDRESS, Value::from(mac_address.clone())));
        }
        if let Some(mtu) = self.mtu {
            properties.push((PROP_MTU, Value::from(mtu)));
        }
        if let Some(seen_bssids) = &self.seen_bssids {
            properties.push((PROP_SEEN_BSSIDS, Value::from(seen_bssids.clone())));
        }
        if let Some(security) = &self.security {
            properties.push((PROP_SECURITY, Value::from(security.clone())));
        }
        properties
    }
}

impl Setting for WirelessSetting {
    fn name(&self) -> &'static str {
        SETTING_WIRELESS
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

    #[test]
    fn round_trips_set_properties() {
        let mut dict = SettingDictionary::new();
        dict.insert("ssid".to_owned(), Value::from(b"Cafe Network".to_vec()));
        dict.insert("mode".to_owned(), Value::from("infrastructure"));
        dict.insert(
            "seen-bssids".to_owned(),
            Value::from(vec![vec![0x00u8, 0x1b, 0x44, 0x11, 0x3a, 0xb7]]),
        );

        let setting = WirelessSetting::from_dictionary(&dict).unwrap();
        assert_eq!(setting.to_dictionary().unwrap(), dict);
    }

    #[test]
    fn rejects_string_ssid() {
        let mut dict = SettingDictionary::new();
        dict.insert("ssid".to_owned(), Value::from("not bytes"));
        let error = WirelessSetting::from_dictionary(&dict).unwrap_err();
        assert!(matches!(error, SettingError::InvalidProperty { .. }));
    }
}
