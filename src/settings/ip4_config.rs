use tracing::warn;

use super::{
    SETTING_IP4_CONFIG, Setting, dictionary_from_properties, parse_bool, parse_string,
    parse_string_list,
};
use crate::error::SettingError;
use crate::wire::{SettingDictionary, Value};

const PROP_METHOD: &str = "method";
const PROP_ADDRESSES: &str = "addresses";
const PROP_GATEWAY: &str = "gateway";
const PROP_DNS: &str = "dns";
const PROP_DNS_SEARCH: &str = "dns-search";
const PROP_IGNORE_AUTO_DNS: &str = "ignore-auto-dns";

/// IPv4 addressing configuration.
///
/// Addresses travel in textual form (`address/prefix`), name servers as
/// dotted quads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ip4ConfigSetting {
    /// Configuration method, `auto` or `manual`.
    pub method: Option<String>,
    /// Static addresses with prefix length, e.g. `192.168.1.5/24`.
    pub addresses: Option<Vec<String>>,
    /// Default gateway.
    pub gateway: Option<String>,
    /// Name servers to use.
    pub dns: Option<Vec<String>>,
    /// Domains to append when resolving unqualified names.
    pub dns_search: Option<Vec<String>>,
    /// Whether to ignore name servers offered by automatic configuration.
    pub ignore_auto_dns: Option<bool>,
}

impl Ip4ConfigSetting {
    /// Parses an `ip4-config` setting out of its wire dictionary.
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
                PROP_METHOD => setting.method = Some(parse_string(SETTING_IP4_CONFIG, key, value)?),
                PROP_ADDRESSES => {
                    setting.addresses = Some(parse_string_list(SETTING_IP4_CONFIG, key, value)?);
                }
                PROP_GATEWAY => {
                    setting.gateway = Some(parse_string(SETTING_IP4_CONFIG, key, value)?);
                }
                PROP_DNS => setting.dns = Some(parse_string_list(SETTING_IP4_CONFIG, key, value)?),
                PROP_DNS_SEARCH => {
                    setting.dns_search = Some(parse_string_list(SETTING_IP4_CONFIG, key, value)?);
                }
                PROP_IGNORE_AUTO_DNS => {
                    setting.ignore_auto_dns = Some(parse_bool(SETTING_IP4_CONFIG, key, value)?);
                }
                other => warn!("Unknown property '{other}' in setting '{SETTING_IP4_CONFIG}'"),
            }
        }
        Ok(setting)
    }

    pub(crate) fn construct(dict: &SettingDictionary) -> Result<Box<dyn Setting>, SettingError> {
        Ok(Box::new(Self::from_dictionary(dict)?))
    }

    fn properties(&self) -> Vec<(&'static str, Value)> {
        let mut properties = Vec::new();
        if let Some(method) = &self.method {
            properties.push((PROP_METHOD, Value::from(method.clone())));
        }
        if let Some(addresses) = &self.addresses {
            properties.push((PROP_ADDRESSES, Value::from(addresses.clone())));
        }
        if let Some(gateway) = &self.gateway {
            properties.push((PROP_GATEWAY, Value::from(gateway.clone())));
        }
        if let Some(dns) = &self.dns {
            properties.push((PROP_DNS, Value::from(dns.clone())));
        }
        if let Some(dns_search) = &self.dns_search {
            properties.push((PROP_DNS_SEARCH, Value::from(dns_search.clone())));
        }
        if let Some(ignore_auto_dns) = self.ignore_auto_dns {
            properties.push((PROP_IGNORE_AUTO_DNS, Value::from(ignore_auto_dns)));
        }
        properties
    }
}

impl Setting for Ip4ConfigSetting {
    fn name(&self) -> &'static str {
        SETTING_IP4_CONFIG
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
