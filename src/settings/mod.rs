//! Setting capability contract and the built-in setting variants.
//!
//! A connection profile is assembled from *settings*: named groups of typed
//! properties. Each variant here parses itself out of a wire dictionary,
//! serializes back, and participates in the secrets protocol. New variants
//! are plugged in through the [registry](crate::registry) without touching
//! the aggregate logic.

mod connection;
mod ip4_config;
mod ppp;
mod vpn;
mod vpn_properties;
mod wired;
mod wireless;
mod wireless_security;

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

pub use connection::ConnectionSetting;
pub(crate) use connection::{PROP_ID as PROP_CONNECTION_ID, PROP_TYPE as PROP_CONNECTION_TYPE};
pub use ip4_config::Ip4ConfigSetting;
pub use ppp::PppSetting;
pub use vpn::VpnSetting;
pub use vpn_properties::VpnPropertiesSetting;
pub use wired::WiredSetting;
pub use wireless::WirelessSetting;
pub(crate) use wireless::PROP_SECURITY as PROP_WIRELESS_SECURITY_REF;
pub use wireless_security::WirelessSecuritySetting;

use crate::error::SettingError;
use crate::wire::{SettingDictionary, Value};

/// Type name of [`ConnectionSetting`].
pub const SETTING_CONNECTION: &str = "connection";
/// Type name of [`WiredSetting`].
pub const SETTING_WIRED: &str = "802-3-ethernet";
/// Type name of [`WirelessSetting`].
pub const SETTING_WIRELESS: &str = "802-11-wireless";
/// Type name of [`WirelessSecuritySetting`].
pub const SETTING_WIRELESS_SECURITY: &str = "802-11-wireless-security";
/// Type name of [`Ip4ConfigSetting`].
pub const SETTING_IP4_CONFIG: &str = "ip4-config";
/// Type name of [`PppSetting`].
pub const SETTING_PPP: &str = "ppp";
/// Type name of [`VpnSetting`].
pub const SETTING_VPN: &str = "vpn";
/// Type name of [`VpnPropertiesSetting`].
pub const SETTING_VPN_PROPERTIES: &str = "vpn-properties";

/// Map of settings keyed by setting type name.
///
/// A sorted map, so every whole-connection scan (secrets queries, dumps,
/// serialization) runs in a deterministic order.
pub type SettingsMap = BTreeMap<String, Box<dyn Setting>>;

/// Constructor resolved through the registry to parse one setting variant
/// out of its wire dictionary.
pub type SettingConstructor =
    Arc<dyn Fn(&SettingDictionary) -> Result<Box<dyn Setting>, SettingError> + Send + Sync>;

/// Capability contract shared by every setting variant.
///
/// Variants with no secret properties can rely on the default secrets
/// methods: nothing is ever needed, offered secrets are rejected, and
/// clearing is a no-op.
pub trait Setting: Debug + Send {
    /// Stable type name of this setting, used as its key within a connection.
    fn name(&self) -> &'static str;

    /// Serializes the set properties into a wire dictionary.
    ///
    /// Returns `None` when no property is set, so callers can omit the
    /// setting from the outer dictionary instead of transmitting an empty
    /// one.
    fn to_dictionary(&self) -> Option<SettingDictionary>;

    /// Invokes `visitor` once per set property, in the variant's declared
    /// property order.
    fn enumerate_values(&self, visitor: &mut dyn FnMut(&str, &Value));

    /// Names of secret properties that are required but currently unset.
    ///
    /// An empty result means the setting is fully satisfied.
    fn need_secrets(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Merges caller-supplied secret values into this setting.
    ///
    /// The whole dictionary is validated before anything is committed, so a
    /// rejected call leaves the setting unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::NotASecret`] for a key that does not name a
    /// secret property of this variant, or
    /// [`SettingError::InvalidProperty`] for a malformed value.
    fn update_secrets(&mut self, secrets: &SettingDictionary) -> Result<(), SettingError> {
        match secrets.keys().next() {
            Some(property) => Err(SettingError::NotASecret {
                setting: self.name().to_owned(),
                property: property.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Removes all currently-set secret values. Never fails.
    fn clear_secrets(&mut self) {}
}

/// Builds a wire dictionary from an ordered property list, reporting
/// nothing-to-serialize for an empty one.
pub(crate) fn dictionary_from_properties(
    properties: Vec<(&'static str, Value)>,
) -> Option<SettingDictionary> {
    if properties.is_empty() {
        None
    } else {
        Some(
            properties
                .into_iter()
                .map(|(name, value)| (name.to_owned(), value))
                .collect(),
        )
    }
}

fn wrong_kind(setting: &str, property: &str, expected: &str, value: &Value) -> SettingError {
    SettingError::invalid_property(
        setting,
        property,
        format!("expected {expected}, got {}", value.kind()),
    )
}

pub(crate) fn parse_string(
    setting: &str,
    property: &str,
    value: &Value,
) -> Result<String, SettingError> {
    value
        .as_str()
        .map(ToOwned::to_owned)
        .ok_or_else(|| wrong_kind(setting, property, "a string", value))
}

pub(crate) fn parse_u32(setting: &str, property: &str, value: &Value) -> Result<u32, SettingError> {
    value
        .as_u32()
        .ok_or_else(|| wrong_kind(setting, property, "a uint32", value))
}

pub(crate) fn parse_bool(
    setting: &str,
    property: &str,
    value: &Value,
) -> Result<bool, SettingError> {
    value
        .as_bool()
        .ok_or_else(|| wrong_kind(setting, property, "a boolean", value))
}

pub(crate) fn parse_bytes(
    setting: &str,
    property: &str,
    value: &Value,
) -> Result<Vec<u8>, SettingError> {
    value
        .as_bytes()
        .map(ToOwned::to_owned)
        .ok_or_else(|| wrong_kind(setting, property, "a byte array", value))
}

pub(crate) fn parse_string_list(
    setting: &str,
    property: &str,
    value: &Value,
) -> Result<Vec<String>, SettingError> {
    value
        .as_string_list()
        .map(ToOwned::to_owned)
        .ok_or_else(|| wrong_kind(setting, property, "a string list", value))
}

pub(crate) fn parse_byte_array_list(
    setting: &str,
    property: &str,
    value: &Value,
) -> Result<Vec<Vec<u8>>, SettingError> {
    value
        .as_byte_array_list()
        .map(ToOwned::to_owned)
        .ok_or_else(|| wrong_kind(setting, property, "a byte array list", value))
}
