//! The connection aggregate: an owned set of settings plus the secrets
//! protocol and the wire dictionary round-trip.

use std::collections::BTreeMap;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::error::ConnectionError;
use crate::registry::SettingRegistry;
use crate::settings::{Setting, SettingsMap};
use crate::verify::{self, VerifyError};
use crate::wire::{SettingDictionary, Value, WireDictionary};

const SECRETS_UPDATED_CAPACITY: usize = 16;

/// A complete network connection profile.
///
/// Owns zero or more settings, keyed by setting type name. A connection
/// built from a wire dictionary is guaranteed non-empty and verified; one
/// assembled incrementally via [`add_setting`](Self::add_setting) is the
/// caller's to keep coherent.
///
/// Instances are exclusively owned: nothing here locks, and sharing one
/// connection across threads is the caller's problem to serialize.
#[derive(Debug)]
pub struct Connection {
    settings: SettingsMap,
    secrets_updated: broadcast::Sender<String>,
}

impl Connection {
    /// Creates an empty connection.
    ///
    /// First use of an empty registry installs the built-in constructors.
    pub fn new(registry: &SettingRegistry) -> Self {
        registry.ensure_defaults();
        let (secrets_updated, _) = broadcast::channel(SECRETS_UPDATED_CAPACITY);
        Self {
            settings: BTreeMap::new(),
            secrets_updated,
        }
    }

    /// Builds a connection from a wire dictionary, using the standard
    /// verifier.
    ///
    /// # Errors
    ///
    /// See [`from_dictionary_with_verifier`](Self::from_dictionary_with_verifier).
    pub fn from_dictionary(
        registry: &SettingRegistry,
        dict: &WireDictionary,
    ) -> Result<Self, ConnectionError> {
        Self::from_dictionary_with_verifier(registry, dict, verify::verify_settings)
    }

    /// Builds a connection from a wire dictionary, letting the caller supply
    /// the verification collaborator.
    ///
    /// Outer keys with no registered constructor are logged and skipped, as
    /// are settings whose constructor rejects its input; both keep the rest
    /// of the dictionary usable by builds that know more setting types.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::NoSettings`] when nothing parsed, or
    /// [`ConnectionError::Verify`] when `verifier` rejects the combination.
    /// No partially-built connection is ever returned.
    pub fn from_dictionary_with_verifier<V>(
        registry: &SettingRegistry,
        dict: &WireDictionary,
        verifier: V,
    ) -> Result<Self, ConnectionError>
    where
        V: FnOnce(&SettingsMap) -> Result<(), VerifyError>,
    {
        let mut connection = Self::new(registry);

        for (name, properties) in dict {
            let Some(constructor) = registry.resolve(name) else {
                warn!("Unknown setting '{name}'");
                continue;
            };
            match (*constructor)(properties) {
                Ok(setting) => connection.add_setting(setting),
                Err(error) => warn!("Dropping setting '{name}': {error}"),
            }
        }

        if connection.settings.is_empty() {
            return Err(ConnectionError::NoSettings);
        }
        verifier(&connection.settings)?;

        Ok(connection)
    }

    /// Inserts a setting, replacing any previous setting of the same type.
    pub fn add_setting(&mut self, setting: Box<dyn Setting>) {
        self.settings.insert(setting.name().to_owned(), setting);
    }

    /// Looks up a contained setting by type name.
    pub fn get_setting(&self, name: &str) -> Option<&dyn Setting> {
        self.settings.get(name).map(|setting| setting.as_ref())
    }

    /// Looks up a contained setting by type name, mutably.
    pub fn get_setting_mut(&mut self, name: &str) -> Option<&mut (dyn Setting + 'static)> {
        self.settings.get_mut(name).map(|setting| setting.as_mut())
    }

    /// All contained settings, keyed by type name.
    pub fn settings(&self) -> &SettingsMap {
        &self.settings
    }

    /// Serializes the connection to its wire dictionary.
    ///
    /// Settings with nothing to serialize are omitted; a connection whose
    /// serialization would be empty yields `None` rather than an empty
    /// payload.
    pub fn to_dictionary(&self) -> Option<WireDictionary> {
        let mut wire = WireDictionary::new();
        for (name, setting) in &self.settings {
            if let Some(dict) = setting.to_dictionary() {
                wire.insert(name.clone(), dict);
            }
        }
        if wire.is_empty() { None } else { Some(wire) }
    }

    /// Invokes `visitor` with (setting name, property name, value) for every
    /// set property of every setting, settings in type-name order.
    pub fn for_each_setting_value(&self, visitor: &mut dyn FnMut(&str, &str, &Value)) {
        for (name, setting) in &self.settings {
            setting.enumerate_values(&mut |property, value| visitor(name, property, value));
        }
    }

    /// Structural comparison of two possibly-absent connections.
    ///
    /// Two absent connections are equal, and an absent connection never
    /// equals a present one. Present connections compare by their serialized
    /// wire form, so settings with nothing to serialize do not participate.
    pub fn compare(a: Option<&Connection>, b: Option<&Connection>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => a.to_dictionary() == b.to_dictionary(),
            _ => false,
        }
    }

    /// Type name of the first setting still missing required secrets.
    ///
    /// Settings are scanned in type-name order, and only the first hit is
    /// reported; callers work through outstanding secrets one setting at a
    /// time.
    pub fn need_secrets(&self) -> Option<&str> {
        self.settings
            .iter()
            .find(|(_, setting)| !setting.need_secrets().is_empty())
            .map(|(name, _)| name.as_str())
    }

    /// Merges caller-supplied secrets into the named setting.
    ///
    /// On success a secrets-updated event carrying the setting name is
    /// broadcast to subscribers. On any failure the connection is unchanged
    /// and no event is raised.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::SettingNotFound`] if no setting of that
    /// type is contained, or the setting's own rejection.
    pub fn update_secrets(
        &mut self,
        setting_name: &str,
        secrets: &SettingDictionary,
    ) -> Result<(), ConnectionError> {
        let Some(setting) = self.settings.get_mut(setting_name) else {
            warn!("Unhandled setting '{setting_name}' for secrets update");
            return Err(ConnectionError::SettingNotFound(setting_name.to_owned()));
        };

        setting.update_secrets(secrets)?;

        let _ = self.secrets_updated.send(setting_name.to_owned());
        Ok(())
    }

    /// Removes all set secret values from every contained setting.
    pub fn clear_secrets(&mut self) {
        for setting in self.settings.values_mut() {
            setting.clear_secrets();
        }
    }

    /// Subscribes to secrets-updated events.
    ///
    /// Each successful [`update_secrets`](Self::update_secrets) call sends
    /// the affected setting's type name.
    pub fn subscribe_secrets_updated(&self) -> broadcast::Receiver<String> {
        self.secrets_updated.subscribe()
    }

    /// Logs the connection's wire form, one line per property.
    ///
    /// Serializes first so the output is exactly what would cross the
    /// boundary. Read-only.
    pub fn dump(&self) {
        let Some(wire) = self.to_dictionary() else {
            debug!("Connection has no settings to dump");
            return;
        };
        for (name, properties) in &wire {
            debug!("Setting '{name}'");
            for (property, value) in properties {
                debug!("\t{property} : '{value}'");
            }
            debug!("-------------------");
        }
    }
}
