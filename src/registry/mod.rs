//! Mapping from setting type name to the constructor used to parse it.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use crate::error::SettingError;
use crate::settings::{
    ConnectionSetting, Ip4ConfigSetting, PppSetting, SETTING_CONNECTION, SETTING_IP4_CONFIG,
    SETTING_PPP, SETTING_VPN, SETTING_VPN_PROPERTIES, SETTING_WIRED, SETTING_WIRELESS,
    SETTING_WIRELESS_SECURITY, Setting, SettingConstructor, VpnPropertiesSetting, VpnSetting,
    WiredSetting, WirelessSetting, WirelessSecuritySetting,
};
use crate::wire::SettingDictionary;

/// Shared table of setting constructors.
///
/// Handles are cheap to clone and all views of one registry stay consistent;
/// every parsing call site of a process is expected to share a single
/// registry. Mutation is internally synchronized.
#[derive(Clone, Default)]
pub struct SettingRegistry {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    constructors: HashMap<String, SettingConstructor>,
    defaults_installed: bool,
}

impl SettingRegistry {
    /// Creates an empty registry with no constructors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in constructors already installed.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.ensure_defaults();
        registry
    }

    /// Stores `constructor` under `name`.
    ///
    /// Overrides an existing constructor for the same name with a warning;
    /// this is how user-provided settings replace built-ins.
    pub fn register<F>(&self, name: &str, constructor: F)
    where
        F: Fn(&SettingDictionary) -> Result<Box<dyn Setting>, SettingError>
            + Send
            + Sync
            + 'static,
    {
        let mut inner = self.write();
        if inner.constructors.contains_key(name) {
            warn!("Already have a constructor for setting '{name}', overriding");
        }
        inner.constructors.insert(name.to_owned(), Arc::new(constructor));
    }

    /// Removes the constructor registered under `name`, if any.
    pub fn unregister(&self, name: &str) {
        self.write().constructors.remove(name);
    }

    /// Looks up the constructor for `name`.
    pub fn resolve(&self, name: &str) -> Option<SettingConstructor> {
        self.read().constructors.get(name).cloned()
    }

    /// Installs the built-in constructors, once.
    ///
    /// A name the caller has already claimed is left alone, so registrations
    /// made before first use survive the bootstrap. Runs in a single write
    /// critical section, so concurrent first use cannot double-install.
    pub fn ensure_defaults(&self) {
        let mut inner = self.write();
        if inner.defaults_installed {
            return;
        }

        let defaults = [
            (SETTING_CONNECTION, constructor(ConnectionSetting::construct)),
            (SETTING_WIRED, constructor(WiredSetting::construct)),
            (SETTING_WIRELESS, constructor(WirelessSetting::construct)),
            (
                SETTING_IP4_CONFIG,
                constructor(Ip4ConfigSetting::construct),
            ),
            (
                SETTING_WIRELESS_SECURITY,
                constructor(WirelessSecuritySetting::construct),
            ),
            (SETTING_PPP, constructor(PppSetting::construct)),
            (SETTING_VPN, constructor(VpnSetting::construct)),
            (
                SETTING_VPN_PROPERTIES,
                constructor(VpnPropertiesSetting::construct),
            ),
        ];
        for (name, default) in defaults {
            inner.constructors.entry(name.to_owned()).or_insert(default);
        }

        inner.defaults_installed = true;
    }

    // No code path panics while the lock is held, so a poisoned lock still
    // guards a consistent table.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn constructor<F>(f: F) -> SettingConstructor
where
    F: Fn(&SettingDictionary) -> Result<Box<dyn Setting>, SettingError> + Send + Sync + 'static,
{
    Arc::new(f)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::wire::Value;

    fn stub_constructor(_dict: &SettingDictionary) -> Result<Box<dyn Setting>, SettingError> {
        Ok(Box::new(ConnectionSetting {
            id: Some("stub".to_owned()),
            ..Default::default()
        }))
    }

    #[test]
    fn resolve_on_empty_registry_is_absent() {
        let registry = SettingRegistry::new();
        assert!(registry.resolve(SETTING_CONNECTION).is_none());
    }

    #[test]
    fn defaults_cover_all_builtin_types() {
        let registry = SettingRegistry::with_defaults();
        for name in [
            SETTING_CONNECTION,
            SETTING_WIRED,
            SETTING_WIRELESS,
            SETTING_WIRELESS_SECURITY,
            SETTING_IP4_CONFIG,
            SETTING_PPP,
            SETTING_VPN,
            SETTING_VPN_PROPERTIES,
        ] {
            assert!(registry.resolve(name).is_some(), "missing default for {name}");
        }
    }

    #[test]
    fn bootstrap_does_not_clobber_prior_registrations() {
        let registry = SettingRegistry::new();
        registry.register(SETTING_CONNECTION, stub_constructor);
        registry.ensure_defaults();

        let constructor = registry.resolve(SETTING_CONNECTION).unwrap();
        let parsed = (*constructor)(&SettingDictionary::new()).unwrap();
        let dict = parsed.to_dictionary().unwrap();
        assert_eq!(dict.get("id").and_then(Value::as_str), Some("stub"));
    }

    #[test]
    fn explicit_reregistration_overrides() {
        let registry = SettingRegistry::with_defaults();
        registry.register(SETTING_CONNECTION, stub_constructor);

        let constructor = registry.resolve(SETTING_CONNECTION).unwrap();
        let parsed = (*constructor)(&SettingDictionary::new()).unwrap();
        let dict = parsed.to_dictionary().unwrap();
        assert_eq!(dict.get("id").and_then(Value::as_str), Some("stub"));
    }

    #[test]
    fn unregister_is_a_noop_for_unknown_names() {
        let registry = SettingRegistry::with_defaults();
        registry.unregister("no-such-setting");
        registry.unregister(SETTING_PPP);
        assert!(registry.resolve(SETTING_PPP).is_none());
    }
}
