//! netprofile - typed model of network connection profiles.
//!
//! A connection profile is an aggregate of typed *settings* (connection
//! identity, wired, wireless, IP configuration, VPN), each a named group of
//! properties, some of which are secrets. This crate converts between the
//! loosely-typed wire dictionaries used at the transport boundary and
//! strongly-typed in-memory settings, tracks which setting still needs
//! secrets, and validates that an assembled profile is coherent. New setting
//! types plug in at runtime through the registry.
//!
//! # Quick start
//!
//! ```rust
//! use netprofile::{Connection, SettingDictionary, SettingRegistry, Value, WireDictionary};
//!
//! # fn main() -> Result<(), netprofile::ConnectionError> {
//! let registry = SettingRegistry::with_defaults();
//!
//! let mut connection_props = SettingDictionary::new();
//! connection_props.insert("id".into(), Value::from("Home wired"));
//! connection_props.insert("type".into(), Value::from("802-3-ethernet"));
//! let mut wired_props = SettingDictionary::new();
//! wired_props.insert("mtu".into(), Value::from(1500u32));
//!
//! let mut wire = WireDictionary::new();
//! wire.insert("connection".into(), connection_props);
//! wire.insert("802-3-ethernet".into(), wired_props);
//!
//! let connection = Connection::from_dictionary(&registry, &wire)?;
//! assert!(connection.get_setting("802-3-ethernet").is_some());
//! assert!(connection.need_secrets().is_none());
//! # Ok(())
//! # }
//! ```

/// Connection aggregate and the secrets protocol.
pub mod connection;

/// Error types.
pub mod error;

/// Setting type registry: the extension point for new setting types.
pub mod registry;

/// Setting capability contract and the built-in variants.
pub mod settings;

/// Standard connection verification.
pub mod verify;

/// Loosely-typed wire values and dictionaries.
pub mod wire;

pub use connection::Connection;
pub use error::{ConnectionError, SettingError};
pub use registry::SettingRegistry;
pub use settings::{Setting, SettingConstructor, SettingsMap};
pub use verify::VerifyError;
pub use wire::{SettingDictionary, Value, WireDictionary};
