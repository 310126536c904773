//! Loosely-typed values and dictionaries used at the transport boundary.
//!
//! A connection profile crosses the system boundary as a two-level
//! string-keyed dictionary: the outer keys are setting type names, the inner
//! keys are property names, and the leaves are [`Value`]s drawn from a closed
//! set of scalar and collection kinds.

mod value;

use std::collections::HashMap;

pub use value::Value;

/// Inner wire dictionary: property name to value, for one setting.
pub type SettingDictionary = HashMap<String, Value>;

/// Outer wire dictionary: setting type name to that setting's properties.
pub type WireDictionary = HashMap<String, SettingDictionary>;
