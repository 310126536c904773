use thiserror::Error;

use crate::verify::VerifyError;

/// Errors raised by an individual setting.
#[derive(Error, Debug)]
pub enum SettingError {
    /// A known property carried a value of the wrong kind or shape.
    #[error("Invalid value for property '{property}' of setting '{setting}': {reason}")]
    InvalidProperty {
        /// Setting type name the property belongs to.
        setting: String,
        /// Name of the offending property.
        property: String,
        /// What was wrong with the supplied value.
        reason: String,
    },

    /// A secrets update referenced a property that is not a secret.
    #[error("Property '{property}' of setting '{setting}' is not a secret")]
    NotASecret {
        /// Setting type name the update was addressed to.
        setting: String,
        /// The offending property name.
        property: String,
    },
}

impl SettingError {
    /// Shorthand for [`SettingError::InvalidProperty`].
    pub fn invalid_property(
        setting: &str,
        property: &str,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::InvalidProperty {
            setting: setting.to_owned(),
            property: property.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised while constructing or operating on a connection aggregate.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// A wire dictionary yielded no usable settings.
    #[error("No settings found")]
    NoSettings,

    /// The assembled settings do not form a coherent connection.
    #[error("Connection verification failed: {0}")]
    Verify(#[from] VerifyError),

    /// A secrets operation referenced a setting the connection does not contain.
    #[error("No setting '{0}' in this connection")]
    SettingNotFound(String),

    /// A setting-level failure, surfaced unchanged.
    #[error(transparent)]
    Setting(#[from] SettingError),
}
