use tracing::warn;

use super::{SETTING_PPP, Setting, dictionary_from_properties, parse_bool, parse_u32};
use crate::error::SettingError;
use crate::wire::{SettingDictionary, Value};

const PROP_NOAUTH: &str = "noauth";
const PROP_REFUSE_EAP: &str = "refuse-eap";
const PROP_REFUSE_CHAP: &str = "refuse-chap";
const PROP_REFUSE_MSCHAP: &str = "refuse-mschap";
const PROP_NOBSDCOMP: &str = "nobsdcomp";
const PROP_NODEFLATE: &str = "nodeflate";
const PROP_REQUIRE_MPPE: &str = "require-mppe";
const PROP_BAUD: &str = "baud";
const PROP_MRU: &str = "mru";
const PROP_MTU: &str = "mtu";
const PROP_LCP_ECHO_INTERVAL: &str = "lcp-echo-interval";
const PROP_LCP_ECHO_FAILURE: &str = "lcp-echo-failure";

/// Point-to-point protocol tuning for dial-up and mobile broadband links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PppSetting {
    /// Do not require the peer to authenticate.
    pub noauth: Option<bool>,
    /// Refuse EAP authentication.
    pub refuse_eap: Option<bool>,
    /// Refuse CHAP authentication.
    pub refuse_chap: Option<bool>,
    /// Refuse MSCHAP authentication.
    pub refuse_mschap: Option<bool>,
    /// Disable BSD compression.
    pub nobsdcomp: Option<bool>,
    /// Disable deflate compression.
    pub nodeflate: Option<bool>,
    /// Require MPPE encryption.
    pub require_mppe: Option<bool>,
    /// Serial port baud rate.
    pub baud: Option<u32>,
    /// Maximum receive unit, in bytes.
    pub mru: Option<u32>,
    /// Maximum transmission unit, in bytes.
    pub mtu: Option<u32>,
    /// Seconds between LCP echo requests.
    pub lcp_echo_interval: Option<u32>,
    /// Missed LCP echoes before the link is considered dead.
    pub lcp_echo_failure: Option<u32>,
}

impl PppSetting {
    /// Parses a `ppp` setting out of its wire dictionary.
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
                PROP_NOAUTH => setting.noauth = Some(parse_bool(SETTING_PPP, key, value)?),
                PROP_REFUSE_EAP => setting.refuse_eap = Some(parse_bool(SETTING_PPP, key, value)?),
                PROP_REFUSE_CHAP => {
                    setting.refuse_chap = Some(parse_bool(SETTING_PPP, key, value)?);
                }
                PROP_REFUSE_MSCHAP => {
                    setting.refuse_mschap = Some(parse_bool(SETTING_PPP, key, value)?);
                }
                PROP_NOBSDCOMP => setting.nobsdcomp = Some(parse_bool(SETTING_PPP, key, value)?),
                PROP_NODEFLATE => setting.nodeflate = Some(parse_bool(SETTING_PPP, key, value)?),
                PROP_REQUIRE_MPPE => {
                    setting.require_mppe = Some(parse_bool(SETTING_PPP, key, value)?);
                }
                PROP_BAUD => setting.baud = Some(parse_u32(SETTING_PPP, key, value)?),
                PROP_MRU => setting.mru = Some(parse_u32(SETTING_PPP, key, value)?),
                PROP_MTU => setting.mtu = Some(parse_u32(SETTING_PPP, key, value)?),
                PROP_LCP_ECHO_INTERVAL => {
                    setting.lcp_echo_interval = Some(parse_u32(SETTING_PPP, key, value)?);
                }
                PROP_LCP_ECHO_FAILURE => {
                    setting.lcp_echo_failure = Some(parse_u32(SETTING_PPP, key, value)?);
                }
                other => warn!("Unknown property '{other}' in setting '{SETTING_PPP}'"),
            }
        }
        Ok(setting)
    }

    pub(crate) fn construct(dict: &SettingDictionary) -> Result<Box<dyn Setting>, SettingError> {
        Ok(Box::new(Self::from_dictionary(dict)?))
    }

    fn properties(&self) -> Vec<(&'static str, Value)> {
        let flags = [
            (PROP_NOAUTH, self.noauth),
            (PROP_REFUSE_EAP, self.refuse_eap),
            (PROP_REFUSE_CHAP, self.refuse_chap),
            (PROP_REFUSE_MSCHAP, self.refuse_mschap),
            (PROP_NOBSDCOMP, self.nobsdcomp),
            (PROP_NODEFLATE, self.nodeflate),
            (PROP_REQUIRE_MPPE, self.require_mppe),
        ];
        let numbers = [
            (PROP_BAUD, self.baud),
            (PROP_MRU, self.mru),
            (PROP_MTU, self.mtu),
            (PROP_LCP_ECHO_INTERVAL, self.lcp_echo_interval),
            (PROP_LCP_ECHO_FAILURE, self.lcp_echo_failure),
        ];

        let mut properties = Vec::new();
        for (name, flag) in flags {
            if let Some(flag) = flag {
                properties.push((name, Value::from(flag)));
            }
        }
        for (name, number) in numbers {
            if let Some(number) = number {
                properties.push((name, Value::from(number)));
            }
        }
        properties
    }
}

impl Setting for PppSetting {
    fn name(&self) -> &'static str {
        SETTING_PPP
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
