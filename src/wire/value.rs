use std::fmt;

use serde::{Deserialize, Serialize};

/// A loosely-typed wire value.
///
/// This is the full set of value kinds a transport can express structurally.
/// Anything else has no wire representation, so unsupported kinds cannot be
/// constructed in the first place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Value {
    /// UTF-8 string.
    String(String),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Unsigned 32-bit integer.
    Uint32(u32),
    /// Boolean flag.
    Boolean(bool),
    /// Raw byte sequence, e.g. an SSID or MAC address.
    ByteArray(Vec<u8>),
    /// List of strings.
    StringList(Vec<String>),
    /// List of byte sequences, e.g. seen BSSIDs.
    ByteArrayList(Vec<Vec<u8>>),
}

impl Value {
    /// Returns the contained string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contained signed integer, if this is an int32 value.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the contained unsigned integer, if this is a uint32 value.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Uint32(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the contained boolean, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the contained bytes, if this is a byte-array value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::ByteArray(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the contained strings, if this is a string-list value.
    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            Self::StringList(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the contained byte sequences, if this is a byte-array-list value.
    pub fn as_byte_array_list(&self) -> Option<&[Vec<u8>]> {
        match self {
            Self::ByteArrayList(arrays) => Some(arrays),
            _ => None,
        }
    }

    /// Name of this value's kind, for diagnostics and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Int32(_) => "int32",
            Self::Uint32(_) => "uint32",
            Self::Boolean(_) => "boolean",
            Self::ByteArray(_) => "byte-array",
            Self::StringList(_) => "string-list",
            Self::ByteArrayList(_) => "byte-array-list",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Uint32(v) => write!(f, "{v}"),
            Self::Boolean(v) => f.write_str(if *v { "True" } else { "False" }),
            Self::ByteArray(bytes) => f.write_str(&format_bytes(bytes)),
            Self::StringList(items) => write!(f, "[{}]", items.join(", ")),
            Self::ByteArrayList(arrays) => {
                let rendered: Vec<String> = arrays.iter().map(|a| format_bytes(a)).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
        }
    }
}

/// Renders a byte sequence for human consumption.
///
/// Printable ASCII sequences are shown verbatim, everything else as
/// space-separated hex pairs.
fn format_bytes(bytes: &[u8]) -> String {
    if !bytes.is_empty() && bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        String::from_utf8_lossy(bytes).into_owned()
    } else {
        let pairs: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
        pairs.join(" ")
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Uint32(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::ByteArray(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::StringList(value)
    }
}

impl From<Vec<Vec<u8>>> for Value {
    fn from(value: Vec<Vec<u8>>) -> Self {
        Self::ByteArrayList(value)
    }
}
