//! A string wrapper for backend credentials.
//!
//! [`SecretString`] holds the backend API key loaded from the config file.
//! The value never reaches logs, `Debug` output, or re-serialized config
//! (`warden config show`); [`expose`](SecretString::expose) is the only way
//! to read it.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const MASK: &str = "[REDACTED]";

/// A credential that prints and serializes as a mask.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The actual value, for building request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` if no value was configured.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The value if one was configured.
    pub fn non_empty(&self) -> Option<&str> {
        if self.is_empty() { None } else { Some(&self.0) }
    }

    fn masked(&self) -> &'static str {
        if self.0.is_empty() { "" } else { MASK }
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.masked())
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.masked())
    }
}

impl Serialize for SecretString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.masked())
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SecretString)
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        SecretString(s.to_string())
    }
}
