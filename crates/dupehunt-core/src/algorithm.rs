//! Supported content digest algorithms.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Digest algorithm used to fingerprint file contents.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-1, fast and good enough for equality checks.
    #[default]
    Sha1,
    Sha256,
    Sha512,
    Md5,
    Blake3,
}

impl HashAlgorithm {
    /// Resolve an algorithm by name.
    ///
    /// Unknown names resolve to the default algorithm instead of failing;
    /// the second element of the tuple is `false` when that happened.
    pub fn from_name(name: &str) -> (Self, bool) {
        match Self::from_str(name.trim()) {
            Ok(alg) => (alg, true),
            Err(_) => (Self::default(), false),
        }
    }
}
