//! The technology registry: protocol versions and the algorithms
//! a cipher suite is made of.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    constants::MAX_LONG_NAME_LENGTH,
    error::{check_length, ValidationError},
    vulnerability::VulnerabilityId,
};

/// The four categories of the registry. Every category has its own
/// namespace of short names, so `"RSA"` can be both a key exchange
/// and an unrelated entry of another kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnologyKind {
    ProtocolVersion,
    KexAlgorithm,
    EncAlgorithm,
    HashAlgorithm,
}

impl TechnologyKind {
    pub const ALL: [TechnologyKind; 4] = [
        TechnologyKind::ProtocolVersion,
        TechnologyKind::KexAlgorithm,
        TechnologyKind::EncAlgorithm,
        TechnologyKind::HashAlgorithm,
    ];

    /// Identifier used for storage (table names) and serialization.
    pub const fn code(self) -> &'static str {
        match self {
            TechnologyKind::ProtocolVersion => "protocol_version",
            TechnologyKind::KexAlgorithm => "kex_algorithm",
            TechnologyKind::EncAlgorithm => "enc_algorithm",
            TechnologyKind::HashAlgorithm => "hash_algorithm",
        }
    }

    /// Plural form used in URLs.
    pub const fn slug(self) -> &'static str {
        match self {
            TechnologyKind::ProtocolVersion => "protocol-versions",
            TechnologyKind::KexAlgorithm => "kex-algorithms",
            TechnologyKind::EncAlgorithm => "enc-algorithms",
            TechnologyKind::HashAlgorithm => "hash-algorithms",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TechnologyKind::ProtocolVersion => "protocol version",
            TechnologyKind::KexAlgorithm => "key exchange algorithm",
            TechnologyKind::EncAlgorithm => "encryption algorithm",
            TechnologyKind::HashAlgorithm => "hash algorithm",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl Display for TechnologyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TechnologyKind {
    type Err = ValidationError;

    /// Accepts both the URL slug and the storage code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s)
            .or_else(|| Self::from_code(s))
            .ok_or_else(|| ValidationError::UnknownTechnologyKind(s.to_string()))
    }
}

/// An entry of the registry.
///
/// Entries are created on first sight by the cipher suite decomposer, with
/// an empty `long_name` left for manual curation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    pub kind: TechnologyKind,
    pub short_name: String,
    pub long_name: String,
    pub vulnerabilities: Vec<VulnerabilityId>,
}

impl Technology {
    pub fn new(kind: TechnologyKind, short_name: impl Into<String>) -> Self {
        Self {
            kind,
            short_name: short_name.into(),
            long_name: String::new(),
            vulnerabilities: Vec::new(),
        }
    }
}

impl Display for Technology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.short_name)
    }
}

pub fn validate_long_name(long_name: &str) -> Result<(), ValidationError> {
    check_length("long_name", long_name, MAX_LONG_NAME_LENGTH)
}
