//! Cipher suites and the decomposition of their names into the
//! four algorithms they are made of.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    constants::MAX_CIPHER_SUITE_NAME_LENGTH,
    error::{check_required, ValidationError},
    technology::TechnologyKind,
};

/// The four registry keys a cipher suite name is made of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmTokens {
    pub protocol: String,
    pub kex: String,
    pub enc: String,
    pub hash: String,
}

/// Splits a cipher suite name into its four algorithm tokens.
///
/// The split is purely textual:
///  - every `_` becomes a space
///  - everything before the first space is the protocol version
///  - the remainder is split on the first literal `WITH`, the part before
///    it is the key exchange
///  - what follows is split on its last space into encryption and hash
///
/// This never fails. A name without `WITH` has an empty key exchange,
/// and a remainder without an interior space has an empty encryption token
/// with the whole remainder as the hash. Existing registry entries were
/// derived with exactly these rules, so they must not be tightened.
pub fn decompose(name: &str) -> AlgorithmTokens {
    let normalized = name.replace('_', " ");

    let (protocol, rest) = normalized
        .split_once(' ')
        .unwrap_or((normalized.as_str(), ""));
    let (kex, rest) = rest.split_once("WITH").unwrap_or(("", rest));
    let (enc, hash) = rest.rsplit_once(' ').unwrap_or(("", rest));

    AlgorithmTokens {
        protocol: protocol.trim().to_string(),
        kex: kex.trim().to_string(),
        enc: enc.trim().to_string(),
        hash: hash.trim().to_string(),
    }
}

impl AlgorithmTokens {
    /// Builds back the normalized `"P K WITH E H"` form.
    pub fn reassemble(&self) -> String {
        format!(
            "{} {} WITH {} {}",
            self.protocol, self.kex, self.enc, self.hash
        )
    }
}

/// A cipher suite, keyed by its RFC name. The algorithm fields hold the
/// short names of registry entries and always match what `name` decomposes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherSuite {
    pub name: String,
    pub protocol_version: String,
    pub kex_algorithm: String,
    pub enc_algorithm: String,
    pub hash_algorithm: String,
}

impl CipherSuite {
    /// Derives a cipher suite from its name.
    pub fn from_name(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_name(&name)?;

        let AlgorithmTokens {
            protocol,
            kex,
            enc,
            hash,
        } = decompose(&name);

        Ok(Self {
            name,
            protocol_version: protocol,
            kex_algorithm: kex,
            enc_algorithm: enc,
            hash_algorithm: hash,
        })
    }

    /// The short name this suite references for the given category.
    pub fn algorithm(&self, kind: TechnologyKind) -> &str {
        match kind {
            TechnologyKind::ProtocolVersion => &self.protocol_version,
            TechnologyKind::KexAlgorithm => &self.kex_algorithm,
            TechnologyKind::EncAlgorithm => &self.enc_algorithm,
            TechnologyKind::HashAlgorithm => &self.hash_algorithm,
        }
    }

    /// The referenced short names paired with their category, in foreign key order.
    pub fn decomposed(&self) -> [(TechnologyKind, &str); 4] {
        TechnologyKind::ALL.map(|kind| (kind, self.algorithm(kind)))
    }
}

impl Display for CipherSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    check_required("name", name, MAX_CIPHER_SUITE_NAME_LENGTH)
}
