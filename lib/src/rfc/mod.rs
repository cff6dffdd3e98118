//! RFC documents and their standardization status.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub mod metadata;

pub use metadata::{ExtractError, RfcMetadata};

/// The number of an RFC. Numbering starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct RfcNumber(u32);

impl RfcNumber {
    pub fn new(number: u32) -> Result<Self, ValidationError> {
        if number == 0 {
            Err(ValidationError::InvalidRfcNumber)
        } else {
            Ok(Self(number))
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for RfcNumber {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RfcNumber> for u32 {
    fn from(value: RfcNumber) -> Self {
        value.0
    }
}

impl FromStr for RfcNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidRfcNumber)?;
        Self::new(number)
    }
}

impl Display for RfcNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Location of the HTML rendition of an RFC on `host`.
pub fn rfc_url(host: &str, number: RfcNumber) -> String {
    format!("{}/html/rfc{number}", host.trim_end_matches('/'))
}

/// Standardization status of an RFC, as announced in the header of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RfcStatus {
    #[serde(rename = "IST")]
    InternetStandard,
    #[serde(rename = "PST")]
    ProposedStandard,
    #[serde(rename = "DST")]
    DraftStandard,
    #[serde(rename = "BCP")]
    BestCurrentPractice,
    #[serde(rename = "INF")]
    Informational,
    #[serde(rename = "EXP")]
    Experimental,
    #[serde(rename = "HST")]
    Historic,
    #[serde(rename = "UND")]
    Undefined,
}

/// Phrases looked for in the document header, highest priority first.
const STATUS_PHRASES: [(&str, RfcStatus); 7] = [
    ("INTERNET STANDARD", RfcStatus::InternetStandard),
    ("PROPOSED STANDARD", RfcStatus::ProposedStandard),
    ("DRAFT STANDARD", RfcStatus::DraftStandard),
    ("BEST CURRENT PRACTISE", RfcStatus::BestCurrentPractice),
    ("INFORMATIONAL", RfcStatus::Informational),
    ("EXPERIMENTAL", RfcStatus::Experimental),
    ("HISTORIC", RfcStatus::Historic),
];

impl RfcStatus {
    pub const ALL: [RfcStatus; 8] = [
        RfcStatus::InternetStandard,
        RfcStatus::ProposedStandard,
        RfcStatus::DraftStandard,
        RfcStatus::BestCurrentPractice,
        RfcStatus::Informational,
        RfcStatus::Experimental,
        RfcStatus::Historic,
        RfcStatus::Undefined,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            RfcStatus::InternetStandard => "IST",
            RfcStatus::ProposedStandard => "PST",
            RfcStatus::DraftStandard => "DST",
            RfcStatus::BestCurrentPractice => "BCP",
            RfcStatus::Informational => "INF",
            RfcStatus::Experimental => "EXP",
            RfcStatus::Historic => "HST",
            RfcStatus::Undefined => "UND",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RfcStatus::InternetStandard => "Internet Standard",
            RfcStatus::ProposedStandard => "Proposed Standard",
            RfcStatus::DraftStandard => "Draft Standard",
            RfcStatus::BestCurrentPractice => "Best Current Practice",
            RfcStatus::Informational => "Informational",
            RfcStatus::Experimental => "Experimental",
            RfcStatus::Historic => "Historic",
            RfcStatus::Undefined => "Undefined",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| ValidationError::UnknownStatusCode(code.to_string()))
    }

    /// Finds the status announced in the concatenated header text of an RFC.
    ///
    /// The first phrase of the priority list found anywhere in `docinfo` wins,
    /// regardless of where it appears. Nothing found means [`RfcStatus::Undefined`].
    pub fn detect(docinfo: &str) -> Self {
        STATUS_PHRASES
            .iter()
            .find(|(phrase, _)| docinfo.contains(phrase))
            .map_or(RfcStatus::Undefined, |(_, status)| *status)
    }
}

impl Display for RfcStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An RFC of the directory.
///
/// `status`, `title`, `release_year` and `url` always come from the
/// published document, they can't be set by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rfc {
    pub number: RfcNumber,
    pub status: RfcStatus,
    pub title: String,
    pub release_year: u16,
    pub url: String,
    pub defined_cipher_suites: Vec<String>,
    pub related_documents: Vec<RfcNumber>,
}

impl Rfc {
    pub fn from_metadata(draft: RfcDraft, url: String, metadata: RfcMetadata) -> Self {
        Self {
            number: draft.number,
            status: metadata.status,
            title: metadata.title,
            release_year: metadata.release_year,
            url,
            defined_cipher_suites: draft.defined_cipher_suites,
            related_documents: draft.related_documents,
        }
    }
}

impl Display for Rfc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RFC {}", self.number)
    }
}

/// What an administrator submits to create or update an RFC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfcDraft {
    pub number: RfcNumber,
    #[serde(default)]
    pub defined_cipher_suites: Vec<String>,
    #[serde(default)]
    pub related_documents: Vec<RfcNumber>,
}

impl RfcDraft {
    pub fn new(number: RfcNumber) -> Self {
        Self {
            number,
            defined_cipher_suites: Vec::new(),
            related_documents: Vec::new(),
        }
    }
}
