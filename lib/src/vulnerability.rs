use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        MAX_CVE_ID_LENGTH, MAX_VULNERABILITY_DESCRIPTION_LENGTH, MAX_VULNERABILITY_NAME_LENGTH,
    },
    error::{check_length, check_required, ValidationError},
};

/// Row identifier of a [`Vulnerability`], assigned by the storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VulnerabilityId(pub i64);

impl Display for VulnerabilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The editable part of a vulnerability, as submitted by an administrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cve_id: String,
}

impl VulnerabilityDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required("name", &self.name, MAX_VULNERABILITY_NAME_LENGTH)?;
        check_length(
            "description",
            &self.description,
            MAX_VULNERABILITY_DESCRIPTION_LENGTH,
        )?;
        check_length("cve_id", &self.cve_id, MAX_CVE_ID_LENGTH)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub id: VulnerabilityId,
    pub name: String,
    pub description: String,
    pub cve_id: String,
}

impl Vulnerability {
    pub fn from_draft(id: VulnerabilityId, draft: VulnerabilityDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            cve_id: draft.cve_id,
        }
    }
}

impl Display for Vulnerability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
