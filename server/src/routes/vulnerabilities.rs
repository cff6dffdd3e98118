use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use cipherdir::{
    technology::TechnologyKind,
    vulnerability::{Vulnerability, VulnerabilityDraft, VulnerabilityId},
};
use serde::Serialize;

use crate::{db::Database, error::Error};

#[derive(Debug, Serialize)]
pub struct AffectedTechnology {
    pub kind: TechnologyKind,
    pub short_name: String,
}

#[derive(Debug, Serialize)]
pub struct VulnerabilityDetail {
    #[serde(flatten)]
    pub vulnerability: Vulnerability,
    pub affected_technologies: Vec<AffectedTechnology>,
}

pub async fn list_vulnerabilities(
    State(db): State<Database>,
) -> Result<Json<Vec<Vulnerability>>, Error> {
    Ok(Json(db.list_vulnerabilities()?))
}

pub async fn create_vulnerability(
    State(db): State<Database>,
    Json(draft): Json<VulnerabilityDraft>,
) -> Result<(StatusCode, Json<Vulnerability>), Error> {
    Ok((StatusCode::CREATED, Json(db.create_vulnerability(draft)?)))
}

pub async fn get_vulnerability(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<VulnerabilityDetail>, Error> {
    let id = VulnerabilityId(id);
    let vulnerability = db.get_vulnerability(id)?;
    let affected_technologies = db
        .affected_technologies(id)?
        .into_iter()
        .map(|(kind, short_name)| AffectedTechnology { kind, short_name })
        .collect();

    Ok(Json(VulnerabilityDetail {
        vulnerability,
        affected_technologies,
    }))
}

pub async fn update_vulnerability(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(draft): Json<VulnerabilityDraft>,
) -> Result<Json<Vulnerability>, Error> {
    Ok(Json(db.update_vulnerability(VulnerabilityId(id), draft)?))
}

pub async fn delete_vulnerability(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Error> {
    db.delete_vulnerability(VulnerabilityId(id))?;
    Ok(StatusCode::NO_CONTENT)
}
