use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use cipherdir::cipher_suite::CipherSuite;
use serde::Deserialize;

use crate::{
    db::Database,
    error::Error,
    services::cipher_suites::{CipherSuiteDetail, CipherSuiteService},
};

#[derive(Debug, Deserialize)]
pub struct CreateCipherSuite {
    pub name: String,
}

pub async fn list_cipher_suites(
    State(db): State<Database>,
) -> Result<Json<Vec<CipherSuite>>, Error> {
    Ok(Json(db.list_cipher_suites()?))
}

pub async fn create_cipher_suite(
    State(db): State<Database>,
    Json(request): Json<CreateCipherSuite>,
) -> Result<(StatusCode, Json<CipherSuite>), Error> {
    let suite = CipherSuiteService::create(&db, &request.name)?;
    Ok((StatusCode::CREATED, Json(suite)))
}

pub async fn get_cipher_suite(
    State(db): State<Database>,
    Path(name): Path<String>,
) -> Result<Json<CipherSuiteDetail>, Error> {
    Ok(Json(CipherSuiteService::detail(&db, &name)?))
}

pub async fn delete_cipher_suite(
    State(db): State<Database>,
    Path(name): Path<String>,
) -> Result<StatusCode, Error> {
    db.delete_cipher_suite(&name)?;
    Ok(StatusCode::NO_CONTENT)
}
