use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use cipherdir::rfc::{Rfc, RfcDraft, RfcNumber};
use serde::Deserialize;

use crate::{
    db::Database,
    error::Error,
    fetcher::DocumentSource,
    services::rfcs::{RfcDetail, RfcService},
    state::AppState,
};

/// Links of an RFC. Everything else is fetched from the published document.
#[derive(Debug, Default, Deserialize)]
pub struct RfcLinks {
    #[serde(default)]
    pub defined_cipher_suites: Vec<String>,
    #[serde(default)]
    pub related_documents: Vec<RfcNumber>,
}

fn parse_number(number: &str) -> Result<RfcNumber, Error> {
    number
        .parse()
        .map_err(|_| Error::not_found(format!("RFC {number:?}")))
}

pub async fn list_rfcs(State(db): State<Database>) -> Result<Json<Vec<Rfc>>, Error> {
    Ok(Json(db.list_rfcs()?))
}

pub async fn create_rfc<S: DocumentSource>(
    State(state): State<AppState<S>>,
    Json(draft): Json<RfcDraft>,
) -> Result<(StatusCode, Json<Rfc>), Error> {
    let rfc = RfcService::create(&state.db, &state.source, draft).await?;
    Ok((StatusCode::CREATED, Json(rfc)))
}

/// Saves the RFC again: the document is fetched anew and the links replaced.
pub async fn update_rfc<S: DocumentSource>(
    State(state): State<AppState<S>>,
    Path(number): Path<String>,
    Json(links): Json<RfcLinks>,
) -> Result<Json<Rfc>, Error> {
    let draft = RfcDraft {
        number: parse_number(&number)?,
        defined_cipher_suites: links.defined_cipher_suites,
        related_documents: links.related_documents,
    };

    Ok(Json(RfcService::create(&state.db, &state.source, draft).await?))
}

pub async fn get_rfc(
    State(db): State<Database>,
    Path(number): Path<String>,
) -> Result<Json<RfcDetail>, Error> {
    Ok(Json(RfcService::detail(&db, parse_number(&number)?)?))
}

pub async fn delete_rfc(
    State(db): State<Database>,
    Path(number): Path<String>,
) -> Result<StatusCode, Error> {
    db.delete_rfc(parse_number(&number)?)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::Method;
    use serde_json::json;

    use crate::routes::tests::{send, test_router};

    use super::*;

    #[tokio::test]
    async fn test_rfc_routes() {
        let router = test_router();

        let (status, _) = send(
            &router,
            Method::POST,
            "/cipher-suites",
            Some(json!({ "name": "TLS_RSA_WITH_AES_128_CBC_SHA256" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            &router,
            Method::POST,
            "/rfcs",
            Some(json!({
                "number": 5246,
                "defined_cipher_suites": ["TLS_RSA_WITH_AES_128_CBC_SHA256"],
                // Client-provided metadata is ignored
                "title": "Something else",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body["title"],
            "The Transport Layer Security (TLS) Protocol Version 1.2"
        );
        assert_eq!(body["status"], "PST");
        assert_eq!(body["release_year"], 2008);

        let (status, body) = send(&router, Method::GET, "/rfcs/5246", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status_label"], "Proposed Standard");
        assert_eq!(
            body["defined_cipher_suites"][0]["name"],
            "TLS_RSA_WITH_AES_128_CBC_SHA256"
        );

        let (status, body) = send(
            &router,
            Method::PUT,
            "/rfcs/5246",
            Some(json!({ "defined_cipher_suites": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["defined_cipher_suites"], json!([]));

        let (status, body) = send(&router, Method::GET, "/rfcs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["number"], 5246);

        let (status, _) = send(&router, Method::DELETE, "/rfcs/5246", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&router, Method::GET, "/rfcs/5246", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unavailable_document() {
        let router = test_router();

        let (status, body) =
            send(&router, Method::POST, "/rfcs", Some(json!({ "number": 404 }))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], 502);

        let (_, body) = send(&router, Method::GET, "/rfcs", None).await;
        assert_eq!(body, json!([]), "nothing was written");
    }

    #[tokio::test]
    async fn test_invalid_numbers() {
        let router = test_router();

        let (status, _) = send(&router, Method::GET, "/rfcs/0", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&router, Method::GET, "/rfcs/tls", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&router, Method::POST, "/rfcs", Some(json!({ "number": 0 }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
