use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use cipherdir::{
    technology::{Technology, TechnologyKind},
    vulnerability::VulnerabilityId,
};
use serde::Deserialize;

use crate::{db::Database, error::Error};

#[derive(Debug, Deserialize)]
pub struct CreateTechnology {
    pub short_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTechnology {
    pub long_name: String,
}

/// Unknown kinds are reported like any other missing resource.
fn parse_kind(slug: &str) -> Result<TechnologyKind, Error> {
    TechnologyKind::from_slug(slug).ok_or_else(|| Error::not_found(format!("kind {slug:?}")))
}

pub async fn list_technologies(
    State(db): State<Database>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<Technology>>, Error> {
    Ok(Json(db.list_technologies(parse_kind(&kind)?)?))
}

/// Registers an entry ahead of any cipher suite using it. Existing entries are left untouched.
pub async fn create_technology(
    State(db): State<Database>,
    Path(kind): Path<String>,
    Json(request): Json<CreateTechnology>,
) -> Result<(StatusCode, Json<Technology>), Error> {
    let kind = parse_kind(&kind)?;
    Ok((
        StatusCode::CREATED,
        Json(db.upsert_technology(kind, &request.short_name)?),
    ))
}

pub async fn get_technology(
    State(db): State<Database>,
    Path((kind, short_name)): Path<(String, String)>,
) -> Result<Json<Technology>, Error> {
    Ok(Json(db.get_technology(parse_kind(&kind)?, &short_name)?))
}

pub async fn update_technology(
    State(db): State<Database>,
    Path((kind, short_name)): Path<(String, String)>,
    Json(request): Json<UpdateTechnology>,
) -> Result<Json<Technology>, Error> {
    let kind = parse_kind(&kind)?;
    Ok(Json(db.set_long_name(kind, &short_name, &request.long_name)?))
}

pub async fn delete_technology(
    State(db): State<Database>,
    Path((kind, short_name)): Path<(String, String)>,
) -> Result<StatusCode, Error> {
    db.delete_technology(parse_kind(&kind)?, &short_name)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn link_vulnerability(
    State(db): State<Database>,
    Path((kind, short_name, id)): Path<(String, String, i64)>,
) -> Result<Json<Technology>, Error> {
    let kind = parse_kind(&kind)?;
    Ok(Json(db.link_vulnerability(
        kind,
        &short_name,
        VulnerabilityId(id),
    )?))
}

pub async fn unlink_vulnerability(
    State(db): State<Database>,
    Path((kind, short_name, id)): Path<(String, String, i64)>,
) -> Result<Json<Technology>, Error> {
    let kind = parse_kind(&kind)?;
    Ok(Json(db.unlink_vulnerability(
        kind,
        &short_name,
        VulnerabilityId(id),
    )?))
}

// Names without `WITH` derive an entry with an empty short name. Its
// path segment is empty, so it is served by `/technologies/{kind}/`.

pub async fn get_unnamed_technology(
    db: State<Database>,
    Path(kind): Path<String>,
) -> Result<Json<Technology>, Error> {
    get_technology(db, Path((kind, String::new()))).await
}

pub async fn update_unnamed_technology(
    db: State<Database>,
    Path(kind): Path<String>,
    request: Json<UpdateTechnology>,
) -> Result<Json<Technology>, Error> {
    update_technology(db, Path((kind, String::new())), request).await
}

pub async fn delete_unnamed_technology(
    db: State<Database>,
    Path(kind): Path<String>,
) -> Result<StatusCode, Error> {
    delete_technology(db, Path((kind, String::new()))).await
}

pub async fn link_unnamed_vulnerability(
    db: State<Database>,
    Path((kind, id)): Path<(String, i64)>,
) -> Result<Json<Technology>, Error> {
    link_vulnerability(db, Path((kind, String::new(), id))).await
}

pub async fn unlink_unnamed_vulnerability(
    db: State<Database>,
    Path((kind, id)): Path<(String, i64)>,
) -> Result<Json<Technology>, Error> {
    unlink_vulnerability(db, Path((kind, String::new(), id))).await
}

#[cfg(test)]
mod tests {
    use axum::http::Method;
    use serde_json::json;

    use crate::routes::tests::{send, test_router};

    use super::*;

    #[tokio::test]
    async fn test_technology_routes() {
        let router = test_router();

        send(
            &router,
            Method::POST,
            "/cipher-suites",
            Some(json!({ "name": "TLS_ECDHE_RSA_WITH_RC4_128_SHA" })),
        )
        .await;

        let (status, body) = send(&router, Method::GET, "/technologies/kex-algorithms", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["short_name"], "ECDHE RSA");
        assert_eq!(body[0]["long_name"], "");

        let (status, body) = send(
            &router,
            Method::PATCH,
            "/technologies/enc-algorithms/RC4%20128",
            Some(json!({ "long_name": "Rivest Cipher 4 with 128 bit key" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["long_name"], "Rivest Cipher 4 with 128 bit key");

        let (status, body) = send(
            &router,
            Method::POST,
            "/vulnerabilities",
            Some(json!({ "name": "Bar Mitzvah", "cve_id": "CVE-2015-2808" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_i64().expect("numeric id");

        let link = format!("/technologies/enc-algorithms/RC4%20128/vulnerabilities/{id}");

        let (status, body) = send(&router, Method::PUT, &link, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vulnerabilities"], json!([id]));

        let (status, body) = send(&router, Method::DELETE, &link, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vulnerabilities"], json!([]));

        let (status, _) = send(
            &router,
            Method::DELETE,
            "/technologies/enc-algorithms/RC4%20128",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&router, Method::GET, "/cipher-suites", None).await;
        assert_eq!(body, json!([]), "the suite went with its algorithm");
    }

    #[tokio::test]
    async fn test_create_technology() {
        let router = test_router();

        let (status, body) = send(
            &router,
            Method::POST,
            "/technologies/hash-algorithms",
            Some(json!({ "short_name": "SM3" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["kind"], "hash_algorithm");

        send(
            &router,
            Method::PATCH,
            "/technologies/hash-algorithms/SM3",
            Some(json!({ "long_name": "ShangMi 3" })),
        )
        .await;

        let (_, body) = send(
            &router,
            Method::POST,
            "/technologies/hash-algorithms",
            Some(json!({ "short_name": "SM3" })),
        )
        .await;
        assert_eq!(body["long_name"], "ShangMi 3", "creating again keeps the entry");
    }

    #[tokio::test]
    async fn test_empty_short_name() {
        let router = test_router();

        send(
            &router,
            Method::POST,
            "/cipher-suites",
            Some(json!({ "name": "TLS_AES_128_GCM_SHA256" })),
        )
        .await;

        let (status, body) = send(&router, Method::GET, "/technologies/kex-algorithms/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["short_name"], "");

        let (status, body) = send(
            &router,
            Method::PATCH,
            "/technologies/kex-algorithms/",
            Some(json!({ "long_name": "Negotiated separately" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["long_name"], "Negotiated separately");

        let (_, body) = send(
            &router,
            Method::POST,
            "/vulnerabilities",
            Some(json!({ "name": "Raccoon" })),
        )
        .await;
        let id = body["id"].as_i64().expect("numeric id");
        let link = format!("/technologies/kex-algorithms//vulnerabilities/{id}");

        let (status, body) = send(&router, Method::PUT, &link, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vulnerabilities"], json!([id]));

        let (status, body) = send(&router, Method::DELETE, &link, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["vulnerabilities"], json!([]));

        let (status, _) = send(&router, Method::DELETE, "/technologies/kex-algorithms/", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&router, Method::GET, "/cipher-suites", None).await;
        assert_eq!(body, json!([]), "the suite went with its key exchange");

        let (status, _) = send(&router, Method::GET, "/technologies/kex-algorithms/", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_technologies() {
        let router = test_router();

        let (status, _) = send(&router, Method::GET, "/technologies/ciphers", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&router, Method::GET, "/technologies/hash-algorithms/SHA", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &router,
            Method::PUT,
            "/technologies/hash-algorithms/SHA/vulnerabilities/1",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
