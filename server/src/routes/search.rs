use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    db::Database,
    error::Error,
    services::search::{SearchResults, SearchService},
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub async fn search(
    State(db): State<Database>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, Error> {
    let term = params.q.unwrap_or_default();
    Ok(Json(SearchService::search(&db, &term)?))
}
