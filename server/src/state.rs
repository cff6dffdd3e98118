use axum::extract::FromRef;

use crate::{db::Database, fetcher::DocumentSource};

/// What every request handler has access to.
#[derive(Debug, Clone)]
pub struct AppState<S> {
    pub db: Database,
    pub source: S,
}

impl<S: DocumentSource> AppState<S> {
    pub fn new(db: Database, source: S) -> Self {
        Self { db, source }
    }
}

impl<S> FromRef<AppState<S>> for Database {
    fn from_ref(state: &AppState<S>) -> Self {
        state.db.clone()
    }
}
