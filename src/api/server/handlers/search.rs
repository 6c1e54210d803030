use axum::extract::{Extension, Query};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::require_field;
use crate::api::interface::DynAPI;
use crate::entities::Place;
use crate::error::Error;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(rename = "maxResults", default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    5
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<Place>,
}

pub async fn search(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, Error> {
    let query = require_field(&params.q, "q")?.to_owned();

    let results = api.search_places(&query, params.max_results).await?;

    Ok(Json(SearchResponse { query, results }))
}

/// Autocomplete alias: same geocoding lookup, same response shape.
pub async fn search_ahead(
    api: Extension<DynAPI>,
    params: Query<SearchParams>,
) -> Result<Json<SearchResponse>, Error> {
    search(api, params).await
}
