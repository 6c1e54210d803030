use axum::extract::{Extension, Query};
use axum::Json;
use serde::Deserialize;

use super::require_field;
use crate::api::interface::DynAPI;
use crate::entities::{Route, RouteProfile, Units};
use crate::error::Error;

#[derive(Debug, Deserialize)]
pub struct RouteParams {
    #[serde(default)]
    pub from_addr: String,
    #[serde(default)]
    pub to: String,
    /// Defaults to imperial when the caller omits it.
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_units() -> String {
    "imperial".into()
}

pub async fn get_route(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<RouteParams>,
) -> Result<Json<Route>, Error> {
    let from = require_field(&params.from_addr, "from_addr")?;
    let to = require_field(&params.to, "to")?;
    let units = Units::from_param(&params.units);

    let route = api
        .fetch_route(from, to, units, RouteProfile::Standard)
        .await?;

    Ok(Json(route))
}
