use axum::extract::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::require_field;
use crate::api::interface::DynAPI;
use crate::entities::{Route, RouteProfile, Units};
use crate::error::Error;

#[derive(Debug, Deserialize)]
pub struct WalkParams {
    #[serde(default)]
    pub from_addr: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub route_type: String,
    /// The walk frontend defaults to metric, so the endpoint does too.
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_units() -> String {
    "metric".into()
}

#[derive(Debug, Serialize)]
pub struct WalkResponse {
    pub success: bool,
    pub route_type: String,
    #[serde(flatten)]
    pub route: Route,
}

pub async fn create_walk(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<WalkParams>,
) -> Result<Json<WalkResponse>, Error> {
    // The mode only labels the response; the provider always routes the
    // pedestrian profile.
    if !matches!(params.route_type.as_str(), "walking" | "running") {
        return Err(Error::InvalidArgument(format!(
            "route_type must be \"walking\" or \"running\", got \"{}\"",
            params.route_type
        )));
    }

    let from = require_field(&params.from_addr, "from_addr")?;
    let to = require_field(&params.to, "to")?;
    let units = Units::from_param(&params.units);

    let route = api
        .fetch_route(from, to, units, RouteProfile::Pedestrian)
        .await?;

    Ok(Json(WalkResponse {
        success: true,
        route_type: params.route_type,
        route,
    }))
}
