use serde::Serialize;
use serde_json::Value;

/// One geocoding candidate. `raw` is the provider's location record passed
/// through verbatim.
#[derive(Clone, Debug, Serialize)]
pub struct Place {
    pub display: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub raw: Value,
}
