use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Unit preference carried through a route request. Maps 1:1 to MapQuest's
/// single-letter unit code; the human label is derived from that code, never
/// from the original query string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Units {
    Metric,
    Imperial,
}

impl Units {
    /// Anything other than "metric" is treated as imperial, including the
    /// omitted-parameter defaults the handlers fill in.
    pub fn from_param(param: &str) -> Self {
        if param == "metric" {
            Units::Metric
        } else {
            Units::Imperial
        }
    }

    pub fn provider_code(self) -> &'static str {
        match self {
            Units::Metric => "k",
            Units::Imperial => "m",
        }
    }

    pub fn label(self) -> &'static str {
        match self.provider_code() {
            "k" => "km",
            _ => "miles",
        }
    }
}

/// Which MapQuest routing profile a request runs under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteProfile {
    Standard,
    /// Foot traffic, used for both "walking" and "running" requests. Gets a
    /// longer upstream timeout and per-step times in the reshaped result.
    Pedestrian,
}

impl RouteProfile {
    pub fn timeout(self) -> Duration {
        match self {
            RouteProfile::Standard => Duration::from_secs(10),
            RouteProfile::Pedestrian => Duration::from_secs(15),
        }
    }

    pub fn includes_step_time(self) -> bool {
        matches!(self, RouteProfile::Pedestrian)
    }
}

/// One narrative maneuver, flattened out of the provider's legs.
#[derive(Clone, Debug, Serialize)]
pub struct Step {
    pub narrative: Option<String>,
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

/// A route endpoint reduced to a display label plus coordinates, independent
/// of MapQuest's address field names.
#[derive(Clone, Debug, Serialize)]
pub struct NormalizedLocation {
    pub display: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// The normalized route returned to the frontend. `raw` is the provider's
/// `route` object passed through verbatim as an escape hatch.
#[derive(Clone, Debug, Serialize)]
pub struct Route {
    pub distance: Option<f64>,
    pub time_seconds: Option<u64>,
    pub formatted_time: String,
    pub units: &'static str,
    pub steps: Vec<Step>,
    pub static_map_url: Option<String>,
    pub directions_link: Option<String>,
    pub raw: Value,
    pub shape: Vec<[f64; 2]>,
    pub locations: Vec<NormalizedLocation>,
}
