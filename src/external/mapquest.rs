use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::api::interface::{DirectionsAPI, GeocodingAPI, API};
use crate::config::Config;
use crate::entities::{NormalizedLocation, Place, Route, RouteProfile, Step, Units};
use crate::error::Error;

const STATIC_MAP_BASE: &str = "https://www.mapquestapi.com/staticmap/v5/map";
const DIRECTIONS_SITE: &str = "https://www.mapquest.com/directions";
const GEOCODING_TIMEOUT: Duration = Duration::from_secs(10);

/// MapQuest-backed implementation of the API traits. Holds the resolved
/// configuration and one shared HTTP client; timeouts are applied per
/// request because the two routing profiles differ.
pub struct MapQuest {
    client: reqwest::Client,
    config: Config,
}

impl MapQuest {
    pub fn new(config: Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn key(&self) -> Result<&str, Error> {
        self.config.api_key.as_deref().ok_or(Error::MissingApiKey)
    }
}

#[async_trait]
impl DirectionsAPI for MapQuest {
    #[tracing::instrument(skip(self))]
    async fn fetch_route(
        &self,
        from: &str,
        to: &str,
        units: Units,
        profile: RouteProfile,
    ) -> Result<Route, Error> {
        let key = self.key()?;
        let url = format!("{}/directions/v2/route", self.config.api_base);

        let mut request = self
            .client
            .get(&url)
            .query(&[
                ("key", key),
                ("from", from),
                ("to", to),
                ("unit", units.provider_code()),
            ])
            .timeout(profile.timeout());

        if profile == RouteProfile::Pedestrian {
            request = request.query(&[("routeType", "pedestrian"), ("narrativeType", "text")]);
        }

        let res = request
            .send()
            .await
            .map_err(|e| Error::UpstreamUnreachable(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.json::<Value>().await.ok();
            return Err(Error::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        let data: Value = res.json().await.map_err(Error::internal)?;
        let raw_route = match data.get("route") {
            Some(route) if !route.is_null() => route.clone(),
            _ => return Err(Error::NoRouteFound),
        };

        Ok(reshape_route(raw_route, units, profile, from, to, key))
    }
}

#[async_trait]
impl GeocodingAPI for MapQuest {
    #[tracing::instrument(skip(self))]
    async fn search_places(&self, query: &str, max_results: usize) -> Result<Vec<Place>, Error> {
        let key = self.key()?;
        let url = format!("{}/geocoding/v1/address", self.config.api_base);

        let res = self
            .client
            .get(&url)
            .query(&[("key", key), ("location", query)])
            .query(&[("maxResults", max_results)])
            .timeout(GEOCODING_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::UpstreamUnreachable(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.json::<Value>().await.ok();
            return Err(Error::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        let data: Value = res.json().await.map_err(Error::internal)?;

        let mut places = Vec::new();
        for record in json_array(data.get("results")) {
            for raw_loc in json_array(record.get("locations")) {
                places.push(place_from_record(raw_loc));
            }
        }

        // The provider already caps results, but cap locally too since one
        // record can hold several locations.
        places.truncate(max_results);

        Ok(places)
    }
}

impl API for MapQuest {}

#[derive(Debug, Default, Deserialize)]
struct ProviderRoute {
    distance: Option<f64>,
    time: Option<u64>,
    #[serde(default)]
    legs: Vec<ProviderLeg>,
    shape: Option<ProviderShape>,
    #[serde(default)]
    locations: Vec<ProviderLocation>,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderLeg {
    #[serde(default)]
    maneuvers: Vec<ProviderManeuver>,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderManeuver {
    narrative: Option<String>,
    distance: Option<f64>,
    time: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderShape {
    #[serde(rename = "shapePoints", default)]
    shape_points: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderLocation {
    #[serde(default)]
    street: String,
    #[serde(rename = "adminArea5", default)]
    city: String,
    #[serde(rename = "adminArea3", default)]
    state: String,
    #[serde(rename = "adminArea1", default)]
    country: String,
    #[serde(rename = "latLng")]
    lat_lng: Option<ProviderLatLng>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
struct ProviderLatLng {
    lat: Option<f64>,
    lng: Option<f64>,
}

fn json_array(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(|v| v.as_slice())
        .unwrap_or(&[])
}

fn reshape_route(
    raw: Value,
    units: Units,
    profile: RouteProfile,
    from: &str,
    to: &str,
    key: &str,
) -> Route {
    let parsed: ProviderRoute = serde_json::from_value(raw.clone()).unwrap_or_default();

    let steps = parsed
        .legs
        .into_iter()
        .flat_map(|leg| leg.maneuvers)
        .map(|maneuver| Step {
            narrative: maneuver.narrative,
            distance: maneuver.distance,
            time: if profile.includes_step_time() {
                maneuver.time
            } else {
                None
            },
        })
        .collect();

    let shape = pair_shape_points(&parsed.shape.unwrap_or_default().shape_points);
    let locations = parsed.locations.iter().map(normalize_location).collect();

    Route {
        distance: parsed.distance,
        time_seconds: parsed.time,
        formatted_time: parsed.time.map(human_time).unwrap_or_default(),
        units: units.label(),
        steps,
        static_map_url: static_map_url(key, from, to),
        directions_link: directions_link(from, to),
        raw,
        shape,
        locations,
    }
}

/// Pairs up MapQuest's flat interleaved shape list. A dangling final
/// latitude with no longitude is dropped.
fn pair_shape_points(flat: &[f64]) -> Vec<[f64; 2]> {
    flat.chunks_exact(2).map(|pair| [pair[0], pair[1]]).collect()
}

fn human_time(seconds: u64) -> String {
    let (minutes, s) = (seconds / 60, seconds % 60);
    let (h, m) = (minutes / 60, minutes % 60);
    if h > 0 {
        format!("{h}h {m}m {s}s")
    } else if m > 0 {
        format!("{m}m {s}s")
    } else {
        format!("{s}s")
    }
}

fn join_non_empty(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

fn normalize_location(loc: &ProviderLocation) -> NormalizedLocation {
    let joined = join_non_empty(&[&loc.street, &loc.city, &loc.state]);
    let display = if joined.is_empty() {
        loc.city.clone()
    } else {
        joined
    };

    let lat_lng = loc.lat_lng.unwrap_or_default();

    NormalizedLocation {
        display,
        lat: lat_lng.lat,
        lng: lat_lng.lng,
    }
}

fn place_from_record(raw: &Value) -> Place {
    let loc: ProviderLocation = serde_json::from_value(raw.clone()).unwrap_or_default();

    let joined = join_non_empty(&[&loc.street, &loc.city, &loc.state, &loc.country]);
    let display = if !joined.is_empty() {
        joined
    } else if !loc.city.is_empty() {
        loc.city.clone()
    } else {
        loc.state.clone()
    };

    let lat_lng = loc.lat_lng.unwrap_or_default();

    Place {
        display,
        lat: lat_lng.lat,
        lng: lat_lng.lng,
        raw: raw.clone(),
    }
}

/// 800x400 preview image of the route, start/end as provider query params.
fn static_map_url(key: &str, from: &str, to: &str) -> Option<String> {
    let url = Url::parse_with_params(
        STATIC_MAP_BASE,
        &[
            ("key", key),
            ("size", "800,400"),
            ("start", from),
            ("end", to),
            ("routeColor", "4267B2"),
            ("routeWidth", "6"),
        ],
    )
    .ok()?;

    Some(url.to_string())
}

/// Deep link to the provider's own directions page, origin and destination
/// as escaped path segments.
fn directions_link(from: &str, to: &str) -> Option<String> {
    let mut url = Url::parse(DIRECTIONS_SITE).ok()?;
    url.path_segments_mut().ok()?.push(from).push(to);
    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn human_time_formats() {
        assert_eq!(human_time(3725), "1h 2m 5s");
        assert_eq!(human_time(125), "2m 5s");
        assert_eq!(human_time(42), "42s");
        assert_eq!(human_time(0), "0s");
        assert_eq!(human_time(3600), "1h 0m 0s");
    }

    #[test]
    fn even_shape_list_pairs_fully() {
        let pairs = pair_shape_points(&[39.7, -104.9, 39.8, -105.0]);
        assert_eq!(pairs, vec![[39.7, -104.9], [39.8, -105.0]]);
    }

    #[test]
    fn dangling_latitude_is_dropped() {
        let pairs = pair_shape_points(&[39.7, -104.9, 40.0]);
        assert_eq!(pairs, vec![[39.7, -104.9]]);
        assert!(pair_shape_points(&[39.7]).is_empty());
        assert!(pair_shape_points(&[]).is_empty());
    }

    #[test]
    fn display_join_skips_empty_components() {
        assert_eq!(
            join_non_empty(&["Main St", "", "Springfield"]),
            "Main St, Springfield"
        );
        assert_eq!(join_non_empty(&["", "", ""]), "");
    }

    #[test]
    fn normalized_location_falls_back_to_the_city_field() {
        let loc: ProviderLocation =
            serde_json::from_value(json!({"adminArea5": "Springfield"})).unwrap();
        assert_eq!(normalize_location(&loc).display, "Springfield");

        let empty = ProviderLocation::default();
        assert_eq!(normalize_location(&empty).display, "");
    }

    #[test]
    fn place_display_joins_whatever_components_exist() {
        let place = place_from_record(&json!({"adminArea3": "IL"}));
        assert_eq!(place.display, "IL");

        let place = place_from_record(&json!({}));
        assert_eq!(place.display, "");

        let place = place_from_record(&json!({
            "street": "1 Main St",
            "adminArea5": "Springfield",
            "adminArea3": "IL",
            "adminArea1": "US",
            "latLng": {"lat": 39.8, "lng": -89.6}
        }));
        assert_eq!(place.display, "1 Main St, Springfield, IL, US");
        assert_eq!(place.lat, Some(39.8));
        assert_eq!(place.lng, Some(-89.6));
    }

    fn sample_route() -> Value {
        json!({
            "distance": 2.4,
            "time": 3725,
            "legs": [
                {"maneuvers": [
                    {"narrative": "Start out going north.", "distance": 1.1, "time": 800},
                    {"narrative": "Turn left.", "distance": 0.7, "time": 500}
                ]},
                {"maneuvers": [
                    {"narrative": "Arrive at destination.", "distance": 0.6, "time": 400}
                ]}
            ],
            "shape": {"shapePoints": [39.7, -104.9, 39.8, -105.0, 40.0]},
            "locations": [
                {"street": "Main St", "adminArea5": "", "adminArea3": "Springfield",
                 "latLng": {"lat": 39.7, "lng": -104.9}},
                {"street": "", "adminArea5": "Denver", "adminArea3": "CO",
                 "latLng": {"lat": 39.8, "lng": -105.0}}
            ]
        })
    }

    #[test]
    fn reshape_flattens_legs_in_order() {
        let route = reshape_route(
            sample_route(),
            Units::Metric,
            RouteProfile::Standard,
            "A",
            "B",
            "test-key",
        );

        assert_eq!(route.distance, Some(2.4));
        assert_eq!(route.time_seconds, Some(3725));
        assert_eq!(route.formatted_time, "1h 2m 5s");
        assert_eq!(route.units, "km");

        let narratives: Vec<_> = route
            .steps
            .iter()
            .map(|s| s.narrative.as_deref().unwrap())
            .collect();
        assert_eq!(
            narratives,
            vec!["Start out going north.", "Turn left.", "Arrive at destination."]
        );
        assert!(route.steps.iter().all(|s| s.time.is_none()));

        assert_eq!(route.shape, vec![[39.7, -104.9], [39.8, -105.0]]);
        assert_eq!(route.locations[0].display, "Main St, Springfield");
        assert_eq!(route.locations[1].display, "Denver, CO");
        assert_eq!(route.raw, sample_route());
    }

    #[test]
    fn pedestrian_reshape_keeps_step_times() {
        let route = reshape_route(
            sample_route(),
            Units::Imperial,
            RouteProfile::Pedestrian,
            "A",
            "B",
            "test-key",
        );

        assert_eq!(route.units, "miles");
        assert_eq!(route.steps[0].time, Some(800.0));
        assert_eq!(route.steps[2].time, Some(400.0));
    }

    #[test]
    fn reshape_degrades_on_an_empty_route_object() {
        let route = reshape_route(
            json!({}),
            Units::Imperial,
            RouteProfile::Standard,
            "A",
            "B",
            "test-key",
        );

        assert_eq!(route.distance, None);
        assert_eq!(route.formatted_time, "");
        assert!(route.steps.is_empty());
        assert!(route.shape.is_empty());
        assert!(route.locations.is_empty());
        assert_eq!(route.raw, json!({}));
    }

    #[test]
    fn derived_urls_escape_their_inputs() {
        let preview = static_map_url("k", "1 Main St", "Denver, CO").unwrap();
        assert!(preview.starts_with(STATIC_MAP_BASE));
        assert!(preview.contains("size=800%2C400"));
        assert!(preview.contains("routeColor=4267B2"));
        assert!(preview.contains("routeWidth=6"));
        assert!(preview.contains("start=1+Main+St"));

        let link = directions_link("1 Main St", "Denver, CO").unwrap();
        assert_eq!(
            link,
            "https://www.mapquest.com/directions/1%20Main%20St/Denver,%20CO"
        );
    }
}
