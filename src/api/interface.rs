use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Place, Route, RouteProfile, Units};
use crate::error::Error;

#[async_trait]
pub trait DirectionsAPI {
    /// One outbound directions call plus the reshape into [`Route`]. Shared
    /// by the standard and pedestrian endpoints, which differ only in the
    /// profile they pass.
    async fn fetch_route(
        &self,
        from: &str,
        to: &str,
        units: Units,
        profile: RouteProfile,
    ) -> Result<Route, Error>;
}

#[async_trait]
pub trait GeocodingAPI {
    async fn search_places(&self, query: &str, max_results: usize) -> Result<Vec<Place>, Error>;
}

pub trait API: DirectionsAPI + GeocodingAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
