mod place;
mod route;

pub use place::Place;
pub use route::{NormalizedLocation, Route, RouteProfile, Step, Units};
