pub mod interface;
pub mod server;

pub use interface::{DirectionsAPI, GeocodingAPI, API};
pub use server::serve;
