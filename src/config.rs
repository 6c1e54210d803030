use std::env;

pub const API_KEY_VAR: &str = "MAPQUEST_API_KEY";
pub const API_KEY_FALLBACK_VAR: &str = "VITE_MAPQUEST_API_KEY";

const DEFAULT_API_BASE: &str = "http://www.mapquestapi.com";
const DEFAULT_PORT: u16 = 8000;

/// Process configuration, resolved from the environment once at startup and
/// injected into the provider client. The API key stays optional here so a
/// misconfigured deployment still serves the liveness probe and reports the
/// missing key per request.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub listen_port: u16,
}

impl Config {
    pub fn env() -> Self {
        let api_key = env::var(API_KEY_VAR)
            .or_else(|_| env::var(API_KEY_FALLBACK_VAR))
            .ok();

        let api_base = env::var("MAPQUEST_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());

        let listen_port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            api_key,
            api_base,
            listen_port,
        }
    }
}
