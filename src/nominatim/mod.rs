mod client;

use std::time::Duration;

pub use client::*;
use ureq::Agent;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

#[derive(Clone)]
pub struct NominatimClient {
    url: String,
    pub agent: Agent,
}

impl Default for NominatimClient {
    fn default() -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(5)))
            .build();
        let agent: Agent = config.into();
        NominatimClient {
            agent,
            url: NOMINATIM_URL.to_string(),
        }
    }
}

impl NominatimClient {
    pub fn new(url: &str) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(5)))
            .build();
        let agent: Agent = config.into();
        NominatimClient {
            agent,
            url: url.to_string(),
        }
    }

    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
    }
}
