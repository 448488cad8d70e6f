use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    // Upstream catalog endpoint (the document database's REST facade)
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,

    // One interval for every consumer; the screens no longer disagree
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Config>()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            catalog_url: default_catalog_url(),
            refresh_interval_secs: default_refresh_interval_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_catalog_url() -> String {
    "http://localhost:8081/locais".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    60
}

fn default_fetch_timeout_secs() -> u64 {
    15
}
