use std::env;
use std::error::Error;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";
const DEFAULT_CONCURRENCY: usize = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Settings for the routing backend, read from the environment with
/// defaults suitable for the public OSRM demo server.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub max_concurrency: usize,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T, Box<dyn Error>>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| format!("invalid {}: {}", key, e).into()),
        Err(_) => Ok(default),
    }
}

impl OsrmConfig {
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            base_url: env::var("OSRM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            max_concurrency: env_parse("FETCH_CONCURRENCY", DEFAULT_CONCURRENCY)?,
            request_timeout: Duration::from_secs(env_parse(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            cache_ttl: Duration::from_secs(env_parse("CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?),
        })
    }
}
