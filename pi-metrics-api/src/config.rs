use std::net::SocketAddr;

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub service_role_key: String,
    // Listening port. Defaults to 5000 when PORT is unset or empty.
    pub port: u16,
    // Timeout in seconds for outbound requests to the hosted database.
    // If not set, a sensible default is applied in `AppState`.
    pub upstream_timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Lookup is injected so tests never mutate the real process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let supabase_url = require(&lookup, "SUPABASE_URL")?;
        let service_role_key = require(&lookup, "SUPABASE_SERVICE_ROLE_KEY")?;

        let port = match non_empty(&lookup, "PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("Invalid PORT '{}': {}", raw, e))?,
            None => DEFAULT_PORT,
        };

        let upstream_timeout_secs = match non_empty(&lookup, "UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => Some(raw.parse::<u64>().map_err(|e| {
                anyhow::anyhow!("Invalid UPSTREAM_TIMEOUT_SECS '{}': {}", raw, e)
            })?),
            None => None,
        };

        Ok(Config {
            supabase_url,
            service_role_key,
            port,
            upstream_timeout_secs,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn require<F>(lookup: &F, key: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).ok_or_else(|| anyhow::anyhow!("Missing environment variable {}", key))
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}
