use crate::config::Config;
use reqwest::{Client, Url};
use tracing::debug;

pub struct AppState {
    pub client: Client,
    pub supabase_url: Url,
    pub service_role_key: String,
}

impl AppState {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let timeout = std::time::Duration::from_secs(cfg.upstream_timeout_secs.unwrap_or(10));
        let client = Client::builder().timeout(timeout).build()?;
        debug!("HTTP client created with timeout: {:?}", timeout);

        // Parse and validate the upstream URL at startup
        let supabase_url = Url::parse(&cfg.supabase_url)
            .map_err(|e| anyhow::anyhow!("Invalid Supabase URL '{}': {}", cfg.supabase_url, e))?;

        Ok(AppState {
            client,
            supabase_url,
            service_role_key: cfg.service_role_key.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> Config {
        Config {
            supabase_url: url.to_string(),
            service_role_key: "secret".to_string(),
            port: 5000,
            upstream_timeout_secs: Some(1),
        }
    }

    #[test]
    fn appstate_from_config_parses_url() {
        let st = AppState::from_config(&config("https://proj.supabase.co")).expect("build state");
        assert_eq!(st.supabase_url.as_str(), "https://proj.supabase.co/");
        assert_eq!(st.service_role_key, "secret");
    }

    #[test]
    fn appstate_rejects_invalid_url() {
        let result = AppState::from_config(&config("not-a-valid-url"));
        assert!(result.is_err(), "should fail with invalid URL");
        if let Err(e) = result {
            let err_msg = e.to_string();
            assert!(
                err_msg.contains("Invalid Supabase URL"),
                "error message should mention invalid URL: {}",
                err_msg
            );
        }
    }
}
