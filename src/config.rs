use std::env;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// Only the exact value `prod` selects production.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("prod") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub token: String,
    pub port: u16,
    pub openweather_base_url: String,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_value(lookup("ENVIRONMENT").as_deref());

        let token = lookup("TOKEN")
            .filter(|token| !token.is_empty())
            .ok_or_else(|| anyhow::anyhow!("TOKEN not set"))?;

        let port = if environment.is_production() {
            let raw = lookup("PORT")
                .ok_or_else(|| anyhow::anyhow!("PORT not set (required when ENVIRONMENT=prod)"))?;
            raw.trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("PORT is not a valid port number ({raw}): {e}"))?
        } else {
            DEFAULT_PORT
        };

        let openweather_base_url = lookup("OPENWEATHER_BASE_URL")
            .unwrap_or_else(|| DEFAULT_OPENWEATHER_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    anyhow::anyhow!("UPSTREAM_TIMEOUT_SECS is not a number of seconds ({raw}): {e}")
                })?;
                if secs == 0 {
                    anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be at least 1");
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        Ok(Config {
            environment,
            token,
            port,
            openweather_base_url,
            upstream_timeout,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
