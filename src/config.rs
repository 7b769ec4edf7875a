use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://api.scraperapi.com";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scraping proxy key. Optional at startup; every fetch fails without it.
    pub api_key: Option<String>,
    pub api_url: String,
    pub timeout: Duration,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout = non_empty("SCRAPER_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Config {
            api_key: non_empty("SCRAPER_API_KEY"),
            api_url: non_empty("SCRAPER_API_URL").unwrap_or(defaults.api_url),
            timeout,
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = config_from(&[]);
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn reads_all_variables() {
        let cfg = config_from(&[
            ("SCRAPER_API_KEY", "secret"),
            ("SCRAPER_API_URL", "http://127.0.0.1:9999/"),
            ("SCRAPER_TIMEOUT_SECS", "12"),
            ("BIND_ADDR", "127.0.0.1:3000"),
        ]);
        assert_eq!(cfg.api_key.as_deref(), Some("secret"));
        assert_eq!(cfg.api_url, "http://127.0.0.1:9999/");
        assert_eq!(cfg.timeout, Duration::from_secs(12));
        assert_eq!(cfg.bind_addr, "127.0.0.1:3000");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let cfg = config_from(&[("SCRAPER_API_KEY", "   ")]);
        assert_eq!(cfg.api_key, None);
    }

    #[test]
    fn bad_timeout_falls_back_to_default() {
        assert_eq!(
            config_from(&[("SCRAPER_TIMEOUT_SECS", "soon")]).timeout,
            Duration::from_secs(5)
        );
        assert_eq!(
            config_from(&[("SCRAPER_TIMEOUT_SECS", "0")]).timeout,
            Duration::from_secs(5)
        );
    }
}
