use std::path::PathBuf;

use eyre::WrapErr;
use models::config::{BannerSettings, DEFAULT_REFRESH_INTERVAL_HOURS, DEFAULT_TOP_MOVIES_COUNT};

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) port: u16,
    pub(crate) settings: BannerSettings,
    pub(crate) tmdb_base_url: String,
    pub(crate) catalog_path: PathBuf,
    pub(crate) script_path: PathBuf,
    pub(crate) web_path: Option<PathBuf>,
    pub(crate) public_url: String,
    pub(crate) inject_script: bool,
}

impl Config {
    pub(crate) fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let port = lookup("BANNER_PORT")
            .unwrap_or_else(|| "8097".to_string())
            .parse::<u16>()
            .wrap_err("BANNER_PORT must be a valid u16")?;
        let tmdb_api_key = lookup("TMDB_API_KEY").filter(|key| !key.trim().is_empty());
        let tmdb_base_url =
            lookup("TMDB_BASE_URL").unwrap_or_else(|| tmdb_client::DEFAULT_BASE_URL.to_string());
        let top_movies_count = match lookup("TOP_MOVIES_COUNT") {
            Some(value) => value
                .trim()
                .parse::<i32>()
                .wrap_err("TOP_MOVIES_COUNT must be a valid integer")?,
            None => DEFAULT_TOP_MOVIES_COUNT,
        };
        let refresh_interval_hours = match lookup("REFRESH_INTERVAL_HOURS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .wrap_err("REFRESH_INTERVAL_HOURS must be a valid u64")?,
            None => DEFAULT_REFRESH_INTERVAL_HOURS,
        };
        let catalog_path: PathBuf = lookup("CATALOG_PATH")
            .unwrap_or_else(|| "data/catalog.json".to_string())
            .into();
        let script_path: PathBuf = lookup("BANNER_SCRIPT_PATH")
            .unwrap_or_else(|| "data/banner.js".to_string())
            .into();
        let web_path = lookup("WEB_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        let public_url = lookup("BANNER_PUBLIC_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();
        let inject_script = match lookup("INJECT_SCRIPT") {
            Some(value) => parse_bool(&value).wrap_err("INJECT_SCRIPT must be true or false")?,
            None => true,
        };

        Ok(Self {
            port,
            settings: BannerSettings {
                tmdb_api_key,
                top_movies_count,
                refresh_interval_hours,
            },
            tmdb_base_url,
            catalog_path,
            script_path,
            web_path,
            public_url,
            inject_script,
        })
    }
}

fn parse_bool(value: &str) -> eyre::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(eyre::eyre!("unrecognised boolean: {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> eyre::Result<Config> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8097);
        assert_eq!(config.settings.tmdb_api_key, None);
        assert_eq!(config.settings.top_movies_count, 10);
        assert_eq!(config.settings.refresh_interval_hours, 24);
        assert_eq!(config.tmdb_base_url, tmdb_client::DEFAULT_BASE_URL);
        assert_eq!(config.catalog_path, PathBuf::from("data/catalog.json"));
        assert_eq!(config.web_path, None);
        assert_eq!(config.public_url, "");
        assert!(config.inject_script);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("BANNER_PORT", "9000"),
            ("TMDB_API_KEY", "abc"),
            ("TOP_MOVIES_COUNT", " 5 "),
            ("REFRESH_INTERVAL_HOURS", "6"),
            ("WEB_PATH", "/srv/web"),
            ("BANNER_PUBLIC_URL", "http://media.lan:8097/"),
            ("INJECT_SCRIPT", "off"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.settings.tmdb_api_key.as_deref(), Some("abc"));
        assert_eq!(config.settings.top_movies_count, 5);
        assert_eq!(config.settings.refresh_interval_hours, 6);
        assert_eq!(config.web_path, Some(PathBuf::from("/srv/web")));
        assert_eq!(config.public_url, "http://media.lan:8097");
        assert!(!config.inject_script);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = config_from(&[("TMDB_API_KEY", "  ")]).unwrap();
        assert_eq!(config.settings.tmdb_api_key, None);
    }

    #[test]
    fn negative_top_count_is_accepted() {
        let config = config_from(&[("TOP_MOVIES_COUNT", "-1")]).unwrap();
        assert_eq!(config.settings.top_movies_count, -1);
    }

    #[test]
    fn rejects_invalid_numbers() {
        assert!(config_from(&[("BANNER_PORT", "nope")]).is_err());
        assert!(config_from(&[("TOP_MOVIES_COUNT", "ten")]).is_err());
        assert!(config_from(&[("REFRESH_INTERVAL_HOURS", "-3")]).is_err());
        assert!(config_from(&[("INJECT_SCRIPT", "maybe")]).is_err());
    }
}
