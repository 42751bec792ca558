use std::time::Duration;

use reelsync_core::links::parse_database_id;
use reelsync_core::row::PropertyNames;

/// Watchlist database watched when `NOTION_DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str =
    "https://www.notion.so/09f8cae7e34149c28a7662ae07f4f599?v=ee890a52135c4f079cc8d0b1e1202e1f";

/// Base of the detail page URL written into each row.
pub const DEFAULT_DETAIL_BASE_URL: &str = "https://www.imdb.com/title";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;
const DEFAULT_DEBOUNCE_SECS: u64 = 20;

/// Startup configuration errors. All of them are fatal.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Worker configuration loaded from environment variables.
///
/// Credentials are required; everything else has a default.
#[derive(Clone)]
pub struct WorkerConfig {
    /// Notion integration token.
    pub notion_token: String,
    /// OMDb API key.
    pub omdb_api_key: String,
    pub omdb_base_url: String,
    /// Compact id of the watched database.
    pub database_id: String,
    pub detail_base_url: String,
    pub poll_interval: Duration,
    /// Grace period before a new row is read, to let the user finish typing.
    pub debounce: Duration,
    /// Treat pre-existing rows without a detail URL as new at startup.
    pub backfill: bool,
    pub properties: PropertyNames,
}

impl WorkerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                         |
    /// |------------------------|---------------------------------|
    /// | `NOTION_TOKEN`         | required                        |
    /// | `OMDB_API_KEY`         | required                        |
    /// | `OMDB_BASE_URL`        | `https://www.omdbapi.com`       |
    /// | `NOTION_DATABASE_URL`  | [`DEFAULT_DATABASE_URL`]        |
    /// | `DETAIL_BASE_URL`      | `https://www.imdb.com/title`    |
    /// | `POLL_INTERVAL_SECS`   | `2`                             |
    /// | `ENRICH_DEBOUNCE_SECS` | `20`                            |
    /// | `BACKFILL_ON_START`    | `false`                         |
    /// | `PROP_TITLE`           | `Name`                          |
    /// | `PROP_TYPE`            | `Type`                          |
    /// | `PROP_DETAIL_URL`      | `IMDb`                          |
    /// | `PROP_GENRE`           | `Genre`                         |
    /// | `PROP_RATING`          | `Rating`                        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| get(var).filter(|v| !v.trim().is_empty());

        let notion_token = get("NOTION_TOKEN").ok_or(ConfigError::Missing("NOTION_TOKEN"))?;
        let omdb_api_key = get("OMDB_API_KEY").ok_or(ConfigError::Missing("OMDB_API_KEY"))?;

        let database_url =
            get("NOTION_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let database_id =
            parse_database_id(&database_url).ok_or_else(|| ConfigError::Invalid {
                var: "NOTION_DATABASE_URL",
                value: database_url.clone(),
            })?;

        let poll_interval = Duration::from_secs(parse_or(
            "POLL_INTERVAL_SECS",
            get("POLL_INTERVAL_SECS"),
            DEFAULT_POLL_INTERVAL_SECS,
        )?);
        let debounce = Duration::from_secs(parse_or(
            "ENRICH_DEBOUNCE_SECS",
            get("ENRICH_DEBOUNCE_SECS"),
            DEFAULT_DEBOUNCE_SECS,
        )?);
        let backfill = match get("BACKFILL_ON_START") {
            None => false,
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                var: "BACKFILL_ON_START",
                value,
            })?,
        };

        let defaults = PropertyNames::default();
        let properties = PropertyNames {
            title: get("PROP_TITLE").unwrap_or(defaults.title),
            kind: get("PROP_TYPE").unwrap_or(defaults.kind),
            detail_url: get("PROP_DETAIL_URL").unwrap_or(defaults.detail_url),
            genre: get("PROP_GENRE").unwrap_or(defaults.genre),
            rating: get("PROP_RATING").unwrap_or(defaults.rating),
        };

        Ok(Self {
            notion_token,
            omdb_api_key,
            omdb_base_url: get("OMDB_BASE_URL")
                .unwrap_or_else(|| reelsync_imdb::api::DEFAULT_BASE_URL.to_string()),
            database_id,
            detail_base_url: get("DETAIL_BASE_URL")
                .unwrap_or_else(|| DEFAULT_DETAIL_BASE_URL.to_string()),
            poll_interval,
            debounce,
            backfill,
            properties,
        })
    }
}

fn parse_or(var: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<WorkerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        WorkerConfig::from_lookup(|var| map.get(var).cloned())
    }

    const CREDENTIALS: [(&str, &str); 2] = [("NOTION_TOKEN", "secret"), ("OMDB_API_KEY", "key")];

    #[test]
    fn defaults_apply() {
        let config = load(&CREDENTIALS).unwrap();
        assert_eq!(config.database_id, "09f8cae7e34149c28a7662ae07f4f599");
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.debounce, Duration::from_secs(20));
        assert!(!config.backfill);
        assert_eq!(config.detail_base_url, DEFAULT_DETAIL_BASE_URL);
        assert_eq!(config.properties, PropertyNames::default());
    }

    #[test]
    fn missing_token_is_fatal() {
        assert_eq!(
            load(&[("OMDB_API_KEY", "key")]).err(),
            Some(ConfigError::Missing("NOTION_TOKEN"))
        );
        assert_eq!(
            load(&[("NOTION_TOKEN", " "), ("OMDB_API_KEY", "key")]).err(),
            Some(ConfigError::Missing("NOTION_TOKEN"))
        );
    }

    #[test]
    fn missing_lookup_key_is_fatal() {
        assert_eq!(
            load(&[("NOTION_TOKEN", "secret")]).err(),
            Some(ConfigError::Missing("OMDB_API_KEY"))
        );
    }

    #[test]
    fn overrides_are_read() {
        let mut vars = CREDENTIALS.to_vec();
        vars.extend([
            ("NOTION_DATABASE_URL", "0123456789abcdef0123456789abcdef"),
            ("POLL_INTERVAL_SECS", "10"),
            ("ENRICH_DEBOUNCE_SECS", "0"),
            ("BACKFILL_ON_START", "yes"),
            ("PROP_DETAIL_URL", "Link"),
        ]);
        let config = load(&vars).unwrap();
        assert_eq!(config.database_id, "0123456789abcdef0123456789abcdef");
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.debounce, Duration::ZERO);
        assert!(config.backfill);
        assert_eq!(config.properties.detail_url, "Link");
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let mut vars = CREDENTIALS.to_vec();
        vars.push(("POLL_INTERVAL_SECS", "soon"));
        assert_eq!(
            load(&vars).err(),
            Some(ConfigError::Invalid {
                var: "POLL_INTERVAL_SECS",
                value: "soon".into()
            })
        );
    }

    #[test]
    fn invalid_database_url_is_rejected() {
        let mut vars = CREDENTIALS.to_vec();
        vars.push(("NOTION_DATABASE_URL", "https://www.notion.so/"));
        assert!(matches!(
            load(&vars),
            Err(ConfigError::Invalid {
                var: "NOTION_DATABASE_URL",
                ..
            })
        ));
    }
}
