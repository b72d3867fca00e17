use async_trait::async_trait;
use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_APP_NAME: &str = "Bitbucket Integration";
const DEFAULT_SCOPES: &str = "account,repository";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Clone, Debug)]
pub struct AppContext {
    pub host: String,
    pub port: u16,
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct BitbucketContext {
    pub app_key: String,
    pub app_name: String,
    pub app_description: String,
    pub vendor_name: String,
    pub vendor_url: String,
    pub scopes: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Context {
    pub app: AppContext,
    pub bitbucket: BitbucketContext,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct BitbucketConfig {
    pub app_key: String,
    pub app_name: String,
    pub app_description: String,
    pub vendor_name: String,
    pub vendor_url: String,
    pub scopes: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppConfig,
    pub bitbucket: BitbucketConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(port) => port.parse::<u16>().map_err(|err| ConfigError::Invalid {
                var: "PORT",
                reason: err.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let url = lookup("URL").unwrap_or_else(|| format!("http://{}:{}", host, port));
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "URL",
                reason: String::from("expected an http(s) url"),
            });
        }
        let url = url.trim_end_matches('/').to_string();

        let app_key = lookup("BITBUCKET_APP_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("BITBUCKET_APP_KEY"))?;
        let app_name = lookup("BITBUCKET_APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string());
        let app_description = lookup("BITBUCKET_APP_DESCRIPTION").unwrap_or_default();
        let vendor_name = lookup("BITBUCKET_VENDOR_NAME").unwrap_or_else(|| app_name.clone());
        let vendor_url = lookup("BITBUCKET_VENDOR_URL").unwrap_or_else(|| url.clone());
        let scopes = lookup("BITBUCKET_SCOPES")
            .unwrap_or_else(|| DEFAULT_SCOPES.to_string())
            .split(',')
            .map(str::trim)
            .filter(|scope| !scope.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            app: AppConfig { host, port, url },
            bitbucket: BitbucketConfig {
                app_key,
                app_name,
                app_description,
                vendor_name,
                vendor_url,
                scopes,
            },
        })
    }
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Context;
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Context {
        Context {
            app: AppContext {
                host: self.app.host,
                port: self.app.port,
                url: self.app.url,
            },
            bitbucket: BitbucketContext {
                app_key: self.bitbucket.app_key,
                app_name: self.bitbucket.app_name,
                app_description: self.bitbucket.app_description,
                vendor_name: self.bitbucket.vendor_name,
                vendor_url: self.bitbucket.vendor_url,
                scopes: self.bitbucket.scopes,
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars = vars.iter().copied().collect::<HashMap<_, _>>();
        Config::from_lookup(|var| vars.get(var).map(|value| value.to_string()))
    }

    #[test]
    fn should_fill_in_defaults() {
        let config = config(&[("BITBUCKET_APP_KEY", "codehooks")]).unwrap();

        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 8000);
        assert_eq!(config.app.url, "http://0.0.0.0:8000");
        assert_eq!(config.bitbucket.app_name, "Bitbucket Integration");
        assert_eq!(config.bitbucket.vendor_name, "Bitbucket Integration");
        assert_eq!(config.bitbucket.vendor_url, "http://0.0.0.0:8000");
        assert_eq!(config.bitbucket.scopes, vec!["account", "repository"]);
    }

    #[test]
    fn should_require_an_app_key() {
        assert_eq!(
            config(&[]).unwrap_err(),
            ConfigError::Missing("BITBUCKET_APP_KEY")
        );
        assert_eq!(
            config(&[("BITBUCKET_APP_KEY", "  ")]).unwrap_err(),
            ConfigError::Missing("BITBUCKET_APP_KEY")
        );
    }

    #[test]
    fn should_reject_bad_port_and_url() {
        assert!(matches!(
            config(&[("BITBUCKET_APP_KEY", "k"), ("PORT", "eighty")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        ));
        assert!(matches!(
            config(&[("BITBUCKET_APP_KEY", "k"), ("URL", "ftp://hooks.example.com")]),
            Err(ConfigError::Invalid { var: "URL", .. })
        ));
    }

    #[test]
    fn should_parse_scopes_and_trim_url() {
        let config = config(&[
            ("BITBUCKET_APP_KEY", "k"),
            ("URL", "https://hooks.example.com/"),
            ("BITBUCKET_SCOPES", "repository, pullrequest,,webhook"),
        ])
        .unwrap();

        assert_eq!(config.app.url, "https://hooks.example.com");
        assert_eq!(
            config.bitbucket.scopes,
            vec!["repository", "pullrequest", "webhook"]
        );
    }
}
