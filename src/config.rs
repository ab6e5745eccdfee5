use serde::Deserialize;

use crate::error::ConfigError;

/// Credentials for the builds API, parsed from environment variables.
#[derive(Deserialize, Clone)]
pub struct Config {
    /// Identifier of the app whose builds are analysed.
    #[serde(rename = "app_slug_id")]
    pub app_slug: String,
    pub access_token: String,
}

impl Config {
    /// Reads `APP_SLUG_ID` and `ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        envy::from_env::<Config>()?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.app_slug.trim().is_empty() {
            return Err(ConfigError::Missing { var: "APP_SLUG_ID" });
        }
        if self.access_token.trim().is_empty() {
            return Err(ConfigError::Missing {
                var: "ACCESS_TOKEN",
            });
        }
        Ok(self)
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_slug", &self.app_slug)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::error::ConfigError;

    fn from_vars(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars = vars.iter().map(|(k, v)| (k.to_string(), v.to_string()));
        envy::from_iter::<_, Config>(vars)?.validated()
    }

    #[test]
    fn reads_both_variables() {
        let config = from_vars(&[
            ("APP_SLUG_ID", "abc123"),
            ("ACCESS_TOKEN", "secret"),
            ("HOME", "/root"),
        ])
        .unwrap();
        assert_eq!(config.app_slug, "abc123");
        assert_eq!(config.access_token, "secret");
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn unset_variable_is_an_error() {
        let err = from_vars(&[("APP_SLUG_ID", "abc123")]).unwrap_err();
        assert!(matches!(err, ConfigError::Env(_)));
        assert!(err.to_string().contains("access_token"));
    }

    #[test]
    fn blank_variable_is_an_error() {
        let err = from_vars(&[("APP_SLUG_ID", " "), ("ACCESS_TOKEN", "t")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var: "APP_SLUG_ID" }));

        let err = from_vars(&[("APP_SLUG_ID", "abc"), ("ACCESS_TOKEN", "")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { var: "ACCESS_TOKEN" }));
    }
}
