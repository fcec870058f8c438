use std::env;

pub const DEFAULT_API_VERSION: &str = "2023-05-15";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://movies.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set when AZURE_OPENAI_API_KEY and AZURE_OPENAI_DEPLOYMENT_NAME are")]
    Missing(&'static str),
}

/// Connection settings for an Azure OpenAI chat deployment.
#[derive(Clone)]
pub struct AzureSettings {
    pub api_key: String,
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
}

// Keep the key out of logs.
impl std::fmt::Debug for AzureSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureSettings")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` selects mock mode.
    pub azure: Option<AzureSettings>,
    pub database_url: String,
    pub bind_addr: String,
    pub static_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let azure = match (get("AZURE_OPENAI_API_KEY"), get("AZURE_OPENAI_DEPLOYMENT_NAME")) {
            (Some(api_key), Some(deployment)) => {
                let endpoint = get("AZURE_OPENAI_ENDPOINT")
                    .ok_or(ConfigError::Missing("AZURE_OPENAI_ENDPOINT"))?;
                Some(AzureSettings {
                    api_key,
                    endpoint,
                    deployment,
                    api_version: get("AZURE_OPENAI_API_VERSION")
                        .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
                })
            }
            _ => None,
        };

        Ok(Self {
            azure,
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            static_dir: get("STATIC_DIR"),
        })
    }
}
