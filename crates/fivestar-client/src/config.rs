//! Client configuration.
//!
//! Config parameter | Environment Variable    | Necessity | Default
//! ---------------- | ----------------------- | --------- | -------
//! `client_id`      | `FIVESTAR_CLIENT_ID`    | Required  |
//! `api_url`        | `FIVESTAR_API_URL`      | Optional  | [`DEFAULT_API_URL`]
//! `platform`       | `FIVESTAR_PLATFORM`     | Optional  |
//! `app_version`    | `FIVESTAR_APP_VERSION`  | Optional  |
//! `device_model`   | `FIVESTAR_DEVICE_MODEL` | Optional  |
//! `os_version`     | `FIVESTAR_OS_VERSION`   | Optional  |
//! `timeout`        | `FIVESTAR_TIMEOUT_SECS` | Optional  | [`DEFAULT_TIMEOUT`]

use std::time::Duration;

use crate::ClientError;

pub const DEFAULT_API_URL: &str = "https://fivestar.support";

/// How long to wait for the service to respond.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const FIVESTAR_CLIENT_ID: &str = "FIVESTAR_CLIENT_ID";
pub const FIVESTAR_API_URL: &str = "FIVESTAR_API_URL";
pub const FIVESTAR_PLATFORM: &str = "FIVESTAR_PLATFORM";
pub const FIVESTAR_APP_VERSION: &str = "FIVESTAR_APP_VERSION";
pub const FIVESTAR_DEVICE_MODEL: &str = "FIVESTAR_DEVICE_MODEL";
pub const FIVESTAR_OS_VERSION: &str = "FIVESTAR_OS_VERSION";
pub const FIVESTAR_TIMEOUT_SECS: &str = "FIVESTAR_TIMEOUT_SECS";

/// Identifies the integrating application and, optionally, the device it runs on. Device
/// details are sent as `X-FiveStar-*` headers for fingerprinting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    client_id: String,
    api_url: String,
    platform: Option<String>,
    app_version: Option<String>,
    device_model: Option<String>,
    os_version: Option<String>,
    timeout: Duration,
}

impl ClientConfig {
    /// Configuration with defaults for everything but `client_id`.
    pub fn new(client_id: &str) -> Self {
        Self::builder(client_id).build()
    }

    pub fn builder(client_id: &str) -> ClientConfigBuilder {
        ClientConfigBuilder::new(client_id)
    }

    /// Read configuration from `FIVESTAR_*` environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from `lookup`, which maps a `FIVESTAR_*` variable name to its value.
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let client_id = get(FIVESTAR_CLIENT_ID).ok_or_else(|| {
            ClientError::InvalidConfiguration(format!("{FIVESTAR_CLIENT_ID} is not set"))
        })?;

        let mut builder = Self::builder(&client_id);

        if let Some(api_url) = get(FIVESTAR_API_URL) {
            builder = builder.api_url(&api_url);
        }
        if let Some(platform) = get(FIVESTAR_PLATFORM) {
            builder = builder.platform(&platform);
        }
        if let Some(app_version) = get(FIVESTAR_APP_VERSION) {
            builder = builder.app_version(&app_version);
        }
        if let Some(device_model) = get(FIVESTAR_DEVICE_MODEL) {
            builder = builder.device_model(&device_model);
        }
        if let Some(os_version) = get(FIVESTAR_OS_VERSION) {
            builder = builder.os_version(&os_version);
        }
        if let Some(secs) = get(FIVESTAR_TIMEOUT_SECS) {
            let secs: u64 = secs.parse().map_err(|_| {
                ClientError::InvalidConfiguration(format!(
                    "{FIVESTAR_TIMEOUT_SECS} is not a number of seconds: '{secs}'"
                ))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(builder.build())
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Base URL of the service, never with a trailing `/`
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    pub fn app_version(&self) -> Option<&str> {
        self.app_version.as_deref()
    }

    pub fn device_model(&self) -> Option<&str> {
        self.device_model.as_deref()
    }

    pub fn os_version(&self) -> Option<&str> {
        self.os_version.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

pub struct ClientConfigBuilder {
    client_id: String,
    api_url: Option<String>,
    platform: Option<String>,
    app_version: Option<String>,
    device_model: Option<String>,
    os_version: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    pub fn new(client_id: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            api_url: None,
            platform: None,
            app_version: None,
            device_model: None,
            os_version: None,
            timeout: None,
        }
    }

    pub fn api_url(mut self, api_url: &str) -> Self {
        self.api_url = Some(api_url.to_string());
        self
    }

    pub fn platform(mut self, platform: &str) -> Self {
        self.platform = Some(platform.to_string());
        self
    }

    pub fn app_version(mut self, app_version: &str) -> Self {
        self.app_version = Some(app_version.to_string());
        self
    }

    pub fn device_model(mut self, device_model: &str) -> Self {
        self.device_model = Some(device_model.to_string());
        self
    }

    pub fn os_version(mut self, os_version: &str) -> Self {
        self.os_version = Some(os_version.to_string());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> ClientConfig {
        let api_url = self.api_url.as_deref().unwrap_or(DEFAULT_API_URL);

        ClientConfig {
            client_id: self.client_id,
            api_url: api_url.trim_end_matches('/').to_string(),
            platform: self.platform,
            app_version: self.app_version,
            device_model: self.device_model,
            os_version: self.os_version,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::new("test-client");

        assert_eq!(config.client_id(), "test-client");
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.platform(), None);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = ClientConfig::builder("c")
            .api_url("https://custom.example.com//")
            .build();

        assert_eq!(config.api_url(), "https://custom.example.com");
    }

    #[test]
    fn from_lookup_reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (FIVESTAR_CLIENT_ID, "env-client"),
            (FIVESTAR_API_URL, "http://localhost:3000/"),
            (FIVESTAR_PLATFORM, "linux"),
            (FIVESTAR_APP_VERSION, "2.4.1"),
            (FIVESTAR_DEVICE_MODEL, "thinkpad"),
            (FIVESTAR_OS_VERSION, "6.8"),
            (FIVESTAR_TIMEOUT_SECS, "3"),
        ]))
        .unwrap();

        assert_eq!(config.client_id(), "env-client");
        assert_eq!(config.api_url(), "http://localhost:3000");
        assert_eq!(config.platform(), Some("linux"));
        assert_eq!(config.app_version(), Some("2.4.1"));
        assert_eq!(config.device_model(), Some("thinkpad"));
        assert_eq!(config.os_version(), Some("6.8"));
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn from_lookup_requires_client_id() {
        let result = ClientConfig::from_lookup(lookup_from(&[(FIVESTAR_CLIENT_ID, "")]));
        assert!(matches!(result, Err(ClientError::InvalidConfiguration(_))));

        let result = ClientConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ClientError::InvalidConfiguration(_))));
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let result = ClientConfig::from_lookup(lookup_from(&[
            (FIVESTAR_CLIENT_ID, "c"),
            (FIVESTAR_TIMEOUT_SECS, "soon"),
        ]));

        assert!(matches!(result, Err(ClientError::InvalidConfiguration(_))));
    }
}
