//! Client configuration
//!
//! Where the file service and the login endpoint live, which credentials the
//! login exchange uses, and the HTTP timeout. Read from the environment;
//! binaries load `.env` first.

use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_LOGIN_ID: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin123";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const FILES_PATH: &str = "/api/v1/files";
pub const AUTH_PATH: &str = "/api/auth";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Origin of the file service, without trailing slash.
    pub api_url: String,
    /// Base of the auth endpoints; login is `{auth_url}/login`.
    pub auth_url: String,
    pub login_id: String,
    pub password: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_api_url(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    /// Defaults pointed at a given origin (used by tests against a mock server).
    pub fn with_api_url(api_url: &str) -> Self {
        let api_url = api_url.trim_end_matches('/').to_string();
        Self {
            auth_url: format!("{}{}", api_url, AUTH_PATH),
            api_url,
            login_id: DEFAULT_LOGIN_ID.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// FILEDESK_API_URL (or API_URL), FILEDESK_AUTH_URL, FILEDESK_LOGIN_ID,
    /// FILEDESK_PASSWORD, FILEDESK_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("FILEDESK_API_URL")
            .or_else(|| lookup("API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let mut config = Self::with_api_url(&api_url);

        if let Some(auth_url) = lookup("FILEDESK_AUTH_URL") {
            config.auth_url = auth_url.trim_end_matches('/').to_string();
        }
        if let Some(login_id) = lookup("FILEDESK_LOGIN_ID") {
            config.login_id = login_id;
        }
        if let Some(password) = lookup("FILEDESK_PASSWORD") {
            config.password = password;
        }
        if let Some(timeout) = lookup("FILEDESK_TIMEOUT_SECS") {
            config.timeout_secs = timeout
                .parse()
                .map_err(|_| anyhow::anyhow!("FILEDESK_TIMEOUT_SECS must be a valid number"))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let urls = [
            ("FILEDESK_API_URL", &self.api_url),
            ("FILEDESK_AUTH_URL", &self.auth_url),
        ];
        for (name, url) in urls {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!(
                    "{} must be an http(s) URL, got '{}'",
                    name,
                    url
                ));
            }
        }
        if self.timeout_secs == 0 {
            return Err(anyhow::anyhow!("FILEDESK_TIMEOUT_SECS must be greater than 0"));
        }
        Ok(())
    }

    pub fn files_url(&self) -> String {
        format!("{}{}", self.api_url, FILES_PATH)
    }

    pub fn login_url(&self) -> String {
        format!("{}/login", self.auth_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_target_local_service() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.files_url(), "http://localhost:8080/api/v1/files");
        assert_eq!(config.login_url(), "http://localhost:8080/api/auth/login");
        assert_eq!(config.login_id, "admin");
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn env_overrides_and_trims_slashes() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("API_URL", "https://files.example.com/"),
            ("FILEDESK_AUTH_URL", "https://auth.example.com/api/auth/"),
            ("FILEDESK_LOGIN_ID", "ops"),
            ("FILEDESK_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://files.example.com");
        assert_eq!(config.login_url(), "https://auth.example.com/api/auth/login");
        assert_eq!(config.login_id, "ops");
        assert_eq!(config.password, "admin123");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn primary_url_wins_over_fallback() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("FILEDESK_API_URL", "http://primary:1"),
            ("API_URL", "http://fallback:2"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://primary:1");
    }

    #[test]
    fn rejects_bad_values() {
        for pairs in [
            [("FILEDESK_TIMEOUT_SECS", "soon")],
            [("FILEDESK_TIMEOUT_SECS", "0")],
            [("FILEDESK_API_URL", "localhost:8080")],
        ] {
            assert!(ClientConfig::from_lookup(lookup(&pairs)).is_err());
        }
    }
}
