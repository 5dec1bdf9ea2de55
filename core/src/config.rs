//! Client configuration: where to send requests and which credentials to use.

use std::fmt;

use url::Url;

use crate::error::ApiError;

/// Production endpoint of the postal shipping API.
pub const DEFAULT_BASE_URL: &str = "https://otpravka-api.pochta.ru/";

pub const ENV_BASE_URL: &str = "OTPRAVKA_BASE_URL";
pub const ENV_API_KEY: &str = "OTPRAVKA_API_KEY";
pub const ENV_ACCESS_TOKEN: &str = "OTPRAVKA_ACCESS_TOKEN";

/// Immutable settings shared by every call a `Client` makes.
///
/// `Debug` output redacts both credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    api_key: String,
    access_token: String,
}

impl ClientConfig {
    /// Configuration against [`DEFAULT_BASE_URL`].
    pub fn new(
        api_key: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            api_key: api_key.into(),
            access_token: access_token.into(),
        })
    }

    /// Replace the base URL. A trailing slash is added when missing so that
    /// relative request paths resolve beneath it.
    pub fn with_base_url(self, base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..self
        })
    }

    /// Build from `OTPRAVKA_API_KEY`, `OTPRAVKA_ACCESS_TOKEN` and the optional
    /// `OTPRAVKA_BASE_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let api_key = lookup(ENV_API_KEY).ok_or(ApiError::MissingCredential(ENV_API_KEY))?;
        let access_token =
            lookup(ENV_ACCESS_TOKEN).ok_or(ApiError::MissingCredential(ENV_ACCESS_TOKEN))?;
        let config = Self::new(api_key, access_token)?;
        match lookup(ENV_BASE_URL).filter(|url| !url.is_empty()) {
            Some(url) => config.with_base_url(&url),
            None => Ok(config),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_to_production_endpoint() {
        let config = ClientConfig::new("key", "token").unwrap();
        assert_eq!(config.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let config = ClientConfig::new("key", "token")
            .unwrap()
            .with_base_url("http://127.0.0.1:3000/proxy")
            .unwrap();
        assert_eq!(config.base_url().as_str(), "http://127.0.0.1:3000/proxy/");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ClientConfig::new("key", "token")
            .unwrap()
            .with_base_url("not a url")
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn debug_redacts_credentials() {
        let config = ClientConfig::new("secret-key", "secret-token").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("otpravka-api.pochta.ru"));
    }

    #[test]
    fn env_lookup_reads_credentials_and_base_url() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "k"),
            (ENV_ACCESS_TOKEN, "t"),
            (ENV_BASE_URL, "http://localhost:8080"),
        ]))
        .unwrap();
        assert_eq!(config.api_key(), "k");
        assert_eq!(config.access_token(), "t");
        assert_eq!(config.base_url().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn env_lookup_requires_credentials() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, "k")])).unwrap_err();
        assert!(matches!(err, ApiError::MissingCredential(ENV_ACCESS_TOKEN)));
    }
}
