use std::{
    fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;
use shared::error::ShortenError;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "shortener.toml";
pub const DEFAULT_ENDPOINT: &str = "https://clicksfly.com/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            api_key: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for ServiceSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ServiceSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn endpoint_url(&self) -> Result<Url, ShortenError> {
        let url = Url::parse(self.endpoint.trim()).map_err(|err| ShortenError::NotConfigured {
            reason: format!("endpoint '{}' is not a valid URL: {err}", self.endpoint),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ShortenError::NotConfigured {
                reason: format!("endpoint '{}' must use http or https", self.endpoint),
            });
        }
        Ok(url)
    }

    pub fn api_key(&self) -> Result<&str, ShortenError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ShortenError::NotConfigured {
                reason: "no API key set (SHORTENER_API_KEY or api_key in shortener.toml)"
                    .to_string(),
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ShortenError> {
        self.endpoint_url()?;
        self.api_key()?;
        if self.request_timeout_secs == 0 {
            return Err(ShortenError::NotConfigured {
                reason: "request_timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    endpoint: Option<String>,
    api_key: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Layers defaults, the settings file and the environment, in that order.
///
/// An explicit `config_path` must exist; the default `shortener.toml` is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<ServiceSettings> {
    let mut settings = ServiceSettings::default();

    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?,
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

fn apply_file(settings: &mut ServiceSettings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.endpoint {
        settings.endpoint = v;
    }
    if let Some(v) = file_cfg.api_key {
        settings.api_key = Some(v);
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    Ok(())
}

fn apply_env(settings: &mut ServiceSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SHORTENER_ENDPOINT") {
        settings.endpoint = v;
    }
    if let Some(v) = lookup("APP__ENDPOINT") {
        settings.endpoint = v;
    }

    if let Some(v) = lookup("SHORTENER_API_KEY") {
        settings.api_key = Some(v);
    }
    if let Some(v) = lookup("APP__API_KEY") {
        settings.api_key = Some(v);
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_have_no_credential() {
        let settings = ServiceSettings::default();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.api_key, None);
        assert!(matches!(
            settings.validate(),
            Err(ShortenError::NotConfigured { .. })
        ));
    }

    #[test]
    fn file_values_override_defaults() {
        let mut settings = ServiceSettings::default();
        apply_file(
            &mut settings,
            r#"
                endpoint = "http://127.0.0.1:9000/api"
                api_key = "file-key"
                request_timeout_secs = 3
            "#,
        )
        .expect("parse");
        assert_eq!(settings.endpoint, "http://127.0.0.1:9000/api");
        assert_eq!(settings.api_key.as_deref(), Some("file-key"));
        assert_eq!(settings.request_timeout(), Duration::from_secs(3));
        settings.validate().expect("valid");
    }

    #[test]
    fn env_overrides_file_and_app_prefix_wins() {
        let mut settings = ServiceSettings::default();
        apply_file(&mut settings, r#"api_key = "file-key""#).expect("parse");
        apply_env(
            &mut settings,
            env_from(&[
                ("SHORTENER_API_KEY", "env-key"),
                ("APP__API_KEY", "app-key"),
                ("SHORTENER_ENDPOINT", "https://short.example/api"),
                ("APP__REQUEST_TIMEOUT_SECS", "not-a-number"),
            ]),
        );
        assert_eq!(settings.api_key.as_deref(), Some("app-key"));
        assert_eq!(settings.endpoint, "https://short.example/api");
        assert_eq!(settings.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn rejects_blank_key_bad_endpoint_and_zero_timeout() {
        let blank_key = ServiceSettings {
            api_key: Some("   ".into()),
            ..ServiceSettings::default()
        };
        assert!(blank_key.validate().is_err());

        let ftp = ServiceSettings {
            endpoint: "ftp://short.example/api".into(),
            api_key: Some("k".into()),
            ..ServiceSettings::default()
        };
        assert!(ftp.validate().is_err());

        let zero = ServiceSettings {
            api_key: Some("k".into()),
            request_timeout_secs: 0,
            ..ServiceSettings::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let settings = ServiceSettings {
            api_key: Some("super-secret".into()),
            ..ServiceSettings::default()
        };
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn explicit_missing_settings_file_is_an_error() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let missing = env::temp_dir().join(format!("insta_short_missing_{suffix}.toml"));
        let err = load_settings(Some(&missing)).expect_err("must fail");
        assert!(err.to_string().contains("failed to read settings file"));
    }

    #[test]
    fn loads_explicit_settings_file() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("insta_short_settings_{suffix}.toml"));
        fs::write(&path, "endpoint = \"http://localhost:1/api\"\nrequest_timeout_secs = 7\n")
            .expect("write settings");

        let settings = load_settings(Some(&path)).expect("load");
        assert_eq!(settings.endpoint_url().expect("url").port(), Some(1));

        fs::remove_file(path).expect("cleanup");
    }
}
