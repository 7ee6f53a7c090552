/// Application configuration
///
/// Settings are read from `config.json` in the user's config directory:
/// - Linux: ~/.config/wallpaper-gallery/config.json
/// - macOS: ~/Library/Application Support/wallpaper-gallery/config.json
/// - Windows: %APPDATA%\wallpaper-gallery\config.json
///
/// Every key is optional. Environment variables override the file:
/// `WALLPAPER_GALLERY_URL`, `WALLPAPER_GALLERY_SECRET`,
/// `WALLPAPER_GALLERY_DOWNLOADS`.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;
use crate::state::data::DeviceType;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000/";
const DEFAULT_INSTAGRAM_URL: &str = "https://www.instagram.com/amoled_vault/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// On-disk shape of `config.json`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    server_url: Option<String>,
    upload_secret: Option<String>,
    instagram_url: Option<String>,
    download_dir: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
}

/// Resolved configuration used by the rest of the app
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gallery backend root; a `?device=` query selects the starting partition
    pub server_url: Url,
    /// Secret the backend expects on `/upload`
    pub upload_secret: String,
    /// Page the download gate asks users to follow
    pub instagram_url: String,
    /// Where downloaded wallpapers are written
    pub download_dir: PathBuf,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        let file = if path.exists() {
            tracing::info!(path = %path.display(), "loading config");
            Self::read_file(&path)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            ConfigFile::default()
        };

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Get the path where the config file is expected
    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        path.push("wallpaper-gallery");
        path.push("config.json");
        path
    }

    fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Merge file values, environment values and defaults
    fn resolve(
        file: ConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let server_url = env("WALLPAPER_GALLERY_URL")
            .or(file.server_url)
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let server_url = Url::parse(&server_url)?;

        let upload_secret = env("WALLPAPER_GALLERY_SECRET")
            .or(file.upload_secret)
            .unwrap_or_default();

        let download_dir = env("WALLPAPER_GALLERY_DOWNLOADS")
            .map(PathBuf::from)
            .or(file.download_dir)
            .or_else(dirs::download_dir)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            server_url,
            upload_secret,
            instagram_url: file
                .instagram_url
                .unwrap_or_else(|| DEFAULT_INSTAGRAM_URL.to_string()),
            download_dir,
            request_timeout: Duration::from_secs(
                file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        })
    }

    /// Device partition requested by the server URL's `device` query parameter
    pub fn initial_device(&self) -> DeviceType {
        self.server_url
            .query_pairs()
            .find(|(key, _)| key == "device")
            .and_then(|(_, value)| DeviceType::from_query(&value))
            .unwrap_or_default()
    }

    /// Server root with query and fragment stripped
    pub fn base_url(&self) -> Url {
        let mut base = self.server_url.clone();
        base.set_query(None);
        base.set_fragment(None);
        base
    }

    #[cfg(test)]
    pub(crate) fn for_server(server_url: &str, download_dir: PathBuf) -> Self {
        Self {
            server_url: Url::parse(server_url).unwrap(),
            upload_secret: "s3cret".to_string(),
            instagram_url: DEFAULT_INSTAGRAM_URL.to_string(),
            download_dir,
            request_timeout: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = AppConfig::resolve(ConfigFile::default(), |_| None).unwrap();

        assert_eq!(config.server_url.as_str(), DEFAULT_SERVER_URL);
        assert_eq!(config.upload_secret, "");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.initial_device(), DeviceType::Mobile);
    }

    #[test]
    fn test_env_overrides_file() {
        let file: ConfigFile = serde_json::from_str(
            r#"{"server_url":"http://file.example/","upload_secret":"from-file"}"#,
        )
        .unwrap();

        let config = AppConfig::resolve(file, |key| match key {
            "WALLPAPER_GALLERY_URL" => Some("http://env.example/?device=pc".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.server_url.host_str(), Some("env.example"));
        assert_eq!(config.upload_secret, "from-file");
        assert_eq!(config.initial_device(), DeviceType::Pc);
        assert_eq!(config.base_url().as_str(), "http://env.example/");
    }

    #[test]
    fn test_unknown_device_query_falls_back_to_mobile() {
        let config = AppConfig::resolve(ConfigFile::default(), |key| {
            (key == "WALLPAPER_GALLERY_URL").then(|| "http://h/?device=tablet".to_string())
        })
        .unwrap();

        assert_eq!(config.initial_device(), DeviceType::Mobile);
    }

    #[test]
    fn test_invalid_url_is_an_error() {
        let result = AppConfig::resolve(ConfigFile::default(), |key| {
            (key == "WALLPAPER_GALLERY_URL").then(|| "not a url".to_string())
        });

        assert!(matches!(result, Err(ConfigError::Url(_))));
    }

    #[test]
    fn test_read_file_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ nope").unwrap();

        assert!(matches!(AppConfig::read_file(&path), Err(ConfigError::Json(_))));
    }
}
