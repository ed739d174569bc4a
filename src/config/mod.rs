/// 서비스 설정
/// 기본값 위에 설정 파일(toml)과 환경 변수를 차례로 덮어쓴다.
// region:    --- Imports
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// endregion: --- Imports

// region:    --- Settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub database_url: String,
    pub catalogue_path: PathBuf,
    pub photos_dir: PathBuf,
    pub export_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            database_url: "sqlite://data.db".into(),
            catalogue_path: "./data/catalogue_data.csv".into(),
            photos_dir: "./photos".into(),
            export_path: "./data.csv".into(),
        }
    }
}

// endregion: --- Settings

// region:    --- Loading
// 설정 파일 (모든 항목 선택)
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    database_url: Option<String>,
    catalogue_path: Option<PathBuf>,
    photos_dir: Option<PathBuf>,
    export_path: Option<PathBuf>,
}

impl Settings {
    /// 기본값 -> 설정 파일 -> 환경 변수 순으로 적용
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("APP_CONFIG").unwrap_or_else(|_| "catalogue.toml".to_string());
        let explicit = std::env::var("APP_CONFIG").is_ok();
        let raw = read_config_file(Path::new(&config_path), explicit)?;
        Self::from_sources(raw.as_deref(), |key| std::env::var(key).ok())
    }

    pub fn from_sources(
        file: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();

        if let Some(raw) = file {
            let file_cfg: FileSettings = toml::from_str(raw)?;
            if let Some(v) = file_cfg.bind_addr {
                settings.bind_addr = v;
            }
            if let Some(v) = file_cfg.database_url {
                settings.database_url = v;
            }
            if let Some(v) = file_cfg.catalogue_path {
                settings.catalogue_path = v;
            }
            if let Some(v) = file_cfg.photos_dir {
                settings.photos_dir = v;
            }
            if let Some(v) = file_cfg.export_path {
                settings.export_path = v;
            }
        }

        if let Some(v) = env("BIND_ADDR") {
            settings.bind_addr = v;
        }
        if let Some(v) = env("DATABASE_URL") {
            settings.database_url = v;
        }
        if let Some(v) = env("CATALOGUE_PATH") {
            settings.catalogue_path = v.into();
        }
        if let Some(v) = env("PHOTOS_DIR") {
            settings.photos_dir = v.into();
        }
        if let Some(v) = env("EXPORT_PATH") {
            settings.export_path = v.into();
        }

        Ok(settings)
    }
}

/// 기본 경로의 파일이 없으면 무시하고, 명시된 경로는 반드시 읽는다.
fn read_config_file(path: &Path, required: bool) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => Ok(None),
        Err(source) => Err(ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}
// endregion: --- Loading
