use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::yield_calc::{AssumptionError, CostAssumptions};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI 언어 코드(ko, en-us, auto)
    pub language: String,
    /// 표를 순수익률 내림차순으로 정렬할지 여부
    pub sort_by_net_yield: bool,
    pub assumptions: CostAssumptions,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            sort_by_net_yield: false,
            assumptions: CostAssumptions::default(),
            path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 파일에 저장된 비용 가정이 범위를 벗어남
    #[error("비용 가정 오류: {0}")]
    Assumptions(#[from] AssumptionError),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_at(Path::new(DEFAULT_CONFIG_PATH))
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값으로 새로 만든다.
pub fn load_or_default_at(path: &Path) -> Result<Config, ConfigError> {
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.assumptions.validate()?;
        cfg
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        info!(path = %path.display(), "created default config");
        cfg
    };
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 로드했던 파일(기본 config.toml)에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        save_config(self, &path)
    }
}
