use crate::error::{BidWriterError, Result};
use bid_writer_common::api::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `--api-url` より優先度が低く、設定ファイルより高い
pub const API_URL_ENV: &str = "BID_WRITER_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    /// 盖章結果の保存先（未設定ならダウンロードフォルダ）
    pub download_dir: Option<PathBuf>,
    /// 未設定ならタイムアウトなし
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.into(),
            download_dir: None,
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BidWriterError::Config("找不到用户主目录".into()))?;
        Ok(home.join(".config").join("bid-writer"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn session_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("session.json"))
    }

    /// `--api-url` > 環境変数 > 設定ファイル
    pub fn resolve_api_url(&self, flag: Option<&str>) -> String {
        let env = std::env::var(API_URL_ENV).ok();
        pick_api_url(flag, env.as_deref(), &self.api_url)
    }

    pub fn set_api_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(BidWriterError::Config(format!("无效的地址: {}", url)));
        }
        self.api_url = url;
        self.save()
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn pick_api_url(flag: Option<&str>, env: Option<&str>, configured: &str) -> String {
    [flag, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(configured)
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_precedence() {
        assert_eq!(
            pick_api_url(Some("http://flag"), Some("http://env"), "http://file"),
            "http://flag"
        );
        assert_eq!(pick_api_url(None, Some("http://env/"), "http://file"), "http://env");
        assert_eq!(pick_api_url(None, Some("  "), "http://file"), "http://file");
        assert_eq!(pick_api_url(None, None, DEFAULT_BASE_URL), "http://0.0.0.0:8000");
    }

    #[test]
    fn test_default_has_no_timeout() {
        let config = Config::default();
        assert_eq!(config.timeout_seconds, None);
        assert_eq!(config.api_url, DEFAULT_BASE_URL);
    }
}
