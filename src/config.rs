use crate::error::{TranslatorError, Result};
use manga_translate_common::{Locale, DEFAULT_TARGET_LANGUAGE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// 1ファイルあたりの上限（10MB）
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub target_language: String,
    pub locale: String,
    pub locale_file: Option<PathBuf>,
    /// 同時リクエスト数（None = 全件同時）
    pub max_concurrency: Option<usize>,
    pub timeout_seconds: u64,
    pub max_image_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            target_language: DEFAULT_TARGET_LANGUAGE.into(),
            locale: "ar".into(),
            locale_file: None,
            max_concurrency: None,
            timeout_seconds: 120,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TranslatorError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("manga-translate").join("config.json"))
    }

    /// 翻訳キャッシュの保存先
    pub fn cache_dir() -> Result<PathBuf> {
        let base = dirs::cache_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| TranslatorError::Config("キャッシュディレクトリが見つかりません".into()))?;
        Ok(base.join("manga-translate"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(TranslatorError::MissingApiKey)
    }

    /// 表示文言を解決（ファイル指定 > 組み込み > 英語）
    pub fn resolve_locale(&self) -> Result<Locale> {
        if let Some(path) = &self.locale_file {
            return Ok(Locale::load(path)?);
        }
        match Locale::builtin(&self.locale) {
            Some(locale) => Ok(locale),
            None => {
                tracing::warn!(locale = %self.locale, "unknown locale, falling back to en");
                Ok(Locale::default())
            }
        }
    }
}
