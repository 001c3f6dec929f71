//! 翻訳結果キャッシュモジュール
//!
//! 画像バイト列のSHA-256をキーにして翻訳結果をキャッシュし、
//! 同じ画像の再翻訳をスキップする。失敗はキャッシュしない。

use super::{TranslationClient, TranslationError};
use crate::error::Result;
use async_trait::async_trait;
use manga_translate_common::{ImageData, TranslationPair};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

pub const CACHE_FILE_NAME: &str = ".translate-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationCache {
    /// バージョン（互換性チェック用）
    version: u32,
    /// キー → 翻訳結果のマップ
    entries: HashMap<String, CacheEntry>,
}

/// キャッシュエントリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub file_name: String,
    pub file_size: u64,
    pub result: TranslationPair,
}

impl TranslationCache {
    const CURRENT_VERSION: u32 = 1;

    pub fn cache_path(dir: &Path) -> PathBuf {
        dir.join(CACHE_FILE_NAME)
    }

    /// キャッシュファイルを読み込み（壊れている場合は空）
    pub fn load(dir: &Path) -> Self {
        let cache_path = Self::cache_path(dir);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        match serde_json::from_reader::<_, TranslationCache>(BufReader::new(file)) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(_) => {
                tracing::warn!(path = %cache_path.display(), "cache version mismatch, starting empty");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %cache_path.display(), error = %e, "cache unreadable, starting empty");
                Self::default()
            }
        }
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let file = File::create(Self::cache_path(dir))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// キャッシュファイルを削除（無ければ false）
    pub fn clear(dir: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(dir);
        if cache_path.exists() {
            std::fs::remove_file(cache_path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn get(&self, key: &str) -> Option<&TranslationPair> {
        self.entries.get(key).map(|e| &e.result)
    }

    pub fn insert(&mut self, key: String, image: &ImageData, result: TranslationPair) {
        self.entries.insert(key, CacheEntry {
            file_name: image.name.clone(),
            file_size: image.len() as u64,
            result,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// キャッシュキー: model + 言語 + MIME + 画像バイト列 のSHA-256
pub fn compute_cache_key(model: &str, target_language: &str, image: &ImageData) -> String {
    let mut hasher = Sha256::new();
    for part in [model, target_language, image.mime_type.as_str()] {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hasher.update(&image.bytes);
    hex::encode(hasher.finalize())
}

/// 画像群のキーを並列計算
pub fn compute_cache_keys(model: &str, target_language: &str, images: &[ImageData]) -> Vec<String> {
    images
        .par_iter()
        .map(|image| compute_cache_key(model, target_language, image))
        .collect()
}

/// キャッシュ付きクライアント
pub struct CachedClient<C> {
    inner: C,
    model: String,
    target_language: String,
    cache: Mutex<TranslationCache>,
}

impl<C: TranslationClient> CachedClient<C> {
    pub fn new(inner: C, cache: TranslationCache, model: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            inner,
            model: model.into(),
            target_language: target_language.into(),
            cache: Mutex::new(cache),
        }
    }

    /// キャッシュ済み件数を数える（事前表示用）
    pub fn count_hits(&self, images: &[ImageData]) -> usize {
        let keys = compute_cache_keys(&self.model, &self.target_language, images);
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        keys.iter().filter(|key| cache.get(key).is_some()).count()
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).save(dir)
    }

    pub fn into_cache(self) -> TranslationCache {
        self.cache.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<C: TranslationClient> TranslationClient for CachedClient<C> {
    async fn translate(&self, image: &ImageData) -> std::result::Result<TranslationPair, TranslationError> {
        let key = compute_cache_key(&self.model, &self.target_language, image);

        // ロックは await をまたがない
        let hit = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(pair) = hit {
            tracing::debug!(name = %image.name, "cache hit");
            return Ok(pair);
        }

        let pair = self.inner.translate(image).await?;
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, image, pair.clone());
        Ok(pair)
    }
}
