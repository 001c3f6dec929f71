//! 翻訳クライアント
//!
//! 画像1枚を受け取り、原文と訳文のペアを返す。
//! タイムアウトやリトライはクライアント側の責務。

pub mod cache;
pub mod gemini;

use async_trait::async_trait;
use manga_translate_common::{ImageData, TranslationPair};
use thiserror::Error;

pub use cache::{CachedClient, TranslationCache};
pub use gemini::GeminiClient;

/// 翻訳呼び出しの失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    ResponseParse(String),
}

#[async_trait]
pub trait TranslationClient: Send + Sync {
    async fn translate(&self, image: &ImageData) -> Result<TranslationPair, TranslationError>;
}
