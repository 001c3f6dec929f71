//! 翻訳対象の型定義
//!
//! CLIとライブラリ利用側で共有される型:
//! - ImageData: 入力画像（名前・MIMEタイプ・バイト列）
//! - Item: 画像1枚と、その翻訳テキスト・状態
//! - TranslationPair: 翻訳サービスの出力（原文・訳文）

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// アイテム識別子
///
/// ストアへの追加時に払い出され、並べ替えや削除の影響を受けない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// 入力画像
///
/// 作成後は変更しない。cloneしてもバイト列は共有される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub name: String,
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

impl ImageData {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// アイテムの処理状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemStatus {
    #[default]
    Pending,
    InFlight,
    Done,
    Failed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::InFlight => "inFlight",
            ItemStatus::Done => "done",
            ItemStatus::Failed => "failed",
        }
    }

    /// 成功・失敗いずれかで確定しているか
    pub fn is_resolved(&self) -> bool {
        matches!(self, ItemStatus::Done | ItemStatus::Failed)
    }
}

/// 画像1枚分の翻訳対象
#[derive(Debug, Clone)]
pub struct Item {
    pub id: ItemId,
    pub image: ImageData,
    pub original_text: Option<String>,
    pub translated_text: Option<String>,
    pub status: ItemStatus,
}

impl Item {
    pub fn new(id: ItemId, image: ImageData) -> Self {
        Self {
            id,
            image,
            original_text: None,
            translated_text: None,
            status: ItemStatus::Pending,
        }
    }

    /// 原文（未確定なら空文字）
    pub fn original(&self) -> &str {
        self.original_text.as_deref().unwrap_or_default()
    }

    /// 訳文（未確定なら空文字）
    pub fn translated(&self) -> &str {
        self.translated_text.as_deref().unwrap_or_default()
    }
}

/// 翻訳サービスの出力
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationPair {
    #[serde(default)]
    pub original_text: String,

    #[serde(default)]
    pub translated_text: String,
}

impl TranslationPair {
    pub fn new(original_text: impl Into<String>, translated_text: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            translated_text: translated_text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_defaults() {
        let item = Item::new(ItemId(1), ImageData::new("a.png", "image/png", vec![1u8, 2, 3]));
        assert_eq!(item.status, ItemStatus::Pending);
        assert_eq!(item.original(), "");
        assert_eq!(item.translated(), "");
        assert_eq!(item.image.len(), 3);
    }

    #[test]
    fn test_image_data_clone_shares_bytes() {
        let image = ImageData::new("a.jpg", "image/jpeg", vec![0u8; 16]);
        let cloned = image.clone();
        assert!(Arc::ptr_eq(&image.bytes, &cloned.bytes));
    }

    #[test]
    fn test_status_resolved() {
        assert!(!ItemStatus::Pending.is_resolved());
        assert!(!ItemStatus::InFlight.is_resolved());
        assert!(ItemStatus::Done.is_resolved());
        assert!(ItemStatus::Failed.is_resolved());
    }

    #[test]
    fn test_status_serialize() {
        let json = serde_json::to_string(&ItemStatus::InFlight).unwrap();
        assert_eq!(json, "\"inFlight\"");
    }

    #[test]
    fn test_item_id_display() {
        assert_eq!(ItemId(7).to_string(), "item#7");
    }
}
