//! 表示テキストの生成
//!
//! アイテム1件の表示と、全アイテムを連結した「すべて表示」を切り替える。
//! ストアを読むだけで、状態は一切変更しない。

use crate::store::ItemStore;
use serde::{Deserialize, Serialize};

/// 表示モード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    /// 指定位置のアイテムのみ
    Single(usize),
    /// 全アイテムを連結
    #[default]
    All,
}

impl ViewMode {
    /// 範囲外の位置は「すべて表示」に落とす
    pub fn resolve(self, len: usize) -> ViewMode {
        match self {
            ViewMode::Single(position) if position < len => self,
            _ => ViewMode::All,
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    /// "all" または 1始まりの番号
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(ViewMode::All);
        }
        match trimmed.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(ViewMode::Single(n - 1)),
            _ => Err(format!("Unknown view: {}. Use all or an image number (1, 2, ...)", s)),
        }
    }
}

/// 原文・訳文の表示テキスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectedView {
    pub original: String,
    pub translated: String,
}

/// 表示テキスト生成器
#[derive(Debug, Clone)]
pub struct ViewProjector {
    label: String,
}

impl ViewProjector {
    /// `label` は見出しの文言（ロケールの `image_number`）
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }

    pub fn project(&self, store: &ItemStore, mode: ViewMode) -> ProjectedView {
        match mode.resolve(store.len()) {
            ViewMode::Single(position) => match store.get(position) {
                Some(item) => ProjectedView {
                    original: item.original().to_string(),
                    translated: item.translated().to_string(),
                },
                None => ProjectedView::default(),
            },
            ViewMode::All => ProjectedView {
                original: self.join_blocks(store.iter().map(|item| item.original())),
                translated: self.join_blocks(store.iter().map(|item| item.translated())),
            },
        }
    }

    fn join_blocks<'a, I>(&self, texts: I) -> String
    where
        I: Iterator<Item = &'a str>,
    {
        texts
            .enumerate()
            .map(|(i, text)| format!("=== {} {} ===\n{}", self.label, i + 1, text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
