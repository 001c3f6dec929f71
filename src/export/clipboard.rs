use crate::error::{Result, TranslatorError};
use manga_translate_common::ProjectedView;

/// クリップボードにコピーする側
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Original,
    Translated,
}

impl CopyTarget {
    pub fn select<'a>(&self, view: &'a ProjectedView) -> &'a str {
        match self {
            CopyTarget::Original => &view.original,
            CopyTarget::Translated => &view.translated,
        }
    }
}

impl std::str::FromStr for CopyTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "original" | "o" => Ok(CopyTarget::Original),
            "translated" | "t" => Ok(CopyTarget::Translated),
            _ => Err(format!("Unknown copy target: {}. Use original or translated", s)),
        }
    }
}

/// 表示中テキストの片側をコピー
pub fn copy_section(view: &ProjectedView, target: CopyTarget) -> Result<()> {
    let text = target.select(view).to_string();
    let mut clipboard = arboard::Clipboard::new().map_err(|e| TranslatorError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| TranslatorError::Clipboard(e.to_string()))
}
