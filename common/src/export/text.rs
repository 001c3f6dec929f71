//! テキスト出力のレイアウト
//!
//! 「Original Texts:」ブロック、区切り線、「Translated Texts:」ブロックの2部構成。

use crate::view::ProjectedView;

/// 原文と訳文の間の区切り線
pub const SECTION_SEPARATOR: &str = "========================";

/// 表示中のテキストから出力ファイルの内容を生成
pub fn build_text_artifact(view: &ProjectedView) -> String {
    format!(
        "Original Texts:\n\n{}\n\n{}\n\nTranslated Texts:\n\n{}",
        view.original, SECTION_SEPARATOR, view.translated
    )
}
