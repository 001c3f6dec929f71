//! プロンプト生成モジュール
//!
//! - DEFAULT_TARGET_LANGUAGE: 既定の翻訳先言語
//! - build_translation_prompt: 画像1枚のOCR＋翻訳用プロンプト

/// 既定の翻訳先言語
pub const DEFAULT_TARGET_LANGUAGE: &str = "Arabic";

/// OCR＋翻訳プロンプト生成
///
/// # Arguments
/// * `target_language` - 翻訳先言語（英語名。例: "Arabic"）
///
/// # Returns
/// 画像に添えて送るプロンプト文字列
pub fn build_translation_prompt(target_language: &str) -> String {
    let language = match target_language.trim() {
        "" => DEFAULT_TARGET_LANGUAGE,
        other => other,
    };

    format!(
        r#"You are an OCR engine and a manga translator.
Find every piece of text inside the speech bubbles of this image (usually Japanese or Korean) and translate it faithfully into {language}.

Rules:
- Keep the reading order of the bubbles.
- Put the text of each bubble on its own line in "original_text".
- In "translated_text", separate the translation of each bubble with one blank line.
- If the image contains no text, return empty strings.

Answer with a single JSON object with exactly two keys:
{{"original_text": "bubble 1\nbubble 2", "translated_text": "translation 1\n\ntranslation 2"}}"#
    )
}
