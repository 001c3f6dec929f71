//! 表示文言（ロケール）
//!
//! 組み込み: ar / en / ja。JSONファイルで上書きでき、欠けたキーは英語で補う。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 表示文言一式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Locale {
    /// 「すべて表示」の見出し（"Image" など）
    pub image_number: String,
    pub translating_status: String,
    pub error_processing: String,
    pub translation_failure: String,
    pub translation_success: String,
    pub zip_read_error: String,
    pub download_success: String,
    pub copy_success: String,
    pub copy_failure: String,
    pub no_images_loaded: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

impl Locale {
    pub const SUPPORTED: &'static [&'static str] = &["ar", "en", "ja"];

    /// 組み込みロケールを取得（未知のコードはNone）
    pub fn builtin(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "ar" => Some(Self::arabic()),
            "en" => Some(Self::english()),
            "ja" => Some(Self::japanese()),
            _ => None,
        }
    }

    /// JSONファイルから読み込み
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if !value.is_object() {
            return Err(Error::Config("ロケールファイルはJSONオブジェクトである必要があります".into()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// 進捗表示: "Translating (2/5)..."
    pub fn progress_status(&self, completed: usize, total: usize) -> String {
        format!("{} ({}/{})...", self.translating_status, completed, total)
    }

    /// 失敗時の訳文プレースホルダ
    pub fn failure_text(&self, message: &str) -> String {
        format!("{} {}", self.translation_failure, message)
    }

    fn english() -> Self {
        Self {
            image_number: "Image".into(),
            translating_status: "Translating".into(),
            error_processing: "Error processing this image.".into(),
            translation_failure: "Translation failed:".into(),
            translation_success: "Translation completed successfully!".into(),
            zip_read_error: "Could not read the archive:".into(),
            download_success: "File saved.".into(),
            copy_success: "Copied to clipboard.".into(),
            copy_failure: "Could not copy to clipboard.".into(),
            no_images_loaded: "No images loaded.".into(),
        }
    }

    fn arabic() -> Self {
        Self {
            image_number: "صورة".into(),
            translating_status: "جاري الترجمة".into(),
            error_processing: "حدث خطأ أثناء معالجة هذه الصورة.".into(),
            translation_failure: "فشلت الترجمة:".into(),
            translation_success: "تمت الترجمة بنجاح!".into(),
            zip_read_error: "تعذرت قراءة الملف المضغوط:".into(),
            download_success: "تم حفظ الملف.".into(),
            copy_success: "تم النسخ إلى الحافظة.".into(),
            copy_failure: "تعذر النسخ إلى الحافظة.".into(),
            no_images_loaded: "لم يتم تحميل أي صور.".into(),
        }
    }

    fn japanese() -> Self {
        Self {
            image_number: "画像".into(),
            translating_status: "翻訳中".into(),
            error_processing: "この画像の処理中にエラーが発生しました。".into(),
            translation_failure: "翻訳に失敗しました:".into(),
            translation_success: "翻訳が完了しました！".into(),
            zip_read_error: "アーカイブを読み込めません:".into(),
            download_success: "ファイルを保存しました。".into(),
            copy_success: "クリップボードにコピーしました。".into(),
            copy_failure: "クリップボードにコピーできませんでした。".into(),
            no_images_loaded: "画像が読み込まれていません。".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_locales() {
        for code in Locale::SUPPORTED {
            let locale = Locale::builtin(code).expect("組み込みロケールが見つからない");
            assert!(!locale.image_number.is_empty());
            assert!(!locale.translation_failure.is_empty());
        }
        assert_eq!(Locale::builtin("AR").unwrap().image_number, "صورة");
        assert!(Locale::builtin("xx").is_none());
    }

    #[test]
    fn test_from_json_partial_falls_back_to_english() {
        let locale = Locale::from_json(r#"{"imageNumber": "Bild"}"#).unwrap();
        assert_eq!(locale.image_number, "Bild");
        assert_eq!(locale.translating_status, "Translating");
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(matches!(Locale::from_json("[1, 2]"), Err(Error::Config(_))));
        assert!(matches!(Locale::from_json("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join("manga-translate-locale-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("de.json");
        std::fs::write(&path, r#"{"imageNumber": "Bild", "copySuccess": "Kopiert."}"#).unwrap();

        let locale = Locale::load(&path).unwrap();
        assert_eq!(locale.copy_success, "Kopiert.");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_progress_and_failure_text() {
        let locale = Locale::default();
        assert_eq!(locale.progress_status(2, 5), "Translating (2/5)...");
        assert_eq!(locale.failure_text("timeout"), "Translation failed: timeout");
    }
}
