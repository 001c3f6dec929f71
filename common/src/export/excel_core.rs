//! Excel生成（共通ライブラリ）
//!
//! 1行1画像で、番号・ファイル名・状態・原文・訳文を書き出す

use crate::types::Item;
use rust_xlsxwriter::*;

/// 行データのトレイト（Item以外の型にも対応）
pub trait TranslatedRow {
    fn file_name(&self) -> &str;
    fn status_label(&self) -> &str;
    fn source_text(&self) -> &str;
    fn target_text(&self) -> &str;
}

impl TranslatedRow for Item {
    fn file_name(&self) -> &str { &self.image.name }
    fn status_label(&self) -> &str { self.status.as_str() }
    fn source_text(&self) -> &str { self.original() }
    fn target_text(&self) -> &str { self.translated() }
}

/// 見出し行
const HEADERS: &[(&str, f64)] = &[
    ("No.", 6.0),
    ("File", 24.0),
    ("Status", 10.0),
    ("Original Text", 60.0),
    ("Translated Text", 60.0),
];

/// Excelをバッファに生成
///
/// # Arguments
/// * `rows` - 表示順の行データ
/// * `sheet_name` - シート名
pub fn generate_excel_buffer<T: TranslatedRow>(rows: &[T], sheet_name: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let text_format = Format::new()
        .set_align(FormatAlign::Top)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let failed_format = text_format.clone().set_font_color(Color::RGB(0xC0392B));

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, (label, width)) in HEADERS.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet.write_string_with_format(0, col, *label, &header_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    }
    worksheet.set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    for (i, row) in rows.iter().enumerate() {
        let excel_row = (i + 1) as u32;
        let format = if row.status_label() == "failed" { &failed_format } else { &text_format };

        worksheet.write_number_with_format(excel_row, 0, (i + 1) as f64, format)
            .map_err(|e| format!("番号書き込みエラー: {}", e))?;
        let cells = [row.file_name(), row.status_label(), row.source_text(), row.target_text()];
        for (offset, value) in cells.iter().enumerate() {
            worksheet.write_string_with_format(excel_row, (offset + 1) as u16, *value, format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }
    }

    workbook.save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ItemStore;
    use crate::types::{ImageData, TranslationPair};

    #[test]
    fn test_generate_excel_buffer() {
        let mut store = ItemStore::new();
        let ids = store.append(vec![
            ImageData::new("001.png", "image/png", vec![0u8]),
            ImageData::new("002.png", "image/png", vec![1u8]),
        ]);
        store.record_success(ids[0], TranslationPair::new("こんにちは", "مرحبا"));
        store.record_failure(ids[1], "error".into(), "failed: timeout".into());

        let rows: Vec<Item> = store.iter().cloned().collect();
        let buffer = generate_excel_buffer(&rows, "Translations").unwrap();

        // xlsx は zip コンテナ
        assert!(buffer.len() > 4);
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_generate_excel_buffer_empty() {
        let rows: Vec<Item> = Vec::new();
        let buffer = generate_excel_buffer(&rows, "Translations").unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_invalid_sheet_name() {
        let rows: Vec<Item> = Vec::new();
        let result = generate_excel_buffer(&rows, "bad/name");
        assert!(result.is_err());
    }
}
