//! Excel生成（CLI版）
//!
//! 共通ライブラリの `generate_excel_buffer` でブックを作り、ファイルに保存する

use crate::batch::Batch;
use crate::error::{Result, TranslatorError};
use manga_translate_common::export::excel_core::generate_excel_buffer;
use manga_translate_common::Item;
use std::path::Path;

const SHEET_NAME: &str = "Translations";

pub fn generate_excel(batch: &Batch, output_path: &Path) -> Result<()> {
    let rows: Vec<Item> = batch.store.iter().cloned().collect();
    let buffer = generate_excel_buffer(&rows, SHEET_NAME).map_err(TranslatorError::Export)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
