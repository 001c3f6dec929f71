//! zipアーカイブの展開
//!
//! 画像エントリだけを名前順で取り出す。1つでも読めないエントリがあれば
//! アーカイブ全体を失敗とし、部分的な結果は返さない。
//! 上限サイズを超えるエントリは読み込みを打ち切り、そのエントリだけを除外する。

use super::{image_mime_type, is_image_name};
use crate::error::{Result, TranslatorError};
use manga_translate_common::ImageData;
use std::io::{Cursor, Read};

/// 展開結果
#[derive(Debug, Default)]
pub struct ArchiveImages {
    pub images: Vec<ImageData>,
    /// 上限サイズを超えて除外したエントリ（`FileTooLarge`）
    pub rejected: Vec<TranslatorError>,
}

/// アーカイブから画像を取り出す（名前順）
///
/// ヘッダの宣言サイズは信用せず、実際に展開したバイト数で上限を判定する。
///
/// # Arguments
/// * `archive` - 表示用のアーカイブ名
/// * `bytes` - アーカイブ全体のバイト列
/// * `max_entry_bytes` - 1エントリあたりの上限
pub fn extract_images(archive: &str, bytes: &[u8], max_entry_bytes: u64) -> Result<ArchiveImages> {
    let read_error = |cause: String| TranslatorError::ArchiveRead {
        archive: archive.to_string(),
        cause,
    };

    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| read_error(e.to_string()))?;

    let mut contents = ArchiveImages::default();
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(|e| read_error(e.to_string()))?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        if !is_image_name(&name) {
            continue;
        }
        let Some(mime_type) = image_mime_type(&name) else {
            continue;
        };

        let declared = entry.size();
        let mut buffer = Vec::new();
        entry
            .by_ref()
            .take(max_entry_bytes.saturating_add(1))
            .read_to_end(&mut buffer)
            .map_err(|e| read_error(format!("{}: {}", name, e)))?;

        let read = buffer.len() as u64;
        if read > max_entry_bytes {
            tracing::warn!(archive, entry = %name, declared, limit = max_entry_bytes, "oversized entry skipped");
            contents.rejected.push(TranslatorError::FileTooLarge {
                name,
                size: declared.max(read),
                limit: max_entry_bytes,
            });
            continue;
        }

        contents.images.push(ImageData::new(name, mime_type, buffer));
    }

    contents.images.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(archive, count = contents.images.len(), "archive extracted");

    Ok(contents)
}
