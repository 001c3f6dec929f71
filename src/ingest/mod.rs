pub mod archive;

use crate::error::{Result, TranslatorError};
use manga_translate_common::ImageData;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use archive::{extract_images, ArchiveImages};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
const ARCHIVE_EXTENSIONS: &[&str] = &["zip"];

/// 取り込みの上限値
#[derive(Debug, Clone, Copy)]
pub struct IngestLimits {
    pub max_image_bytes: u64,
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self { max_image_bytes: crate::config::DEFAULT_MAX_IMAGE_BYTES }
    }
}

/// 取り込めなかった入力
#[derive(Debug)]
pub struct IngestFailure {
    pub path: PathBuf,
    pub error: TranslatorError,
}

#[derive(Debug, Default)]
pub struct IngestReport {
    pub images: Vec<ImageData>,
    pub failures: Vec<IngestFailure>,
}

impl IngestReport {
    fn fail(&mut self, path: &Path, error: TranslatorError) {
        tracing::warn!(path = %path.display(), %error, "input skipped");
        self.failures.push(IngestFailure { path: path.to_path_buf(), error });
    }
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

pub(crate) fn is_image_name(name: &str) -> bool {
    extension_of(name).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn is_archive_name(name: &str) -> bool {
    extension_of(name).is_some_and(|ext| ARCHIVE_EXTENSIONS.contains(&ext.as_str()))
}

/// 拡張子からMIMEタイプを決める
pub(crate) fn image_mime_type(name: &str) -> Option<&'static str> {
    let ext = extension_of(name)?;
    image::ImageFormat::from_extension(ext).map(|format| format.to_mime_type())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// 入力パス群（画像・zip・フォルダ）を順番どおりに取り込む
///
/// 失敗した入力は報告に積み、残りの入力は続けて取り込む。
pub fn ingest_paths(paths: &[PathBuf], limits: IngestLimits) -> IngestReport {
    let mut report = IngestReport::default();

    for path in paths {
        if path.is_dir() {
            for child in scan_folder(path) {
                ingest_file(&child, limits, &mut report);
            }
        } else if path.is_file() {
            ingest_file(path, limits, &mut report);
        } else {
            report.fail(path, TranslatorError::FileNotFound(path.display().to_string()));
        }
    }

    report
}

/// フォルダ直下の画像とzipを名前順で列挙
fn scan_folder(folder: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            let name = file_name_of(p);
            is_image_name(&name) || is_archive_name(&name)
        })
        .collect();

    files.sort_by_key(|p| file_name_of(p));
    files
}

fn ingest_file(path: &Path, limits: IngestLimits, report: &mut IngestReport) {
    let name = file_name_of(path);

    if is_archive_name(&name) {
        // アーカイブ内の画像にも上限を適用
        match read_archive(path, &name, limits) {
            Ok(contents) => {
                for error in contents.rejected {
                    report.fail(path, error);
                }
                report.images.extend(contents.images);
            }
            Err(e) => report.fail(path, e),
        }
        return;
    }

    let Some(mime_type) = image_mime_type(&name).filter(|_| is_image_name(&name)) else {
        tracing::debug!(path = %path.display(), "unsupported extension, skipped");
        return;
    };

    match read_image(path, limits) {
        Ok(bytes) => report.images.push(ImageData::new(name, mime_type, bytes)),
        Err(e) => report.fail(path, e),
    }
}

fn too_large(name: &str, size: u64, limits: IngestLimits) -> TranslatorError {
    TranslatorError::FileTooLarge {
        name: name.to_string(),
        size,
        limit: limits.max_image_bytes,
    }
}

fn read_image(path: &Path, limits: IngestLimits) -> Result<Vec<u8>> {
    let size = std::fs::metadata(path)?.len();
    if size > limits.max_image_bytes {
        return Err(too_large(&file_name_of(path), size, limits));
    }
    Ok(std::fs::read(path)?)
}

fn read_archive(path: &Path, name: &str, limits: IngestLimits) -> Result<ArchiveImages> {
    let bytes = std::fs::read(path).map_err(|e| TranslatorError::ArchiveRead {
        archive: name.to_string(),
        cause: e.to_string(),
    })?;
    extract_images(name, &bytes, limits.max_image_bytes)
}

/// アーカイブファイルを読み込み、取り出される画像を返す（extractコマンド用）
pub fn list_archive(path: &Path, limits: IngestLimits) -> Result<ArchiveImages> {
    if !path.exists() {
        return Err(TranslatorError::FileNotFound(path.display().to_string()));
    }
    read_archive(path, &file_name_of(path), limits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_name() {
        assert!(is_image_name("a.jpg"));
        assert!(is_image_name("a.JPG"));
        assert!(is_image_name("a.jpeg"));
        assert!(is_image_name("dir/a.png"));
        assert!(!is_image_name("a.txt"));
        assert!(!is_image_name("a.gif"));
        assert!(!is_image_name("png"));
    }

    #[test]
    fn test_image_mime_type() {
        assert_eq!(image_mime_type("a.png"), Some("image/png"));
        assert_eq!(image_mime_type("a.JPG"), Some("image/jpeg"));
        assert_eq!(image_mime_type("a.jpeg"), Some("image/jpeg"));
        assert_eq!(image_mime_type("a"), None);
    }

    #[test]
    fn test_is_archive_name() {
        assert!(is_archive_name("pages.zip"));
        assert!(is_archive_name("PAGES.ZIP"));
        assert!(!is_archive_name("pages.rar"));
    }
}
