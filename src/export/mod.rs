pub mod clipboard;
pub mod excel;
pub mod json;

use crate::batch::Batch;
use crate::cli::ExportFormat;
use crate::error::Result;
use manga_translate_common::{build_text_artifact, ViewProjector};
use std::path::{Path, PathBuf};

pub use clipboard::{copy_section, CopyTarget};

const DEFAULT_FILE_STEM: &str = "translation";

/// 出力先がフォルダ（または拡張子なし）なら既定のファイル名を付ける
pub fn output_path_for_format(output: &Path, format: ExportFormat) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", DEFAULT_FILE_STEM, format.extension()))
    } else {
        output.to_path_buf()
    }
}

/// テキスト出力（表示中のビューを2部構成で書き出す）
pub fn generate_text(batch: &Batch, projector: &ViewProjector, output_path: &Path) -> Result<()> {
    let artifact = build_text_artifact(&batch.current_view(projector));
    std::fs::write(output_path, artifact)?;
    Ok(())
}

pub fn export_batch(
    batch: &Batch,
    projector: &ViewProjector,
    format: ExportFormat,
    output: &Path,
) -> Result<PathBuf> {
    let output_path = output_path_for_format(output, format);
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match format {
        ExportFormat::Text => {
            println!("- テキストを生成中...");
            generate_text(batch, projector, &output_path)?;
        }
        ExportFormat::Json => {
            println!("- JSONを生成中...");
            json::generate_json(batch, &output_path)?;
        }
        ExportFormat::Excel => {
            println!("- Excelを生成中...");
            excel::generate_excel(batch, &output_path)?;
        }
    }
    tracing::debug!(path = %output_path.display(), ?format, "exported");

    Ok(output_path)
}
