use crate::batch::Batch;
use crate::error::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedItem<'a> {
    /// 1始まりの表示順
    pub index: usize,
    pub name: &'a str,
    pub mime_type: &'a str,
    pub status: &'a str,
    pub original_text: &'a str,
    pub translated_text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedBatch<'a> {
    pub exported_at: String,
    pub total: usize,
    pub items: Vec<ExportedItem<'a>>,
}

pub fn build_export(batch: &Batch) -> ExportedBatch<'_> {
    let items = batch
        .store
        .iter()
        .enumerate()
        .map(|(i, item)| ExportedItem {
            index: i + 1,
            name: &item.image.name,
            mime_type: &item.image.mime_type,
            status: item.status.as_str(),
            original_text: item.original(),
            translated_text: item.translated(),
        })
        .collect::<Vec<_>>();

    ExportedBatch {
        exported_at: chrono::Local::now().to_rfc3339(),
        total: items.len(),
        items,
    }
}

pub fn generate_json(batch: &Batch, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&build_export(batch))?;
    std::fs::write(output_path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use manga_translate_common::{ImageData, ItemStore, TranslationPair};

    #[test]
    fn test_build_export() {
        let mut store = ItemStore::new();
        let ids = store.append(vec![
            ImageData::new("01.png", "image/png", vec![0u8]),
            ImageData::new("02.jpg", "image/jpeg", vec![1u8]),
        ]);
        store.record_success(ids[0], TranslationPair::new("A", "B"));
        let batch = Batch::new(store);

        let value = serde_json::to_value(build_export(&batch)).unwrap();
        assert_eq!(value["total"], 2);
        assert!(value["exportedAt"].as_str().is_some());
        assert_eq!(value["items"][0]["index"], 1);
        assert_eq!(value["items"][0]["status"], "done");
        assert_eq!(value["items"][0]["translatedText"], "B");
        assert_eq!(value["items"][1]["mimeType"], "image/jpeg");
        assert_eq!(value["items"][1]["status"], "pending");
        assert_eq!(value["items"][1]["originalText"], "");
    }
}
