use super::BatchSummary;
use manga_translate_common::ItemId;

/// 翻訳実行中の進捗イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Started { total: usize },
    /// 1件解決（成功・失敗どちらでも1つ進む）
    ItemResolved {
        id: ItemId,
        completed: usize,
        total: usize,
        status_line: String,
        ok: bool,
    },
    Finished { summary: BatchSummary },
}

pub trait ProgressSink {
    fn on_event(&self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent),
{
    fn on_event(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// 何もしないシンク
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_event(&self, _event: &ProgressEvent) {}
}
