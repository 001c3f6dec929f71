//! バッチ（1回の翻訳実行の単位）
//!
//! アイテムストアと実行中フラグ・進捗カウンタ・表示モードを束ねる。
//! グローバル状態は持たず、`BatchHandle` を各処理へ渡す。

pub mod orchestrator;
pub mod progress;

use manga_translate_common::{ItemStore, ProjectedView, ViewMode, ViewProjector};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use orchestrator::{BatchOrchestrator, BatchSummary, RejectReason, RunOutcome};
pub use progress::{NoProgress, ProgressEvent, ProgressSink};

#[derive(Debug, Default)]
pub struct Batch {
    pub store: ItemStore,
    pub is_translating: bool,
    pub completed: usize,
    pub total: usize,
    pub active_view: ViewMode,
}

impl Batch {
    pub fn new(store: ItemStore) -> Self {
        Self { store, ..Default::default() }
    }

    /// 表示モードだけを切り替える（ストアは変更しない）
    pub fn select_view(&mut self, mode: ViewMode) {
        self.active_view = mode;
    }

    pub fn current_view(&self, projector: &ViewProjector) -> ProjectedView {
        projector.project(&self.store, self.active_view)
    }
}

/// 共有バッチへのハンドル
#[derive(Debug, Clone, Default)]
pub struct BatchHandle(Arc<Mutex<Batch>>);

impl BatchHandle {
    pub fn new(batch: Batch) -> Self {
        Self(Arc::new(Mutex::new(batch)))
    }

    /// ロックを取得（ポイズンは無視して中身を使う）
    pub fn lock(&self) -> MutexGuard<'_, Batch> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
