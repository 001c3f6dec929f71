//! 一括翻訳の実行
//!
//! 開始時のスナップショット（ItemIdの列）に対して1件1リクエストを発行し、
//! 全件が成功か失敗で解決するまで待つ。結果はItemIdで書き戻すため、
//! 実行中に並べ替えや削除があっても別のアイテムに書き込むことはない。

use super::progress::{ProgressEvent, ProgressSink};
use super::BatchHandle;
use crate::translator::TranslationClient;
use futures::stream::{self, StreamExt};
use manga_translate_common::{Locale, ViewMode};
use std::sync::Arc;

/// 実行を開始しなかった理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    AlreadyRunning,
    Empty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// 実行中に削除されたため書き込まれなかった件数
    pub dropped: usize,
}

impl BatchSummary {
    pub fn all_failed(&self) -> bool {
        self.total > 0 && self.succeeded == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Rejected(RejectReason),
    Completed(BatchSummary),
}

impl RunOutcome {
    pub fn summary(&self) -> Option<&BatchSummary> {
        match self {
            RunOutcome::Completed(summary) => Some(summary),
            RunOutcome::Rejected(_) => None,
        }
    }
}

/// 実行中フラグの後始末
///
/// `run` のフューチャーが途中で破棄されても（タイムアウト、`select!`、パニック）
/// バッチを実行中のまま残さない。送信中のアイテムは待機状態に戻す。
struct RunningGuard<'a> {
    batch: &'a BatchHandle,
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.batch.lock();
        let released = state.store.release_in_flight();
        if released > 0 {
            tracing::warn!(released, "batch interrupted, in-flight items returned to pending");
        }
        state.is_translating = false;
    }
}

pub struct BatchOrchestrator {
    client: Arc<dyn TranslationClient>,
    locale: Locale,
    concurrency: Option<usize>,
}

impl BatchOrchestrator {
    pub fn new(client: Arc<dyn TranslationClient>, locale: Locale) -> Self {
        Self { client, locale, concurrency: None }
    }

    /// 同時リクエスト数の上限（None = 全件同時）
    pub fn with_concurrency(mut self, concurrency: Option<usize>) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub async fn run(&self, batch: &BatchHandle, progress: &dyn ProgressSink) -> RunOutcome {
        let snapshot = {
            let mut state = batch.lock();
            if state.is_translating {
                tracing::debug!("translate requested while running, ignored");
                return RunOutcome::Rejected(RejectReason::AlreadyRunning);
            }
            if state.store.is_empty() {
                tracing::debug!("translate requested with no items, ignored");
                return RunOutcome::Rejected(RejectReason::Empty);
            }

            let snapshot = state.store.snapshot();
            for (id, _) in &snapshot {
                state.store.begin_run(*id);
            }
            state.is_translating = true;
            state.completed = 0;
            state.total = snapshot.len();
            snapshot
        };
        let running = RunningGuard { batch };

        let total = snapshot.len();
        let limit = self.concurrency.unwrap_or(total).max(1);
        tracing::info!(total, limit, "batch started");
        progress.on_event(&ProgressEvent::Started { total });

        let client = &self.client;
        let mut resolutions = stream::iter(snapshot)
            .map(|(id, image)| async move {
                batch.lock().store.mark_in_flight(id);
                let result = client.translate(&image).await;
                (id, image, result)
            })
            .buffer_unordered(limit);

        let mut summary = BatchSummary { total, ..Default::default() };

        // 解決した順に反映する
        while let Some((id, image, result)) = resolutions.next().await {
            let ok = result.is_ok();
            let (completed, written) = {
                let mut state = batch.lock();
                let written = match result {
                    Ok(pair) => state.store.record_success(id, pair),
                    Err(e) => {
                        tracing::warn!(%id, name = %image.name, error = %e, "translation failed");
                        state.store.record_failure(
                            id,
                            self.locale.error_processing.clone(),
                            self.locale.failure_text(&e.to_string()),
                        )
                    }
                };
                state.completed += 1;
                (state.completed, written)
            };

            if ok {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }
            if !written {
                tracing::debug!(%id, "item removed during run, result dropped");
                summary.dropped += 1;
            }

            progress.on_event(&ProgressEvent::ItemResolved {
                id,
                completed,
                total,
                status_line: self.locale.progress_status(completed, total),
                ok,
            });
        }

        {
            let mut state = batch.lock();
            state.active_view = if state.store.is_empty() {
                ViewMode::All
            } else {
                ViewMode::Single(0)
            };
        }
        drop(running);

        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            dropped = summary.dropped,
            "batch finished"
        );
        progress.on_event(&ProgressEvent::Finished { summary });

        RunOutcome::Completed(summary)
    }
}
