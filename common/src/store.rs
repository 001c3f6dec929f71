//! アイテムストア
//!
//! 表示順に並んだアイテム列を保持する。翻訳結果はアイテム自身に格納するため、
//! 追加・削除・並べ替えの後も画像とテキストの対応はずれない。
//!
//! 実行中の翻訳は位置ではなく `ItemId` で書き込み先を指定する。

use crate::error::{Error, Result};
use crate::types::{ImageData, Item, ItemId, ItemStatus, TranslationPair};

/// ストアの変更通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Appended { count: usize, len: usize },
    Removed { position: usize, id: ItemId, len: usize },
    Moved { from: usize, to: usize, id: ItemId },
    Cleared,
}

type Listener = Box<dyn FnMut(&StoreChange) + Send>;

/// 表示順のアイテム列
#[derive(Default)]
pub struct ItemStore {
    items: Vec<Item>,
    next_id: u64,
    listener: Option<Listener>,
}

impl std::fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore")
            .field("items", &self.items)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 変更通知の受け取り先を設定（再描画用）
    pub fn set_listener(&mut self, listener: impl FnMut(&StoreChange) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    fn notify(&mut self, change: StoreChange) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&change);
        }
    }

    /// 末尾に追加し、払い出したIDを返す
    pub fn append<I>(&mut self, images: I) -> Vec<ItemId>
    where
        I: IntoIterator<Item = ImageData>,
    {
        let mut ids = Vec::new();
        for image in images {
            let id = ItemId(self.next_id);
            self.next_id += 1;
            self.items.push(Item::new(id, image));
            ids.push(id);
        }

        if !ids.is_empty() {
            let change = StoreChange::Appended { count: ids.len(), len: self.items.len() };
            self.notify(change);
        }
        ids
    }

    /// 指定位置のアイテムを削除
    ///
    /// 後続のアイテムは1つずつ前に詰まる。
    pub fn remove(&mut self, position: usize) -> Result<Item> {
        if position >= self.items.len() {
            return Err(Error::OutOfRange { position, len: self.items.len() });
        }
        let item = self.items.remove(position);
        let change = StoreChange::Removed { position, id: item.id, len: self.items.len() };
        self.notify(change);
        Ok(item)
    }

    /// アイテムを移動
    ///
    /// 移動先（または移動元）が範囲外なら何もせず `false` を返す。
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.items.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        let item = self.items.remove(from);
        let id = item.id;
        self.items.insert(to, item);
        self.notify(StoreChange::Moved { from, to, id });
        true
    }

    /// 全アイテムを破棄（新しいアップロードで置き換える場合）
    pub fn clear(&mut self) {
        self.items.clear();
        self.notify(StoreChange::Cleared);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// 現在の全アイテムを (ID, 画像) で取得（翻訳実行開始時の取り込み用）
    pub fn snapshot(&self) -> Vec<(ItemId, ImageData)> {
        self.items
            .iter()
            .map(|item| (item.id, item.image.clone()))
            .collect()
    }

    /// 実行開始: テキストを消去して待機状態に戻す
    pub fn begin_run(&mut self, id: ItemId) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.original_text = None;
                item.translated_text = None;
                item.status = ItemStatus::Pending;
                true
            }
            None => false,
        }
    }

    pub fn mark_in_flight(&mut self, id: ItemId) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.status = ItemStatus::InFlight;
                true
            }
            None => false,
        }
    }

    /// 送信中のアイテムを待機状態に戻す（中断時用）。戻した件数を返す
    pub fn release_in_flight(&mut self) -> usize {
        let mut released = 0;
        for item in self.items.iter_mut().filter(|item| item.status == ItemStatus::InFlight) {
            item.status = ItemStatus::Pending;
            released += 1;
        }
        released
    }

    /// 翻訳成功を書き込む（削除済みのIDなら `false`）
    pub fn record_success(&mut self, id: ItemId, pair: TranslationPair) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.original_text = Some(pair.original_text);
                item.translated_text = Some(pair.translated_text);
                item.status = ItemStatus::Done;
                true
            }
            None => false,
        }
    }

    /// 翻訳失敗のプレースホルダを書き込む（削除済みのIDなら `false`）
    pub fn record_failure(&mut self, id: ItemId, original: String, translated: String) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.original_text = Some(original);
                item.translated_text = Some(translated);
                item.status = ItemStatus::Failed;
                true
            }
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a ItemStore {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn image(name: &str) -> ImageData {
        ImageData::new(name, "image/png", name.as_bytes().to_vec())
    }

    fn store_with(names: &[&str]) -> ItemStore {
        let mut store = ItemStore::new();
        store.append(names.iter().map(|n| image(n)));
        store
    }

    fn names(store: &ItemStore) -> Vec<String> {
        store.iter().map(|item| item.image.name.clone()).collect()
    }

    #[test]
    fn test_append_assigns_unique_ids() {
        let mut store = store_with(&["a.png", "b.png"]);
        let more = store.append(vec![image("c.png")]);
        assert_eq!(store.len(), 3);
        assert_eq!(more, vec![ItemId(2)]);
        assert_eq!(names(&store), vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_remove_shifts_positions() {
        let mut store = store_with(&["a.png", "b.png", "c.png"]);
        let id_c = store.get(2).unwrap().id;

        let removed = store.remove(1).unwrap();
        assert_eq!(removed.image.name, "b.png");
        assert_eq!(names(&store), vec!["a.png", "c.png"]);
        assert_eq!(store.position_of(id_c), Some(1));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = store_with(&["a.png"]);
        let result = store.remove(1);
        assert!(matches!(result, Err(Error::OutOfRange { position: 1, len: 1 })));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_move_keeps_text_attached() {
        let mut store = store_with(&["a.png", "b.png", "c.png"]);
        let id_a = store.get(0).unwrap().id;
        store.record_success(id_a, TranslationPair::new("A", "B"));

        assert!(store.move_item(0, 2));
        assert_eq!(names(&store), vec!["b.png", "c.png", "a.png"]);
        let moved = store.get(2).unwrap();
        assert_eq!(moved.original(), "A");
        assert_eq!(moved.translated(), "B");
    }

    #[test]
    fn test_move_out_of_range_is_noop() {
        let mut store = store_with(&["a.png", "b.png"]);
        assert!(!store.move_item(0, 2));
        assert!(!store.move_item(5, 0));
        assert!(!store.move_item(1, 1));
        assert_eq!(names(&store), vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_write_to_removed_item_is_dropped() {
        let mut store = store_with(&["a.png", "b.png"]);
        let id_a = store.get(0).unwrap().id;
        store.remove(0).unwrap();

        assert!(!store.record_success(id_a, TranslationPair::new("x", "y")));
        assert!(!store.record_failure(id_a, "e".into(), "f".into()));
        assert_eq!(store.get(0).unwrap().original_text, None);
    }

    #[test]
    fn test_begin_run_resets_item() {
        let mut store = store_with(&["a.png"]);
        let id = store.get(0).unwrap().id;
        store.record_failure(id, "err".into(), "failed: timeout".into());

        assert!(store.begin_run(id));
        let item = store.get(0).unwrap();
        assert_eq!(item.status, ItemStatus::Pending);
        assert_eq!(item.original_text, None);
        assert_eq!(item.translated_text, None);
    }

    #[test]
    fn test_release_in_flight() {
        let mut store = store_with(&["a.png", "b.png", "c.png"]);
        let ids: Vec<_> = store.iter().map(|item| item.id).collect();
        store.mark_in_flight(ids[0]);
        store.mark_in_flight(ids[1]);
        store.record_success(ids[1], TranslationPair::new("x", "y"));

        assert_eq!(store.release_in_flight(), 1);
        let statuses: Vec<_> = store.iter().map(|item| item.status).collect();
        assert_eq!(statuses, vec![ItemStatus::Pending, ItemStatus::Done, ItemStatus::Pending]);
    }

    #[test]
    fn test_snapshot_follows_display_order() {
        let mut store = store_with(&["a.png", "b.png", "c.png"]);
        store.move_item(2, 0);
        let snapshot = store.snapshot();
        let names: Vec<_> = snapshot.iter().map(|(_, img)| img.name.as_str()).collect();
        assert_eq!(names, vec!["c.png", "a.png", "b.png"]);
    }

    #[test]
    fn test_listener_receives_changes() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut store = ItemStore::new();
        store.set_listener(move |change| sink.lock().unwrap().push(change.clone()));
        store.append(vec![image("a.png"), image("b.png")]);
        store.move_item(0, 1);
        store.remove(0).unwrap();
        store.move_item(0, 3);
        store.clear();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], StoreChange::Appended { count: 2, len: 2 });
        assert!(matches!(seen[1], StoreChange::Moved { from: 0, to: 1, .. }));
        assert!(matches!(seen[2], StoreChange::Removed { position: 0, len: 1, .. }));
        assert_eq!(seen[3], StoreChange::Cleared);
    }

    #[test]
    fn test_append_empty_does_not_notify() {
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        let mut store = ItemStore::new();
        store.set_listener(move |_| *sink.lock().unwrap() += 1);
        store.append(Vec::new());
        assert_eq!(*count.lock().unwrap(), 0);
    }
}
