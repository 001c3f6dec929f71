//! 対話式キュー編集モジュール
//!
//! 翻訳前に読み込んだ画像の並べ替え・削除を行う

use crate::error::{Result, TranslatorError};
use dialoguer::Input;
use manga_translate_common::ItemStore;

/// 編集コマンド（番号は1始まりで入力、内部は0始まり）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueCommand {
    /// 一覧表示
    List,
    /// 指定位置を削除
    Remove(usize),
    /// from から to へ移動
    Move(usize, usize),
    /// 編集を終えて翻訳へ
    Done,
    /// 全件削除して終了
    Abort,
}

/// 入力行をコマンドに変換
pub fn parse_command(line: &str) -> std::result::Result<QueueCommand, String> {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Ok(QueueCommand::Done);
    };

    let mut position = |label: &str| -> std::result::Result<usize, String> {
        let token = tokens.next().ok_or_else(|| format!("{}の番号がありません", label))?;
        match token.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(format!("番号が不正です: {}", token)),
        }
    };

    match head {
        "l" | "ls" | "list" => Ok(QueueCommand::List),
        "d" | "rm" | "remove" => Ok(QueueCommand::Remove(position("削除")?)),
        "m" | "mv" | "move" => {
            let from = position("移動元")?;
            let to = position("移動先")?;
            Ok(QueueCommand::Move(from, to))
        }
        "q" | "done" => Ok(QueueCommand::Done),
        "abort" => Ok(QueueCommand::Abort),
        other => Err(format!("不明なコマンド: {}", other)),
    }
}

/// コマンドをストアに適用。続行するなら true
pub fn apply_command(store: &mut ItemStore, command: &QueueCommand) -> Result<bool> {
    match command {
        QueueCommand::List => {
            print_queue(store);
            Ok(true)
        }
        QueueCommand::Remove(position) => {
            let removed = store.remove(*position)?;
            println!("  → 削除: {}", removed.image.name);
            Ok(true)
        }
        QueueCommand::Move(from, to) => {
            if store.move_item(*from, *to) {
                println!("  → 移動: {} → {}", from + 1, to + 1);
            } else {
                println!("  → 移動できません（範囲外）");
            }
            Ok(true)
        }
        QueueCommand::Done => Ok(false),
        QueueCommand::Abort => {
            store.clear();
            Ok(false)
        }
    }
}

fn print_queue(store: &ItemStore) {
    for (i, item) in store.iter().enumerate() {
        println!("  {:>3}. {} ({} bytes)", i + 1, item.image.name, item.image.len());
    }
}

/// 対話式でキューを編集
pub fn edit_queue(store: &mut ItemStore) -> Result<()> {
    println!("📋 翻訳キュー: {}枚", store.len());
    println!("---");
    println!("操作: [l]一覧 [d N]削除 [m N M]移動 [Enter/q]翻訳開始 [abort]中止");
    println!("---\n");
    print_queue(store);

    while !store.is_empty() {
        let line: String = Input::new()
            .with_prompt("キュー")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| TranslatorError::Prompt(e.to_string()))?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("  → {}", message);
                continue;
            }
        };

        match apply_command(store, &command) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("  → {}", e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use manga_translate_common::ImageData;

    fn store_of(names: &[&str]) -> ItemStore {
        let mut store = ItemStore::new();
        store.append(names.iter().map(|n| ImageData::new(*n, "image/png", vec![0u8])));
        store
    }

    fn names(store: &ItemStore) -> Vec<String> {
        store.iter().map(|i| i.image.name.clone()).collect()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command(""), Ok(QueueCommand::Done));
        assert_eq!(parse_command("l"), Ok(QueueCommand::List));
        assert_eq!(parse_command("d 2"), Ok(QueueCommand::Remove(1)));
        assert_eq!(parse_command("m 3 1"), Ok(QueueCommand::Move(2, 0)));
        assert_eq!(parse_command("abort"), Ok(QueueCommand::Abort));
        assert!(parse_command("d 0").is_err());
        assert!(parse_command("m 1").is_err());
        assert!(parse_command("x").is_err());
    }

    #[test]
    fn test_apply_remove_and_move() {
        let mut store = store_of(&["a.png", "b.png", "c.png"]);

        assert!(apply_command(&mut store, &QueueCommand::Move(2, 0)).unwrap());
        assert_eq!(names(&store), vec!["c.png", "a.png", "b.png"]);

        assert!(apply_command(&mut store, &QueueCommand::Remove(1)).unwrap());
        assert_eq!(names(&store), vec!["c.png", "b.png"]);
    }

    #[test]
    fn test_apply_out_of_range() {
        let mut store = store_of(&["a.png"]);

        let result = apply_command(&mut store, &QueueCommand::Remove(5));
        assert!(matches!(result, Err(TranslatorError::OutOfRange { position: 5, len: 1 })));

        // 範囲外の移動は何もしない
        assert!(apply_command(&mut store, &QueueCommand::Move(0, 9)).unwrap());
        assert_eq!(names(&store), vec!["a.png"]);
    }

    #[test]
    fn test_apply_done_and_abort() {
        let mut store = store_of(&["a.png", "b.png"]);
        assert!(!apply_command(&mut store, &QueueCommand::Done).unwrap());
        assert_eq!(store.len(), 2);

        assert!(!apply_command(&mut store, &QueueCommand::Abort).unwrap());
        assert!(store.is_empty());
    }
}
