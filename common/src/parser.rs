//! 翻訳レスポンスパーサー
//!
//! モデルが返したテキストからJSONオブジェクトを取り出し、
//! `original_text` / `translated_text` の2フィールドを検証して取り出す。

use crate::error::{Error, Result};
use crate::types::TranslationPair;
use regex::Regex;
use serde_json::{Map, Value};

lazy_static::lazy_static! {
    static ref FENCED_JSON: Regex = Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").unwrap();
}

/// レスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use manga_translate_common::extract_json;
///
/// let response = "結果: {\"original_text\": \"こんにちは\"}";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(captures) = FENCED_JSON.captures(response) {
        if let Some(body) = captures.get(1) {
            let body = body.as_str().trim();
            if !body.is_empty() {
                return Ok(body);
            }
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end > start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// 翻訳レスポンスをパース
///
/// - JSONとして読めない、またはオブジェクトでない場合はエラー
/// - フィールドの欠落・null・文字列以外の値は空文字として扱う
pub fn parse_translation_response(response: &str) -> Result<TranslationPair> {
    let json_str = extract_json(response)?;
    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| Error::Parse(format!("翻訳JSONパースエラー: {}", e)))?;

    let map = match value {
        Value::Object(map) => map,
        // 1要素の配列で返ってくる場合がある
        Value::Array(mut values) if values.len() == 1 => match values.remove(0) {
            Value::Object(map) => map,
            _ => return Err(Error::Parse("JSONオブジェクトではありません".into())),
        },
        _ => return Err(Error::Parse("JSONオブジェクトではありません".into())),
    };

    Ok(TranslationPair {
        original_text: string_field(&map, "original_text"),
        translated_text: string_field(&map, "translated_text"),
    })
}

fn string_field(map: &Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // extract_json テスト
    // =============================================

    #[test]
    fn test_extract_json_with_block() {
        let response = "Here you go:\n```json\n{\"original_text\": \"a\"}\n```\nthanks";
        let json = extract_json(response).unwrap();
        assert_eq!(json, "{\"original_text\": \"a\"}");
    }

    #[test]
    fn test_extract_json_with_bare_fence() {
        let response = "```\n{\"translated_text\": \"b\"}\n```";
        let json = extract_json(response).unwrap();
        assert!(json.contains("translated_text"));
    }

    #[test]
    fn test_extract_json_raw() {
        let response = r#"{"original_text": "x", "translated_text": "y"}"#;
        assert_eq!(extract_json(response).unwrap(), response);
    }

    #[test]
    fn test_extract_json_error() {
        let result = extract_json("No JSON here, just plain text.");
        if let Err(Error::Parse(msg)) = result {
            assert!(msg.contains("JSONが見つかりません"));
        } else {
            panic!("Expected Parse error");
        }
    }

    // =============================================
    // parse_translation_response テスト
    // =============================================

    #[test]
    fn test_parse_full_response() {
        let response = r#"{"original_text": "おはよう\n元気?", "translated_text": "صباح الخير\n\nكيف حالك؟"}"#;
        let pair = parse_translation_response(response).unwrap();
        assert_eq!(pair.original_text, "おはよう\n元気?");
        assert_eq!(pair.translated_text, "صباح الخير\n\nكيف حالك؟");
    }

    #[test]
    fn test_parse_missing_field_is_empty() {
        let pair = parse_translation_response(r#"{"original_text": "A"}"#).unwrap();
        assert_eq!(pair.original_text, "A");
        assert_eq!(pair.translated_text, "");
    }

    #[test]
    fn test_parse_malformed_fields_are_empty() {
        let response = r#"{"original_text": null, "translated_text": 42}"#;
        let pair = parse_translation_response(response).unwrap();
        assert_eq!(pair, TranslationPair::default());
    }

    #[test]
    fn test_parse_single_element_array() {
        let response = r#"[{"original_text": "A", "translated_text": "B"}]"#;
        // 配列は { を含むので中身のオブジェクト部分が抽出される
        let pair = parse_translation_response(response).unwrap();
        assert_eq!(pair, TranslationPair::new("A", "B"));
    }

    #[test]
    fn test_parse_fenced_array() {
        let response = "```json\n[{\"original_text\": \"A\", \"translated_text\": \"B\"}]\n```";
        let pair = parse_translation_response(response).unwrap();
        assert_eq!(pair, TranslationPair::new("A", "B"));
    }

    #[test]
    fn test_parse_not_an_object() {
        let result = parse_translation_response("```json\n\"just a string\"\n```");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_broken_json() {
        let result = parse_translation_response(r#"{"original_text": "A", "#);
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_empty_response() {
        assert!(parse_translation_response("").is_err());
    }
}
