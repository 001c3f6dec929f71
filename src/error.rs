use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslatorError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`manga-translate config --set-api-key YOUR_KEY` で設定するか、GEMINI_API_KEY を設定してください")]
    MissingApiKey,

    #[error("アーカイブ読み込みエラー ({archive}): {cause}")]
    ArchiveRead { archive: String, cause: String },

    #[error("位置 {position} は範囲外です（{len}件）")]
    OutOfRange { position: usize, len: usize },

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("{name} は上限サイズを超えています（{size} > {limit} bytes）")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("出力エラー: {0}")]
    Export(String),

    #[error("クリップボードエラー: {0}")]
    Clipboard(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("すべての画像の翻訳に失敗しました（{failed}件）")]
    BatchFailed { failed: usize },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(manga_translate_common::Error),
}

impl From<manga_translate_common::Error> for TranslatorError {
    fn from(err: manga_translate_common::Error) -> Self {
        match err {
            manga_translate_common::Error::OutOfRange { position, len } => {
                TranslatorError::OutOfRange { position, len }
            }
            other => TranslatorError::Common(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, TranslatorError>;
