use clap::{Parser, Subcommand};
use crate::export::CopyTarget;
use manga_translate_common::ViewMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "manga-translate")]
#[command(about = "漫画画像の一括OCR・翻訳ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像・zip・フォルダを読み込んで一括翻訳
    Translate {
        /// 入力（画像ファイル / zip / フォルダ、複数可）
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// 出力ファイル/ディレクトリ（デフォルト: ./translation.<拡張子>）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (txt/json/xlsx)
        #[arg(short, long, default_value = "txt")]
        format: ExportFormat,

        /// 出力する表示 (all / 画像番号)。省略時は全画像
        #[arg(long, default_value = "all")]
        view: ViewMode,

        /// 同時リクエスト数（省略時は設定値、未設定なら全件同時）
        #[arg(short = 'c', long)]
        concurrency: Option<usize>,

        /// キャッシュを使用（再翻訳をスキップ）
        #[arg(long)]
        use_cache: bool,

        /// 翻訳前に対話的に並べ替え・削除
        #[arg(short, long)]
        interactive: bool,

        /// 表示中のテキストをクリップボードにコピー (original/translated)
        #[arg(long)]
        copy: Option<CopyTarget>,

        /// 翻訳先の言語（省略時は設定値）
        #[arg(long)]
        language: Option<String>,

        /// 表示文言のロケール (ar/en/ja)
        #[arg(long)]
        locale: Option<String>,
    },

    /// アーカイブから取り出される画像を一覧表示
    Extract {
        /// zipファイル
        #[arg(required = true)]
        archive: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// モデル名を設定
        #[arg(long)]
        set_model: Option<String>,

        /// 翻訳先の言語を設定
        #[arg(long)]
        set_language: Option<String>,

        /// ロケールを設定 (ar/en/ja)
        #[arg(long)]
        set_locale: Option<String>,

        /// 同時リクエスト数を設定（0で無制限）
        #[arg(long)]
        set_concurrency: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// キャッシュフォルダ（省略時は既定の場所）
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            _ => Err(format!("Unknown format: {}. Use txt, json, or xlsx", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
