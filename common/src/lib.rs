//! Manga Translate Common Library
//!
//! CLIとライブラリ利用側で共有される型とユーティリティ
//! （I/Oや非同期ランタイムに依存しない部分）

pub mod types;
pub mod error;
pub mod store;
pub mod view;
pub mod parser;
pub mod prompts;
pub mod locale;
pub mod export;

pub use types::{ImageData, Item, ItemId, ItemStatus, TranslationPair};
pub use error::{Error, Result};
pub use store::{ItemStore, StoreChange};
pub use view::{ProjectedView, ViewMode, ViewProjector};
pub use parser::{extract_json, parse_translation_response};
pub use prompts::{build_translation_prompt, DEFAULT_TARGET_LANGUAGE};
pub use locale::Locale;
pub use export::{build_text_artifact, SECTION_SEPARATOR};
