pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod interactive;
pub mod translator;

pub use manga_translate_common as common;
