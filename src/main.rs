use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use manga_translate_rust::{batch, cli, config, error, export, ingest, interactive, translator};
use batch::{Batch, BatchHandle, BatchOrchestrator, ProgressEvent, RunOutcome};
use cli::{Cli, Commands, ExportFormat};
use config::Config;
use error::TranslatorError;
use manga_translate_rust::common::{ItemStore, Locale, ViewMode, ViewProjector};
use std::path::PathBuf;
use std::sync::Arc;
use translator::{CachedClient, GeminiClient, TranslationCache, TranslationClient};

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "manga_translate={level},manga_translate_rust={level},manga_translate_common={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load().context("設定ファイルを読み込めません")?;

    match cli.command {
        Commands::Translate {
            inputs,
            output,
            format,
            view,
            concurrency,
            use_cache,
            interactive,
            copy,
            language,
            locale,
        } => {
            let mut config = config;
            if let Some(language) = language {
                config.target_language = language;
            }
            if let Some(locale) = locale {
                config.locale = locale;
            }
            if concurrency.is_some() {
                config.max_concurrency = concurrency;
            }

            let options = TranslateOptions { output, format, view, use_cache, interactive, copy };
            run_translate(&config, &inputs, options).await?;
        }

        Commands::Extract { archive } => {
            println!("📦 manga-translate - アーカイブ確認\n");
            let limits = ingest::IngestLimits { max_image_bytes: config.max_image_bytes };
            let contents = ingest::list_archive(&archive, limits)?;
            for (i, image) in contents.images.iter().enumerate() {
                println!("  {:>3}. {} ({}, {} bytes)", i + 1, image.name, image.mime_type, image.len());
            }
            for error in &contents.rejected {
                println!("  ⚠ {}", error);
            }
            println!("\n✔ {}枚の画像を検出", contents.images.len());
        }

        Commands::Config {
            set_api_key,
            set_model,
            set_language,
            set_locale,
            set_concurrency,
            show,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(key) = set_api_key {
                config.api_key = Some(key);
                changed = true;
                println!("✔ APIキーを設定しました");
            }
            if let Some(model) = set_model {
                println!("✔ モデルを設定しました: {}", model);
                config.model = model;
                changed = true;
            }
            if let Some(language) = set_language {
                println!("✔ 翻訳先の言語を設定しました: {}", language);
                config.target_language = language;
                changed = true;
            }
            if let Some(locale) = set_locale {
                if Locale::builtin(&locale).is_none() {
                    return Err(TranslatorError::Config(format!(
                        "未対応のロケール: {}（{}）",
                        locale,
                        Locale::SUPPORTED.join("/")
                    ))
                    .into());
                }
                println!("✔ ロケールを設定しました: {}", locale);
                config.locale = locale;
                changed = true;
            }
            if let Some(n) = set_concurrency {
                // 0 は無制限
                config.max_concurrency = (n > 0).then_some(n);
                println!("✔ 同時リクエスト数を設定しました: {}", if n > 0 { n.to_string() } else { "無制限".into() });
                changed = true;
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  APIエンドポイント: {}", config.api_base_url);
                println!("  翻訳先の言語: {}", config.target_language);
                println!("  ロケール: {}", config.locale);
                if let Some(path) = &config.locale_file {
                    println!("  ロケールファイル: {}", path.display());
                }
                println!(
                    "  同時リクエスト数: {}",
                    config.max_concurrency.map(|n| n.to_string()).unwrap_or_else(|| "無制限".into())
                );
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  最大画像サイズ: {} bytes", config.max_image_bytes);
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }

        Commands::Cache { clear, dir, info } => {
            let target = match dir {
                Some(dir) => dir,
                None => Config::cache_dir()?,
            };
            let cache_path = TranslationCache::cache_path(&target);

            if info || !clear {
                if cache_path.exists() {
                    let cache = TranslationCache::load(&target);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match TranslationCache::clear(&target) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}

struct TranslateOptions {
    output: Option<PathBuf>,
    format: ExportFormat,
    view: ViewMode,
    use_cache: bool,
    interactive: bool,
    copy: Option<export::CopyTarget>,
}

async fn run_translate(config: &Config, inputs: &[PathBuf], options: TranslateOptions) -> error::Result<()> {
    println!("📖 manga-translate - 一括翻訳\n");
    let locale = config.resolve_locale()?;

    // 1. 読み込み
    println!("[1/4] 画像を読み込み中...");
    let limits = ingest::IngestLimits { max_image_bytes: config.max_image_bytes };
    let report = ingest::ingest_paths(inputs, limits);
    for failure in &report.failures {
        match &failure.error {
            TranslatorError::ArchiveRead { .. } => {
                println!("  ⚠ {} {}", locale.zip_read_error, failure.error)
            }
            other => println!("  ⚠ {}: {}", failure.path.display(), other),
        }
    }
    if report.images.is_empty() {
        println!("{}", locale.no_images_loaded);
        let joined = inputs.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ");
        return Err(TranslatorError::NoImagesFound(joined));
    }
    println!("✔ {}枚の画像を読み込みました\n", report.images.len());

    let mut store = ItemStore::new();
    store.set_listener(|change| tracing::debug!(?change, "store changed"));
    store.append(report.images);

    // 2. キュー編集
    if options.interactive {
        println!("[2/4] キューを編集中...");
        interactive::edit_queue(&mut store)?;
        if store.is_empty() {
            println!("{}", locale.no_images_loaded);
            return Ok(());
        }
        println!("✔ {}枚を翻訳します\n", store.len());
    } else {
        println!("[2/4] キュー編集をスキップ\n");
    }

    // 3. 翻訳
    println!(
        "[3/4] 翻訳中... ({} → {}){}",
        config.model,
        config.target_language,
        if options.use_cache { " (キャッシュ有効)" } else { "" }
    );
    let gemini = GeminiClient::new(config)?;
    let cache_dir = if options.use_cache { Some(Config::cache_dir()?) } else { None };

    let (client, cached): (Arc<dyn TranslationClient>, _) = match cache_dir.as_deref() {
        Some(dir) => {
            let cached = Arc::new(CachedClient::new(
                gemini,
                TranslationCache::load(dir),
                &config.model,
                &config.target_language,
            ));
            let images: Vec<_> = store.iter().map(|item| item.image.clone()).collect();
            println!("  キャッシュ済み: {}/{}", cached.count_hits(&images), images.len());
            let client: Arc<dyn TranslationClient> = cached.clone();
            (client, Some(cached))
        }
        None => {
            let client: Arc<dyn TranslationClient> = Arc::new(gemini);
            (client, None)
        }
    };

    let handle = BatchHandle::new(Batch::new(store));
    let orchestrator = BatchOrchestrator::new(client, locale.clone()).with_concurrency(config.max_concurrency);

    let bar = ProgressBar::new(handle.lock().store.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("  [{bar:30.cyan/blue}] {pos}/{len} {msg}") {
        bar.set_style(style.progress_chars("=> "));
    }
    let sink = |event: &ProgressEvent| match event {
        ProgressEvent::Started { total } => bar.set_length(*total as u64),
        ProgressEvent::ItemResolved { completed, status_line, .. } => {
            bar.set_position(*completed as u64);
            bar.set_message(status_line.clone());
        }
        ProgressEvent::Finished { .. } => bar.finish_and_clear(),
    };

    let summary = match orchestrator.run(&handle, &sink).await {
        RunOutcome::Completed(summary) => summary,
        RunOutcome::Rejected(reason) => {
            tracing::warn!(?reason, "translation not started");
            return Ok(());
        }
    };

    if let (Some(cached), Some(dir)) = (&cached, cache_dir.as_deref()) {
        if let Err(e) = cached.save(dir) {
            tracing::warn!(error = %e, "cache save failed");
        }
    }
    println!(
        "✔ 翻訳完了: 成功 {} / 失敗 {} / 全 {}\n",
        summary.succeeded, summary.failed, summary.total
    );

    // 4. 出力
    println!("[4/4] 結果を出力中...");
    let projector = ViewProjector::new(locale.image_number.clone());
    {
        let mut state = handle.lock();
        state.select_view(options.view);
        let output = options.output.unwrap_or_else(|| PathBuf::from("."));
        let path = export::export_batch(&state, &projector, options.format, &output)?;
        println!("✔ {} {}", locale.download_success, path.display());

        if let Some(target) = options.copy {
            match export::copy_section(&state.current_view(&projector), target) {
                Ok(()) => println!("✔ {}", locale.copy_success),
                Err(e) => println!("  ⚠ {} ({})", locale.copy_failure, e),
            }
        }
    }

    if summary.all_failed() {
        return Err(TranslatorError::BatchFailed { failed: summary.failed });
    }
    println!("\n✅ {}", locale.translation_success);
    Ok(())
}
