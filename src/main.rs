use clap::Parser;
use evidence_ai::{cli, config, error, gemini, importer, session, stamper};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use evidence_ai_common::{analyze, render_text_report, ComplaintKind, Labels, Language};
use gemini::GeminiClient;
use stamper::LocalStamper;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "evidence_ai=debug,evidence_ai_common=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, lang, json, complaint, export } => {
            let language: Language = lang.map(Into::into).unwrap_or(config.language);
            let complaint: ComplaintKind = complaint.into();

            if !json {
                println!("🛰  evidence-ai - 証拠解析\n");
                println!("[1/2] 画像を読み込み中...");
            }
            let payload = importer::import_path(&image)?;
            let client = GeminiClient::from_config(&config)?;

            if !json {
                println!("✔ {} ({} bytes)\n", payload.mime_type(), payload.len());
                println!("[2/2] AI解析中... (model: {})", client.model());
            }
            let result = analyze(&client, &LocalStamper, payload, language).await?;
            let report = render_text_report(&result, complaint, Labels::for_language(language));

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("✔ 解析完了\n");
                println!("{}", report);
            }

            if let Some(path) = export {
                std::fs::write(&path, &report)?;
                if !json {
                    println!("✔ レポートを保存: {}", path.display());
                }
            }
        }

        Commands::Session { lang } => {
            let language: Language = lang.map(Into::into).unwrap_or(config.language);
            let client = GeminiClient::from_config(&config)?;
            let session = session::Session::new(client, LocalStamper, language);
            session::run_interactive_session(session).await?;
        }

        Commands::Config { set_api_key, set_model, set_language, show } => {
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

            if let Some(code) = set_language {
                config.set_language(&code)?;
                changed = true;
                println!("✔ 言語を設定しました: {}", config.language.display_name());
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  言語: {}", config.language.code());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
                println!("  パス: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
