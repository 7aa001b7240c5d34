use anyhow::Context;
use clap::Parser;
use health_ai_common::{
    conditions, AnalysisOutcome, AnalysisSession, Category, ChatMessage, ChatTranscript, EyeSide,
    Sender,
};
use health_ai_rust::api::{
    Classifier, GeminiEyeClassifier, GradioChatBackend, GradioClient, GradioSkinClassifier,
};
use health_ai_rust::{analyzer, chat, cli, config, scanner};
use cli::{Cli, Commands};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().context("設定ファイルの読み込みに失敗")?;

    match cli.command {
        Commands::Skin { image, json } => {
            println!("🩺 health-ai - 皮膚画像解析\n");

            let mut session = AnalysisSession::single(Category::Skin);
            if let Err(notice) = session.select_image(scanner::load_candidate(&image)?) {
                println!("⚠ {}", notice);
                return Ok(());
            }

            let client = GradioClient::new(&config.skin_space, config.hf_token(), config.timeout())?;
            let classifier = GradioSkinClassifier::new(client);
            analyze(&mut session, &classifier, json).await?;
        }

        Commands::Eye { image, right, json } => {
            println!("👁 health-ai - 眼画像解析\n");

            let mut session = match &right {
                Some(_) => AnalysisSession::paired(Category::Eye),
                None => AnalysisSession::single(Category::Eye),
            };

            if let Err(notice) = session.select_eye(EyeSide::Left, scanner::load_candidate(&image)?) {
                println!("⚠ {}", notice);
                return Ok(());
            }
            if let Some(right) = &right {
                if let Err(notice) =
                    session.select_eye(EyeSide::Right, scanner::load_candidate(right)?)
                {
                    println!("⚠ {}", notice);
                    return Ok(());
                }
            }

            let api_key = config.gemini_api_key()?;
            let classifier =
                GeminiEyeClassifier::new(&api_key, &config.gemini_model, config.timeout())?;
            analyze(&mut session, &classifier, json).await?;
        }

        Commands::Chat { message } => {
            let client = GradioClient::new(&config.chat_space, config.hf_token(), config.timeout())?;
            let backend = GradioChatBackend::new(client);
            let mut transcript = ChatTranscript::new();

            match message {
                Some(text) => {
                    send_and_print(&mut transcript, &backend, &text).await;
                }
                None => {
                    println!("💬 health-ai - メンタルヘルスチャット（空行または exit で終了）\n");
                    if let Some(welcome) = transcript.last() {
                        print_message(welcome);
                    }

                    loop {
                        let input: String = dialoguer::Input::new()
                            .with_prompt("あなた")
                            .allow_empty(true)
                            .interact_text()?;
                        let input = input.trim();
                        if input.is_empty() || input.eq_ignore_ascii_case("exit") {
                            break;
                        }
                        send_and_print(&mut transcript, &backend, input).await;
                    }
                }
            }
        }

        Commands::Conditions { category } => {
            let categories = match category {
                Some(c) => vec![c],
                None => vec![Category::Skin, Category::Eye],
            };

            for category in categories {
                println!("[{}]", category);
                for record in conditions(category) {
                    println!("  {}", record.name);
                    println!("    {}", record.description);
                }
                println!();
            }
        }

        Commands::Config { set_gemini_key, set_hf_token, clear_hf_token, show } => {
            let mut config = config;
            let changed = set_gemini_key.is_some() || set_hf_token.is_some() || clear_hf_token;

            if let Some(key) = &set_gemini_key {
                config.set_gemini_api_key(key);
            }
            if let Some(token) = &set_hf_token {
                config.set_hf_token(token);
            }
            if clear_hf_token {
                config.clear_hf_token();
            }

            if changed {
                config.save().context("設定ファイルの保存に失敗")?;
                if set_gemini_key.is_some() {
                    println!("✔ Gemini APIキーを設定しました");
                }
                if set_hf_token.is_some() {
                    println!("✔ Hugging Face トークンを設定しました");
                }
                if clear_hf_token {
                    println!("✔ Hugging Face トークンを削除しました");
                }
            }

            if show {
                println!("設定: {}", Config::config_path()?.display());
                println!("  Geminiモデル: {}", config.gemini_model);
                println!("  皮膚解析space: {}", config.skin_space);
                println!("  チャットspace: {}", config.chat_space);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  Gemini APIキー: {}",
                    if config.gemini_api_key().is_ok() { "設定済み" } else { "未設定" }
                );
                println!(
                    "  Hugging Face トークン: {}",
                    if config.hf_token().is_some() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}

async fn analyze<C>(session: &mut AnalysisSession, classifier: &C, json: bool) -> anyhow::Result<()>
where
    C: Classifier + ?Sized,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    spinner.set_message("AI解析中...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = analyzer::run_analysis(session, classifier).await;
    spinner.finish_and_clear();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(notice) => {
            println!("⚠ {}", notice);
            return Ok(());
        }
    };

    if json {
        println!("{}", outcome.to_json_pretty()?);
        return Ok(());
    }

    let notice = outcome.notice();
    println!("{} {}", if notice.is_error() { "⚠" } else { "✔" }, notice);

    if let AnalysisOutcome::Found(result) = &outcome {
        println!();
        match result.confidence {
            Some(confidence) => println!("病名: {} (信頼度 {:.1}%)", result.condition, confidence),
            None => println!("病名: {}", result.condition),
        }
        println!("説明: {}", result.description);
        println!("症状:");
        for symptom in &result.symptoms {
            println!("  - {}", symptom);
        }
        println!("推奨事項:");
        for recommendation in &result.recommendations {
            println!("  - {}", recommendation);
        }
    }

    Ok(())
}

async fn send_and_print(transcript: &mut ChatTranscript, backend: &GradioChatBackend, text: &str) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("入力中...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let reply = chat::send_message(transcript, backend, text).await;
    spinner.finish_and_clear();

    if let Some(message) = reply {
        print_message(message);
    }
}

fn print_message(message: &ChatMessage) {
    let name = match message.sender {
        Sender::User => "あなた",
        Sender::Assistant => "Dr. Well Being",
    };
    println!("[{}] {}: {}\n", message.time_label(), name, message.text);
}
