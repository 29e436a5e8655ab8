use anyhow::{bail, Result};
use blueprint_measure::client::HttpAnalysisClient;
use blueprint_measure::cli::{Cli, Commands};
use blueprint_measure::config::Config;
use blueprint_measure::error::BlueprintError;
use blueprint_measure::output::{render_result, ConsoleNotifier};
use blueprint_measure::{download, picker, report, runner};
use blueprint_measure_common::{
    download_artifact, picker_selection, present, Completion, SelectOutcome, SessionController,
};
use clap::Parser;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { file, output, json, timeout, no_download, once } => {
            println!("📐 blueprint-measure - 図面解析\n");

            let backend_url = config.resolve_backend_url(cli.backend_url.as_deref())?;
            let client = HttpAnalysisClient::new(backend_url, config.timeout(timeout))?;
            tracing::debug!(backend = client.base_url(), timeout = ?client.timeout(), "client ready");

            let options = AnalyzeOptions {
                output,
                json,
                download: !no_download,
                once,
            };
            run_analyze(&client, picker_selection(file), &options).await?;
        }

        Commands::Ping => {
            let backend_url = config.resolve_backend_url(cli.backend_url.as_deref())?;
            let client = HttpAnalysisClient::new(backend_url, config.timeout(None))?;

            println!("- {} に接続中...", client.base_url());
            let message = client.health().await?;
            if message.is_empty() {
                println!("✔ バックエンド応答あり");
            } else {
                println!("✔ バックエンド応答あり: {}", message);
            }
        }

        Commands::Config { set_backend_url, set_timeout, show } => {
            let mut config = config;

            if let Some(url) = set_backend_url {
                config.set_backend_url(url)?;
                println!("✔ バックエンドURLを設定しました");
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                println!("✔ タイムアウトを{}秒に設定しました", seconds);
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!(
                    "  バックエンドURL: {}",
                    config.backend_url.as_deref().unwrap_or("未設定")
                );
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                match config.resolve_backend_url(cli.backend_url.as_deref()) {
                    Ok(url) => println!("  使用するURL: {}", url),
                    Err(e) => println!("  使用するURL: 解決できません ({})", e),
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

struct AnalyzeOptions {
    output: PathBuf,
    json: Option<PathBuf>,
    download: bool,
    once: bool,
}

/// 選択 → 解析 → 結果表示 → (再試行 / やり直し) のループ
async fn run_analyze(
    client: &HttpAnalysisClient,
    mut next_path: Option<PathBuf>,
    options: &AnalyzeOptions,
) -> Result<()> {
    let mut session = SessionController::new(ConsoleNotifier);

    loop {
        // 1. ファイル選択（失敗後の再試行ではファイルを保持している）
        if !session.can_submit() {
            let path = match next_path.take() {
                Some(path) => path,
                None if options.once => return Err(BlueprintError::NoFileSelected.into()),
                None => match picker::prompt_for_drop()? {
                    Some(path) => path,
                    None => break,
                },
            };

            let candidate = match picker::candidate_from_path(&path) {
                Ok(candidate) => candidate,
                Err(e) if options.once => return Err(e.into()),
                Err(e) => {
                    eprintln!("✖ {}", e);
                    continue;
                }
            };

            match session.select(candidate) {
                SelectOutcome::Accepted(media_type) => {
                    println!("✔ {} を選択 ({})\n", path.display(), media_type);
                }
                SelectOutcome::Rejected(e) if options.once => bail!(e),
                SelectOutcome::Rejected(_) | SelectOutcome::Ignored => continue,
            }
        }

        // 2. 解析
        let file_name = session
            .candidate()
            .map(|c| c.name.clone())
            .unwrap_or_default();
        println!("[1/2] 解析中... ({})", file_name);

        let spinner = analyzing_spinner(client.timeout());
        let completion = runner::submit(&mut session, client).await;
        spinner.finish_and_clear();

        match completion {
            Some(Completion::Resolved(_)) => {
                let Some(result) = session.result() else { break };

                // 3. 結果表示・保存
                println!("\n[2/2] 結果\n");
                print!("{}", render_result(&present(result)));

                if options.download {
                    match download::save_artifact(&download_artifact(result), &options.output) {
                        Ok(path) => println!("\n✔ 注記画像を保存: {}", path.display()),
                        Err(e) => eprintln!("\n✖ 注記画像を保存できません: {:#}", e),
                    }
                }

                if let Some(json_path) = &options.json {
                    report::write_report(json_path, &file_name, result)?;
                    println!("✔ 結果を保存: {}", json_path.display());
                }

                if options.once || !confirm("別の図面を解析しますか?")? {
                    break;
                }
                session.start_over();
                println!();
            }
            Some(Completion::Failed(e)) => {
                if options.once {
                    bail!(e.user_message());
                }
                if !confirm("同じファイルで再試行しますか?")? {
                    break;
                }
            }
            Some(Completion::Stale) | None => break,
        }
    }

    println!("\n✅ 終了");
    Ok(())
}

fn analyzing_spinner(timeout: Duration) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!(
        "図面を解析しています（最大{}秒）",
        timeout.as_secs()
    ));
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}
