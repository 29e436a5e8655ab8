use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blueprint-measure")]
#[command(about = "建築図面をアップロードして寸法解析結果を表示するクライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub backend_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 図面（PDF/PNG/JPEG）を解析
    Analyze {
        /// 図面ファイル（省略時はドラッグ&ドロップ用のプロンプトを表示）
        file: Option<PathBuf>,

        /// 注記画像の保存先ディレクトリ
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// 解析結果をJSONで保存
        #[arg(long)]
        json: Option<PathBuf>,

        /// タイムアウト秒数（デフォルト: 設定値、初期値120）
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// 注記画像を保存しない
        #[arg(long)]
        no_download: bool,

        /// 対話確認をせず1回で終了
        #[arg(long)]
        once: bool,
    },

    /// バックエンドの疎通確認
    Ping,

    /// 設定を表示/編集
    Config {
        /// バックエンドURLを設定
        #[arg(long)]
        set_backend_url: Option<String>,

        /// タイムアウト秒数を設定
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
