use clap::{Parser, Subcommand, ValueEnum};
use evidence_ai_common::{ComplaintKind, Language};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "evidence-ai")]
#[command(about = "スクリーンショット証拠AI解析・苦情文ドラフト生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像1枚を解析してレポートを表示
    Analyze {
        /// 証拠画像（スクリーンショット・写真）
        #[arg(required = true)]
        image: PathBuf,

        /// 出力言語（省略時は設定値）
        #[arg(short, long)]
        lang: Option<LangArg>,

        /// JSONで出力
        #[arg(long)]
        json: bool,

        /// 表示する苦情文の種類
        #[arg(short, long, default_value = "cyber")]
        complaint: ComplaintArg,

        /// テキストレポートの保存先
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// 対話セッション（複数画像の解析・履歴閲覧）
    Session {
        /// 出力言語（省略時は設定値）
        #[arg(short, long)]
        lang: Option<LangArg>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// モデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 既定の言語を設定 (en/hi)
        #[arg(long)]
        set_language: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LangArg {
    En,
    Hi,
}

impl From<LangArg> for Language {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::En => Language::En,
            LangArg::Hi => Language::Hi,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ComplaintArg {
    Cyber,
    Bank,
    Consumer,
}

impl From<ComplaintArg> for ComplaintKind {
    fn from(arg: ComplaintArg) -> Self {
        match arg {
            ComplaintArg::Cyber => ComplaintKind::Cyber,
            ComplaintArg::Bank => ComplaintKind::Bank,
            ComplaintArg::Consumer => ComplaintKind::Consumer,
        }
    }
}
