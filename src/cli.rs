use clap::{Parser, Subcommand};
use health_ai_common::Category;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "health-ai")]
#[command(about = "皮膚・眼の画像AI解析とメンタルヘルスチャット", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 皮膚画像を解析
    Skin {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 眼画像を解析（--right 指定時は左右ペア解析）
    Eye {
        /// 画像ファイル（ペア解析では左眼）
        #[arg(required = true)]
        image: PathBuf,

        /// 右眼の画像ファイル
        #[arg(long)]
        right: Option<PathBuf>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// メンタルヘルスチャット
    Chat {
        /// 1回だけ送信して終了
        #[arg(short, long)]
        message: Option<String>,
    },

    /// 疾患情報テーブルを表示
    Conditions {
        /// カテゴリ: skin / eye（省略時は両方）
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// 設定管理
    Config {
        /// Gemini APIキーを設定
        #[arg(long)]
        set_gemini_key: Option<String>,

        /// Hugging Face トークンを設定
        #[arg(long)]
        set_hf_token: Option<String>,

        /// Hugging Face トークンを削除
        #[arg(long)]
        clear_hf_token: bool,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eye_pair() {
        let cli = Cli::parse_from(["health-ai", "eye", "left.jpg", "--right", "right.jpg"]);
        match cli.command {
            Commands::Eye { image, right, json } => {
                assert_eq!(image, PathBuf::from("left.jpg"));
                assert_eq!(right, Some(PathBuf::from("right.jpg")));
                assert!(!json);
            }
            _ => panic!("eye subcommand expected"),
        }
    }

    #[test]
    fn test_parse_global_verbose() {
        let cli = Cli::parse_from(["health-ai", "skin", "mole.jpg", "-v", "--json"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Skin { json: true, .. }));
    }

    #[test]
    fn test_parse_conditions_category() {
        let cli = Cli::parse_from(["health-ai", "conditions", "--category", "eye"]);
        match cli.command {
            Commands::Conditions { category } => {
                assert_eq!(category, Some(Category::Eye));
            }
            _ => panic!("conditions subcommand expected"),
        }
    }

    #[test]
    fn test_parse_unknown_category_is_rejected() {
        let result = Cli::try_parse_from(["health-ai", "conditions", "--category", "ear"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
