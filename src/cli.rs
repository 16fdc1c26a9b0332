use bid_writer_common::workflow::StampType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bid-writer")]
#[command(about = "标书工具 命令行客户端（魔法印章）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドのURL（環境変数・設定ファイルより優先）
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ログインしてトークンを保存
    Login {
        email: String,

        /// 省略時は対話入力
        #[arg(short, long)]
        password: Option<String>,
    },

    /// ログアウト（保存済みトークンを削除）
    Logout,

    /// ログイン中のメールアドレスを表示
    Whoami,

    /// 認証コードでユーザー登録
    Register {
        email: String,

        /// 省略時は対話入力
        #[arg(short, long)]
        password: Option<String>,
    },

    /// 認証コードでパスワード再設定
    ForgotPassword { email: String },

    /// 印章画像の管理
    Stamp {
        #[command(subcommand)]
        action: StampAction,
    },

    /// ファイルをアップロードしてサーバー側パスを表示
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// 文書に盖章して結果を保存
    SmartStamp {
        /// 盖章する文書（.pdf/.docx/.doc）
        document: PathBuf,

        /// 印章ID（`stamp list` で確認）
        #[arg(long, conflicts_with = "stamp_path", required_unless_present = "stamp_path")]
        stamp_id: Option<i64>,

        /// 印章のサーバー側パス
        #[arg(long)]
        stamp_path: Option<String>,

        /// 盖章種別 (both/seal/stamp または 全部/骑缝章/印章)
        #[arg(short = 't', long = "type", default_value = "both")]
        stamp_type: StampType,

        /// 印章の幅
        #[arg(short, long)]
        width: f64,

        /// オフセット
        #[arg(short, long)]
        offset: f64,

        /// 出力ファイル（省略時はダウンロードフォルダ）
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// バックエンドURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// 保存先フォルダを設定
        #[arg(long)]
        set_download_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum StampAction {
    /// 印章一覧
    List,

    /// 印章画像をアップロード（フォルダは再帰的に走査）
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// 印章を削除
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,

        /// 確認をスキップ
        #[arg(short, long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_smart_stamp_with_label() {
        let cli = Cli::try_parse_from([
            "bid-writer", "smart-stamp", "doc.pdf", "--stamp-id", "3", "--type", "骑缝章", "-w", "40",
            "-o", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::SmartStamp { stamp_id, stamp_type, width, offset, output, .. } => {
                assert_eq!(stamp_id, Some(3));
                assert_eq!(stamp_type, StampType::Seal);
                assert_eq!(width, 40.0);
                assert_eq!(offset, 5.0);
                assert!(output.is_none());
            }
            _ => panic!("expected smart-stamp"),
        }
    }

    #[test]
    fn test_smart_stamp_requires_a_stamp() {
        let result = Cli::try_parse_from(["bid-writer", "smart-stamp", "doc.pdf", "-w", "1", "-o", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["bid-writer", "whoami", "--verbose", "--api-url", "http://x"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.api_url.as_deref(), Some("http://x"));
    }
}
