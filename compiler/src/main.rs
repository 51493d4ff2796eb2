//! fxdict 辞書コンパイラのメインエントリーポイント
//!
//! このモジュールは、予測入力用の辞書を扱うためのサブコマンドを提供します。
//! 単語リストから辞書バイナリを構築する`build`と、構築済みの辞書の中身を
//! 表示する`dump`から成るCLIツールです。

mod build;
mod dump;

use clap::Parser;
use thiserror::Error;

use crate::{build::BuildError, dump::DumpError};

/// コマンドライン引数の構造体
///
/// `clap`を使用してコマンドライン引数をパースします。
#[derive(Parser, Debug)]
#[clap(name = "compile", version)]
struct Cli {
    /// 実行するサブコマンド
    #[clap(subcommand)]
    command: Command,
}

/// 利用可能なサブコマンド
#[derive(Parser, Debug)]
enum Command {
    /// 単語リストから辞書バイナリを構築します
    ///
    /// JSON配列またはテキスト形式の単語リストを読み込み、FxOSDICT形式の辞書を出力します。
    Build(build::Args),

    /// 辞書バイナリの内容を表示します
    ///
    /// ヘッダーの要約と、格納されているすべての単語を探索順に出力します。
    Dump(dump::Args),
}

/// コンパイラの実行中に発生する可能性のあるエラー
///
/// 各サブコマンドで発生したエラーをラップします。
#[derive(Debug, Error)]
pub enum CompileError {
    /// 辞書ビルド中のエラー
    #[error(transparent)]
    BuildError(#[from] BuildError),
    /// 辞書の表示中のエラー
    #[error(transparent)]
    DumpError(#[from] DumpError),
}

/// メイン関数
///
/// コマンドライン引数をパースし、指定されたサブコマンドを実行します。
///
/// # エラー
///
/// 各サブコマンドの実行中にエラーが発生した場合、そのエラーが返されます。
fn main() -> Result<(), CompileError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Build(args) => Ok(build::run(args)?),
        Command::Dump(args) => Ok(dump::run(args)?),
    }
}
