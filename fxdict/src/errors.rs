//! エラー型の定義
//!
//! このモジュールは、fxdictライブラリで使用されるすべてのエラー型を定義します。

use std::error::Error;
use std::fmt::{self, Debug};

/// fxdict専用のResult型
///
/// エラー型としてデフォルトで[`FxDictError`]を使用します。
pub type Result<T, E = FxDictError> = std::result::Result<T, E>;

/// fxdictのエラー型
///
/// 辞書のコンパイル中に発生する可能性のあるすべてのエラーを表現します。
/// どのエラーも出力の生成前に検出され、部分的なバイト列が返されることはありません。
#[derive(Debug, thiserror::Error)]
pub enum FxDictError {
    /// 無効な引数エラー
    ///
    /// 単語リストの検証に失敗した場合に発生します。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効なフォーマットエラー
    ///
    /// 入力ファイルや辞書バイナリの構造が不正な場合に発生します。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 容量超過エラー
    ///
    /// [`CapacityError`]のエラーバリアント。
    #[error(transparent)]
    Capacity(CapacityError),

    /// UTF-8エンコーディングエラー
    ///
    /// [`std::str::Utf8Error`]のエラーバリアント。
    #[error(transparent)]
    Utf8(std::str::Utf8Error),

    /// JSONパースエラー
    ///
    /// [`serde_json::Error`]のエラーバリアント。
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// I/Oエラー
    ///
    /// [`std::io::Error`](std::io::Error)のエラーバリアント。
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl FxDictError {
    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    /// 容量超過エラーを生成します
    ///
    /// # 引数
    ///
    /// * `what` - 上限を超えた対象
    /// * `value` - 実際の値
    /// * `limit` - 許容される最大値
    pub(crate) fn capacity(what: &'static str, value: usize, limit: usize) -> Self {
        Self::Capacity(CapacityError { what, value, limit })
    }

    /// 引数エラーの場合、そのメッセージを返します。
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument(e) => Some(&e.msg),
            Self::InvalidFormat(e) => Some(&e.msg),
            _ => None,
        }
    }
}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// バイナリ形式の表現範囲を超えた場合に使用されるエラー
#[derive(Debug)]
pub struct CapacityError {
    /// 上限を超えた対象
    pub(crate) what: &'static str,

    /// 実際の値
    pub(crate) value: usize,

    /// 許容される最大値
    pub(crate) limit: usize,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "CapacityError: {} is {}, but the format allows at most {}",
            self.what, self.value, self.limit
        )
    }
}

impl Error for CapacityError {}

impl From<std::str::Utf8Error> for FxDictError {
    fn from(error: std::str::Utf8Error) -> Self {
        Self::Utf8(error)
    }
}
