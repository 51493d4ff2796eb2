//! # fxdict
//!
//! fxdictは、予測入力キーボードのための辞書コンパイラです。
//!
//! ## 概要
//!
//! 単語リスト(頻度付きまたは頻度なし)から、キーボードエンジンがそのまま走査できる
//! コンパクトな辞書バイナリ(FxOSDICT形式)を生成します。
//! 単語はUTF-16コードユニット単位の三分探索木(TST)に格納され、各ノードには
//! そのノードを経由して到達できる単語の優先度の最大値が付与されます。
//!
//! ## 主な機能
//!
//! - **決定的な出力**: 同じ単語リストからは常に同じバイト列が生成されます
//! - **優先度順の探索**: 各レベルの兄弟ノードは優先度の降順に連結されます
//! - **入力の検証**: 不正な単語リストは構築前にエラーとして報告されます
//! - **辞書の読み取り**: 構築済みの辞書を検証し、単語を列挙できます
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use fxdict::WeightedWord;
//!
//! let dict = fxdict::compile(&["apple", "orange"])?;
//! assert_eq!(&dict.as_bytes()[..8], b"FxOSDICT");
//!
//! let dict = fxdict::compile_weighted(&[
//!     WeightedWord::new("apple", 0.5),
//!     WeightedWord::new("apply", 0.8),
//! ])?;
//! let reader = dict.reader()?;
//! assert_eq!(reader.max_word_len(), 5);
//!
//! let words: Vec<_> = reader
//!     .words()?
//!     .iter()
//!     .map(|w| (w.to_string_lossy(), w.priority.get()))
//!     .collect();
//! assert_eq!(words, vec![("apply".to_string(), 25), ("apple".to_string(), 16)]);
//! # Ok(())
//! # }
//! ```

/// 辞書データ構造とビルダー
pub mod dictionary;

/// エラー型の定義
pub mod errors;

/// 数値型のユーティリティ
pub mod num;

/// 内部ユーティリティ関数
pub mod utils;

/// 単語リストの表現と読み込み
pub mod word;


// Re-exports
pub use dictionary::{Dictionary, DictionaryBuilder, DictionaryReader};
pub use errors::{FxDictError, Result};
pub use num::Priority;
pub use word::{WeightedWord, WordList, WordListFormat};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 頻度情報を持たない単語リストから辞書を構築します。
///
/// すべての単語は最大の優先度で扱われます。
///
/// # エラー
///
/// 単語が255コードユニットを超える場合などにエラーを返します。
pub fn compile<S>(words: &[S]) -> Result<Dictionary>
where
    S: AsRef<str>,
{
    DictionaryBuilder::from_words(words)
}

/// 頻度付きの単語リストから辞書を構築します。
///
/// 頻度`f`は`ceil(f * 31)`で優先度に変換されます。
///
/// # エラー
///
/// 頻度が`[0, 1)`の範囲外の場合などにエラーを返します。
pub fn compile_weighted(words: &[WeightedWord]) -> Result<Dictionary> {
    DictionaryBuilder::from_weighted_words(words)
}

/// UTF-16コードユニット列の単語リストから辞書を構築します。
///
/// 対になっていないサロゲートもそのまま1つのコードユニットとして格納されます。
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let words: [&[u16]; 2] = [&[0xd83d], &[0x61, 0xdc00]];
/// let dict = fxdict::compile_units(&words)?;
/// let words = dict.reader()?.words()?;
/// assert_eq!(words[0].units, [0x61, 0xdc00]);
/// assert_eq!(words[1].units, [0xd83d]);
/// # Ok(())
/// # }
/// ```
///
/// # エラー
///
/// 単語が255コードユニットを超える場合などにエラーを返します。
pub fn compile_units<W>(words: &[W]) -> Result<Dictionary>
where
    W: AsRef<[u16]>,
{
    DictionaryBuilder::from_code_units(words)
}
