//! 予測入力のための辞書モジュール。
//!
//! このモジュールは、単語リストからキーボードエンジンが直接走査できる
//! 辞書バイナリ(FxOSDICT形式)を構築します。
//!
//! # バイナリ形式
//!
//! | オフセット | 長さ | 内容 |
//! |---|---|---|
//! | 0 | 8 | タグ `FxOSDICT` |
//! | 8 | 4 | 予約(0) 3バイト + バージョン 1バイト |
//! | 12 | 1 | 最長単語のコードユニット数 |
//! | 13 | 2 | 文字テーブルの件数 `N` (ビッグエンディアン) |
//! | 15 | 6N | コードユニット 2バイト + 出現回数 4バイト |
//! | 15 + 6N | 残り全部 | トライ部 |
//!
//! トライ部には長さの情報も終端記号もなく、バイト列の長さで終わりを判断します。
//!
//! # 辞書のビルド
//!
//! [`DictionaryBuilder`]を使用して、単語リストから辞書を構築できます。
//! 構築済みの辞書は[`DictionaryReader`]で検証できます。
pub mod builder;
pub mod char_table;
pub mod reader;
pub mod trie;
pub mod writer;

use std::io::Write;

use crate::errors::Result;

pub use crate::dictionary::builder::DictionaryBuilder;
pub use crate::dictionary::char_table::{CharEntry, CharTable};
pub use crate::dictionary::reader::DictionaryReader;

/// 辞書バイナリを識別するタグ。
pub const MAGIC: &[u8; 8] = b"FxOSDICT";

/// 辞書フォーマットのバージョン。
///
/// クレートのセマンティックバージョンからは切り離されています。
pub const FORMAT_VERSION: u8 = 1;

/// 単語の最大長(UTF-16コードユニット数)。
pub const MAX_WORD_LEN: usize = 255;

/// 次ポインタで表現できる最大のオフセット(トライ部の先頭からの相対位置)。
pub const MAX_OFFSET: usize = 0xff_ffff;

/// 構築済みの辞書バイナリ。
///
/// ヘッダー、文字テーブル、トライ部から成る不変のバイト列です。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dictionary {
    bytes: Vec<u8>,
}

impl Dictionary {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// 辞書のバイト列を返します。
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 辞書のバイト列を取り出します。
    #[inline(always)]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// 辞書のバイト数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// 辞書が空なら`true`を返します。
    ///
    /// `len()`と対になるメソッドです(clippyの`len_without_is_empty`)。
    /// 構築済みの辞書は必ずヘッダーを含むため、常に`false`を返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 辞書を読み取るリーダーを作成します。
    ///
    /// # エラー
    ///
    /// ヘッダーが不正な場合にエラーを返します。
    pub fn reader(&self) -> Result<DictionaryReader<'_>> {
        DictionaryReader::new(&self.bytes)
    }

    /// 辞書をライターに書き出します。
    ///
    /// # 引数
    ///
    /// * `wtr` - 書き込み先
    ///
    /// # エラー
    ///
    /// 書き込みに失敗した場合にエラーを返します。
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(&self.bytes)?;
        wtr.flush()?;
        Ok(())
    }
}

impl AsRef<[u8]> for Dictionary {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Dictionary> for Vec<u8> {
    fn from(dict: Dictionary) -> Self {
        dict.bytes
    }
}
