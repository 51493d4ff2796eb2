//! 文字出現頻度テーブル
//!
//! 単語リスト全体で各UTF-16コードユニットが何回現れたかを数え、
//! 辞書ヘッダーに格納するテーブルを構築します。

use hashbrown::HashMap;

use crate::errors::{FxDictError, Result};

/// 文字テーブルの1エントリ
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharEntry {
    /// UTF-16コードユニット
    pub code_unit: u16,

    /// 単語リスト全体での出現回数
    pub count: u32,
}

/// 出現回数の降順に並んだ文字テーブル
///
/// 同じ出現回数の文字は、単語リストを先頭から走査したときに
/// 先に現れたものが前に来ます。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharTable {
    entries: Vec<CharEntry>,
}

impl CharTable {
    /// 単語のイテレータから文字テーブルを構築します。
    ///
    /// 1つの単語内での重複も、重複した単語も、すべて数えます。
    ///
    /// # エラー
    ///
    /// 異なるコードユニットが65,535種類を超える場合、
    /// または出現回数が32ビットに収まらない場合にエラーを返します。
    pub fn from_words<'a, I>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::from_code_units(words.into_iter().map(str::encode_utf16))
    }

    /// コードユニット列のイテレータから文字テーブルを構築します。
    ///
    /// 対になっていないサロゲートも独立したコードユニットとして数えます。
    ///
    /// # エラー
    ///
    /// [`from_words()`](Self::from_words) と同じ条件でエラーを返します。
    pub fn from_code_units<I, W>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = W>,
        W: IntoIterator<Item = u16>,
    {
        // 初出順に並べたコードユニットと出現回数
        let mut tally: Vec<(u16, u64)> = vec![];
        let mut index: HashMap<u16, usize> = HashMap::new();

        for word in words {
            for c in word {
                let i = *index.entry(c).or_insert_with(|| {
                    tally.push((c, 0));
                    tally.len() - 1
                });
                tally[i].1 += 1;
            }
        }

        if tally.len() > usize::from(u16::MAX) {
            return Err(FxDictError::capacity(
                "the number of distinct code units",
                tally.len(),
                usize::from(u16::MAX),
            ));
        }

        // 安定ソートなので、同じ出現回数では初出順が保たれる
        tally.sort_by(|a, b| b.1.cmp(&a.1));

        let entries = tally
            .into_iter()
            .map(|(code_unit, count)| {
                let count = u32::try_from(count).map_err(|_| {
                    FxDictError::capacity(
                        "the occurrence count of a code unit",
                        usize::try_from(count).unwrap_or(usize::MAX),
                        u32::MAX as usize,
                    )
                })?;
                Ok(CharEntry { code_unit, count })
            })
            .collect::<Result<_>>()?;

        Ok(Self { entries })
    }

    pub(crate) fn from_entries(entries: Vec<CharEntry>) -> Self {
        Self { entries }
    }

    /// エントリのスライスを返します。
    #[inline(always)]
    pub fn entries(&self) -> &[CharEntry] {
        &self.entries
    }

    /// エントリ数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// テーブルが空なら`true`を返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
