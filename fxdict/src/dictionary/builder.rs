//! 辞書構築のためのビルダー
//!
//! このモジュールは、単語リストから [`Dictionary`] を構築するための
//! ビルダーを提供します。

use std::io::Read;

use crate::dictionary::char_table::CharTable;
use crate::dictionary::trie::TrieBuilder;
use crate::dictionary::writer::write_dictionary;
use crate::dictionary::Dictionary;
use crate::errors::Result;
use crate::num::Priority;
use crate::word::{check_frequency, check_word_len, WeightedWord, WordList, WordListFormat};

/// 単語リストから [`Dictionary`] を構築するビルダー
pub struct DictionaryBuilder {}

impl DictionaryBuilder {
    /// 検証済みの単語リストから `Dictionary` を構築します。
    ///
    /// 処理は次の順に進みます。
    ///
    /// 1. 単語リスト全体を検証する
    /// 2. 文字テーブルを構築する
    /// 3. TSTに単語を挿入し、優先度を伝播させる
    /// 4. バイト列に書き出し、次ポインタを解決する
    ///
    /// # 引数
    ///
    /// * `words` - 単語リスト
    ///
    /// # エラー
    ///
    /// 単語リストの検証に失敗した場合や、バイナリ形式の表現範囲を超えた場合に
    /// エラーを返します。
    pub fn from_word_list(words: &WordList) -> Result<Dictionary> {
        words.validate()?;
        let units: Vec<_> = words
            .iter()
            .map(|(w, p)| (w.encode_utf16().collect::<Vec<_>>(), p))
            .collect();
        Self::build(&units)
    }

    /// コードユニット列で表された単語から `Dictionary` を構築します。
    ///
    /// 文字列では表現できない、対になっていないサロゲートを含む単語も扱えます。
    /// すべての単語の優先度は最大値になります。
    ///
    /// # エラー
    ///
    /// 単語が255コードユニットを超える場合などにエラーを返します。
    pub fn from_code_units<W>(words: &[W]) -> Result<Dictionary>
    where
        W: AsRef<[u16]>,
    {
        let words: Vec<_> = words.iter().map(|w| (w.as_ref(), Priority::MAX)).collect();
        Self::build(&words)
    }

    /// コードユニット列と頻度の組から `Dictionary` を構築します。
    ///
    /// # エラー
    ///
    /// 頻度が `[0, 1)` の範囲外の場合などにエラーを返します。
    pub fn from_weighted_code_units<W>(words: &[(W, f64)]) -> Result<Dictionary>
    where
        W: AsRef<[u16]>,
    {
        let words = words
            .iter()
            .map(|(w, f)| {
                check_frequency(*f)?;
                Ok((w.as_ref(), Priority::from_frequency(*f)))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::build(&words)
    }

    fn build<W>(words: &[(W, Priority)]) -> Result<Dictionary>
    where
        W: AsRef<[u16]>,
    {
        for (word, _) in words {
            let word = word.as_ref();
            check_word_len(word.len(), || String::from_utf16_lossy(word))?;
        }

        let table = CharTable::from_code_units(words.iter().map(|(w, _)| w.as_ref().iter().copied()))?;

        let mut trie = TrieBuilder::new();
        let mut max_word_len = 0;
        for (word, priority) in words {
            let word = word.as_ref();
            max_word_len = max_word_len.max(word.len());
            if !trie.insert(word.iter().copied(), *priority) {
                log::warn!(
                    "[fxdict] duplicate word {:?} merged",
                    String::from_utf16_lossy(word)
                );
            }
        }
        let trie = trie.finish();

        let bytes = write_dictionary(max_word_len, &table, &trie)?;
        log::debug!(
            "[fxdict] compiled {} words ({} distinct code units) into {} bytes",
            words.len(),
            table.len(),
            bytes.len()
        );
        Ok(Dictionary::new(bytes))
    }

    /// 頻度情報を持たない単語から `Dictionary` を構築します。
    ///
    /// すべての単語の優先度は最大値になります。
    pub fn from_words<S>(words: &[S]) -> Result<Dictionary>
    where
        S: AsRef<str>,
    {
        let words = WordList::Plain(words.iter().map(|w| w.as_ref().to_string()).collect());
        Self::from_word_list(&words)
    }

    /// 頻度付きの単語から `Dictionary` を構築します。
    pub fn from_weighted_words(words: &[WeightedWord]) -> Result<Dictionary> {
        Self::from_word_list(&WordList::Weighted(words.to_vec()))
    }

    /// 単語リストのファイルから `Dictionary` を構築します。
    ///
    /// # 引数
    ///
    ///  - `rdr`: 単語リストのリーダー
    ///  - `format`: 単語リストの形式
    ///
    /// # エラー
    ///
    /// 入力フォーマットが不正な場合に [`FxDictError`](crate::errors::FxDictError) を返します。
    pub fn from_reader<R>(rdr: R, format: WordListFormat) -> Result<Dictionary>
    where
        R: Read,
    {
        let words = WordList::from_reader(rdr, format)?;
        Self::from_word_list(&words)
    }
}
