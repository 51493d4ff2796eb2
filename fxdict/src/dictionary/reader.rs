//! 辞書バイナリの読み取り
//!
//! 構築済みの辞書を検証し、格納されている単語を列挙するためのリーダーです。
//! キーボードエンジンと同じ規則(子レベルはノードの直後、兄弟は次ポインタ)で
//! トライ部を辿ります。

use crate::dictionary::char_table::{CharEntry, CharTable};
use crate::dictionary::trie::Symbol;
use crate::dictionary::writer::{
    CHAR_ENTRY_LEN, FLAG_CHAR, FLAG_NEXT, FLAG_WIDE, HEADER_LEN, PRIORITY_MASK,
};
use crate::dictionary::{FORMAT_VERSION, MAGIC};
use crate::errors::{FxDictError, Result};
use crate::num::{Priority, U24};

/// トライ部の1ノードをデコードしたもの
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawNode {
    /// ノードの記号
    pub symbol: Symbol,
    /// ノードの優先度
    pub priority: Priority,
    /// 次の兄弟ノードのオフセット
    pub next: Option<usize>,
    /// ノードの直後のオフセット。文字ノードでは子レベルの先頭を指します。
    pub end: usize,
}

/// 辞書から取り出した単語
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedWord {
    /// 単語のUTF-16コードユニット列
    pub units: Vec<u16>,
    /// 単語終端ノードの優先度
    pub priority: Priority,
}

impl DecodedWord {
    /// 単語を文字列に変換します。
    ///
    /// 対になっていないサロゲートは置換文字になります。
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.units)
    }
}

/// 辞書バイナリのリーダー
pub struct DictionaryReader<'a> {
    max_word_len: u8,
    char_table: CharTable,
    trie: &'a [u8],
}

impl<'a> DictionaryReader<'a> {
    /// ヘッダーと文字テーブルを検証してリーダーを作成します。
    ///
    /// # エラー
    ///
    /// タグやバージョンが一致しない場合、または文字テーブルが途中で切れている場合に
    /// エラーを返します。
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(FxDictError::invalid_format(
                "dictionary",
                format!("the header needs {} bytes, but got {}", HEADER_LEN, bytes.len()),
            ));
        }
        if &bytes[..MAGIC.len()] != MAGIC {
            return Err(FxDictError::invalid_format(
                "dictionary",
                "The magic number of the input dictionary mismatches.",
            ));
        }
        let version = bytes[MAGIC.len() + 3];
        if version != FORMAT_VERSION {
            return Err(FxDictError::invalid_format(
                "dictionary",
                format!("unsupported format version {}", version),
            ));
        }
        let max_word_len = bytes[MAGIC.len() + 4];
        let num_chars = usize::from(u16::from_be_bytes([
            bytes[MAGIC.len() + 5],
            bytes[MAGIC.len() + 6],
        ]));

        let table_end = HEADER_LEN + num_chars * CHAR_ENTRY_LEN;
        if bytes.len() < table_end {
            return Err(FxDictError::invalid_format(
                "dictionary",
                format!("the character table is truncated ({} entries)", num_chars),
            ));
        }
        let entries = bytes[HEADER_LEN..table_end]
            .chunks_exact(CHAR_ENTRY_LEN)
            .map(|e| CharEntry {
                code_unit: u16::from_be_bytes([e[0], e[1]]),
                count: u32::from_be_bytes([e[2], e[3], e[4], e[5]]),
            })
            .collect();

        Ok(Self {
            max_word_len,
            char_table: CharTable::from_entries(entries),
            trie: &bytes[table_end..],
        })
    }

    /// 最長単語のコードユニット数
    #[inline(always)]
    pub fn max_word_len(&self) -> usize {
        usize::from(self.max_word_len)
    }

    /// 文字テーブル
    #[inline(always)]
    pub fn char_table(&self) -> &CharTable {
        &self.char_table
    }

    /// トライ部のバイト列
    #[inline(always)]
    pub fn trie_bytes(&self) -> &'a [u8] {
        self.trie
    }

    /// トライ部の指定したオフセットにあるノードをデコードします。
    ///
    /// # エラー
    ///
    /// ノードがトライ部の範囲外にはみ出す場合にエラーを返します。
    pub fn node_at(&self, offset: usize) -> Result<RawNode> {
        let truncated = || {
            FxDictError::invalid_format(
                "dictionary",
                format!("a trie node at offset {} is truncated", offset),
            )
        };
        let flags = *self.trie.get(offset).ok_or_else(truncated)?;
        let mut end = offset + 1;

        let symbol = if flags & FLAG_CHAR == 0 {
            Symbol::EndOfWord
        } else if flags & FLAG_WIDE == 0 {
            let c = *self.trie.get(end).ok_or_else(truncated)?;
            end += 1;
            Symbol::Char(u16::from(c))
        } else {
            let b = self.trie.get(end..end + 2).ok_or_else(truncated)?;
            end += 2;
            Symbol::Char(u16::from_be_bytes([b[0], b[1]]))
        };

        let next = if flags & FLAG_NEXT == 0 {
            None
        } else {
            let b = self.trie.get(end..end + 3).ok_or_else(truncated)?;
            end += 3;
            Some(U24::from_be_bytes([b[0], b[1], b[2]]).get() as usize)
        };

        let priority = Priority::new(flags & PRIORITY_MASK).ok_or_else(truncated)?;

        Ok(RawNode {
            symbol,
            priority,
            next,
            end,
        })
    }

    /// 辞書に格納されているすべての単語を探索順に列挙します。
    ///
    /// 子レベルを兄弟より先に辿る深さ優先探索です。
    ///
    /// # エラー
    ///
    /// ポインタが範囲外を指す場合、単語が最長単語長を超える場合、
    /// またはポインタが循環している場合にエラーを返します。
    pub fn words(&self) -> Result<Vec<DecodedWord>> {
        let mut words = vec![];
        if self.trie.is_empty() {
            return Ok(words);
        }

        let mut prefix: Vec<u16> = vec![];
        // (ノードのオフセット, 接頭辞の長さ)
        let mut stack = vec![(0, 0)];
        let mut visited = 0;

        while let Some((offset, depth)) = stack.pop() {
            // 正しい辞書では各ノードをちょうど1回ずつ訪れる
            visited += 1;
            if visited > self.trie.len() {
                return Err(FxDictError::invalid_format(
                    "dictionary",
                    "next pointers form a cycle",
                ));
            }

            prefix.truncate(depth);
            let node = self.node_at(offset)?;
            if let Some(next) = node.next {
                stack.push((next, depth));
            }
            match node.symbol {
                Symbol::EndOfWord => words.push(DecodedWord {
                    units: prefix.clone(),
                    priority: node.priority,
                }),
                Symbol::Char(c) => {
                    if depth >= self.max_word_len() {
                        return Err(FxDictError::invalid_format(
                            "dictionary",
                            format!("a word longer than {} code units", self.max_word_len()),
                        ));
                    }
                    prefix.push(c);
                    stack.push((node.end, depth + 1));
                }
            }
        }

        Ok(words)
    }
}
