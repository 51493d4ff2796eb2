//! 辞書バイナリへの書き出し
//!
//! 文字テーブルとTSTを1つのバイト列に平坦化します。
//!
//! ノードは「フラグ1バイト + 文字0〜2バイト + 次ポインタ0または3バイト」で表現されます。
//! 物理的な並び順とプローブチェインの順序は一致しないため、書き出し中に各ノードの
//! オフセットを記録し、最後に次ポインタを書き戻します。

use crate::dictionary::char_table::CharTable;
use crate::dictionary::trie::{NodeId, Symbol, Trie};
use crate::dictionary::{FORMAT_VERSION, MAGIC, MAX_OFFSET};
use crate::errors::{FxDictError, Result};
use crate::num::U24;

/// 文字ノードであることを示すビット
pub const FLAG_CHAR: u8 = 0x80;
/// コードユニットが2バイトで格納されていることを示すビット
pub const FLAG_WIDE: u8 = 0x40;
/// 次ポインタが続くことを示すビット
pub const FLAG_NEXT: u8 = 0x20;
/// 優先度を格納するビット
pub const PRIORITY_MASK: u8 = 0x1f;

/// ヘッダー(タグ、バージョン、最長単語長、文字テーブル件数)のバイト数
pub const HEADER_LEN: usize = MAGIC.len() + 4 + 1 + 2;
/// 文字テーブル1エントリのバイト数
pub const CHAR_ENTRY_LEN: usize = 2 + 4;

/// 書き戻しが必要な次ポインタ
struct Patch {
    /// ポインタを書く位置(トライ部の先頭からの相対位置)
    pos: usize,
    /// 指し先のノード
    target: NodeId,
}

/// TSTをバイト列に書き出すライター
pub struct TrieWriter<'a> {
    trie: &'a Trie,
    out: Vec<u8>,
    offsets: Vec<Option<usize>>,
    patches: Vec<Patch>,
}

impl<'a> TrieWriter<'a> {
    pub fn new(trie: &'a Trie) -> Self {
        Self {
            trie,
            out: vec![],
            offsets: vec![None; trie.num_nodes()],
            patches: vec![],
        }
    }

    /// トライ部のバイト列を生成します。
    ///
    /// # エラー
    ///
    /// ノードのオフセットが24ビットに収まらない場合にエラーを返します。
    pub fn write(mut self) -> Result<Vec<u8>> {
        let trie = self.trie;
        self.write_level(trie.root());
        self.resolve_patches()
    }

    /// 記録しておいたオフセットで次ポインタを書き戻します。
    fn resolve_patches(mut self) -> Result<Vec<u8>> {
        for patch in &self.patches {
            let offset = self.offsets[patch.target].ok_or_else(|| {
                FxDictError::invalid_format("trie", "a next pointer refers to an unwritten node")
            })?;
            let offset = U24::new(offset).ok_or_else(|| {
                FxDictError::capacity("a node offset", offset, MAX_OFFSET)
            })?;
            self.out[patch.pos..patch.pos + 3].copy_from_slice(&offset.to_be_bytes());
        }

        log::debug!(
            "[fxdict] wrote {} trie nodes in {} bytes ({} next pointers)",
            self.trie.num_nodes(),
            self.out.len(),
            self.patches.len()
        );
        Ok(self.out)
    }

    /// 1つのレベルを書き出します。
    ///
    /// プローブチェインの先頭を最初に置き、残りは先頭より小さい記号の並びと
    /// 大きい記号の並びに分けて、それぞれ中央で分割しながら書き出します。
    fn write_level(&mut self, level: &[NodeId]) {
        let trie = self.trie;
        let Some(head) = trie.head_of(level) else {
            return;
        };
        let head_symbol = trie.node(head).symbol();
        let split = level.partition_point(|&id| trie.node(id).symbol() < head_symbol);

        self.write_node(head);
        self.write_balanced(&level[..split]);
        self.write_balanced(&level[split + 1..]);
    }

    fn write_balanced(&mut self, level: &[NodeId]) {
        if level.is_empty() {
            return;
        }
        let mid = level.len() / 2;
        self.write_node(level[mid]);
        self.write_balanced(&level[..mid]);
        self.write_balanced(&level[mid + 1..]);
    }

    /// ノード自身を書き出し、続けて中央の子レベルを書き出します。
    ///
    /// したがって、文字ノードの子レベルの先頭は常にそのノードの直後に置かれます。
    fn write_node(&mut self, id: NodeId) {
        let trie = self.trie;
        let node = trie.node(id);
        self.offsets[id] = Some(self.out.len());

        let mut flags = node.priority().get() & PRIORITY_MASK;
        if node.next().is_some() {
            flags |= FLAG_NEXT;
        }
        match node.symbol() {
            Symbol::EndOfWord => self.out.push(flags),
            Symbol::Char(c) if c > 0xff => {
                self.out.push(flags | FLAG_CHAR | FLAG_WIDE);
                self.out.extend_from_slice(&c.to_be_bytes());
            }
            Symbol::Char(c) => {
                self.out.push(flags | FLAG_CHAR);
                // 0xff以下なので下位バイトのみで表現できる
                self.out.push(c.to_be_bytes()[1]);
            }
        }
        if let Some(target) = node.next() {
            self.patches.push(Patch {
                pos: self.out.len(),
                target,
            });
            self.out.extend_from_slice(&[0; 3]);
        }

        self.write_level(node.center());
    }
}

/// ヘッダー、文字テーブル、トライ部を連結して辞書バイナリを生成します。
///
/// # エラー
///
/// 最長単語長が1バイトに、文字テーブルの件数が2バイトに収まらない場合、
/// またはトライ部のオフセットが24ビットに収まらない場合にエラーを返します。
pub fn write_dictionary(max_word_len: usize, table: &CharTable, trie: &Trie) -> Result<Vec<u8>> {
    let max_word_len = u8::try_from(max_word_len)
        .map_err(|_| FxDictError::capacity("the longest word length", max_word_len, 0xff))?;
    let num_chars = u16::try_from(table.len()).map_err(|_| {
        FxDictError::capacity(
            "the number of distinct code units",
            table.len(),
            usize::from(u16::MAX),
        )
    })?;

    let trie_bytes = TrieWriter::new(trie).write()?;

    let mut out = Vec::with_capacity(HEADER_LEN + table.len() * CHAR_ENTRY_LEN + trie_bytes.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&[0, 0, 0, FORMAT_VERSION]);
    out.push(max_word_len);
    out.extend_from_slice(&num_chars.to_be_bytes());
    for e in table.entries() {
        out.extend_from_slice(&e.code_unit.to_be_bytes());
        out.extend_from_slice(&e.count.to_be_bytes());
    }
    out.extend_from_slice(&trie_bytes);
    Ok(out)
}
