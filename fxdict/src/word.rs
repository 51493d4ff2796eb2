//! 単語リストの表現と検証
//!
//! 辞書の入力となる単語リストを定義します。単語リストは頻度情報を持たない
//! [`WordList::Plain`] と、すべての単語が頻度を持つ [`WordList::Weighted`] の
//! いずれかであり、1回のコンパイルで両者を混在させることはできません。

use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::dictionary::MAX_WORD_LEN;
use crate::errors::{FxDictError, Result};
use crate::num::Priority;
use crate::utils::parse_csv_row;

/// 頻度付きの単語
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedWord {
    /// 単語の表層形
    pub word: String,

    /// 相対頻度。`[0, 1)` の範囲でなければなりません。
    pub frequency: f64,
}

impl WeightedWord {
    /// 新しい頻度付き単語を作成します。
    pub fn new<S>(word: S, frequency: f64) -> Self
    where
        S: Into<String>,
    {
        Self {
            word: word.into(),
            frequency,
        }
    }
}

/// JSON形式の単語リストの1要素
///
/// 文字列か `{"w": ..., "f": ...}` 形式のオブジェクトのいずれかです。
/// フィールドの欠落を個別のエラーとして報告するため、
/// パース時点では両フィールドとも省略可能としています。
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawWordEntry {
    /// 頻度情報を持たない単語
    Plain(String),

    /// 頻度情報を持つ単語
    Weighted {
        /// 単語
        w: Option<String>,
        /// 相対頻度
        f: Option<f64>,
    },
}

impl RawWordEntry {
    fn kind(&self) -> &'static str {
        match self {
            Self::Plain(_) => "string",
            Self::Weighted { .. } => "object",
        }
    }
}

/// 単語リストの入力形式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordListFormat {
    /// 文字列または `{"w", "f"}` オブジェクトのJSON配列
    Json,

    /// 1行1単語のテキスト。`word,frequency` の行は頻度付きとして扱います。
    Text,
}

impl WordListFormat {
    /// ファイルの拡張子から入力形式を推定します。
    ///
    /// `.json` 以外はすべてテキスト形式とみなします。
    pub fn from_path<P>(path: P) -> Self
    where
        P: AsRef<Path>,
    {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

impl FromStr for WordListFormat {
    type Err = &'static str;

    fn from_str(format: &str) -> std::result::Result<Self, Self::Err> {
        match format {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err("Could not parse a word list format"),
        }
    }
}

impl fmt::Display for WordListFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// 辞書の入力となる単語リスト
#[derive(Clone, Debug, PartialEq)]
pub enum WordList {
    /// すべての単語が頻度情報を持たないリスト
    Plain(Vec<String>),

    /// すべての単語が頻度情報を持つリスト
    Weighted(Vec<WeightedWord>),
}

impl WordList {
    /// パース済みのエントリから単語リストを構築します。
    ///
    /// 最初のエントリの形で全体のモードが決まります。
    ///
    /// # エラー
    ///
    /// 文字列とオブジェクトが混在している場合、オブジェクトに `w` または `f` が
    /// 欠けている場合、`f` が `[0, 1)` の範囲外の場合にエラーを返します。
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawWordEntry>,
    {
        let mut entries = entries.into_iter();
        let Some(first) = entries.next() else {
            return Ok(Self::Plain(vec![]));
        };
        let previous = first.kind();

        let mut list = match first {
            RawWordEntry::Plain(w) => Self::Plain(vec![w]),
            RawWordEntry::Weighted { w, f } => Self::Weighted(vec![weighted_word(w, f)?]),
        };

        for entry in entries {
            match (&mut list, entry) {
                (Self::Plain(words), RawWordEntry::Plain(w)) => words.push(w),
                (Self::Weighted(words), RawWordEntry::Weighted { w, f }) => {
                    words.push(weighted_word(w, f)?)
                }
                (_, entry) => {
                    return Err(FxDictError::invalid_argument(
                        "words",
                        format!("Type mismatch. previous: {}, this: {}", previous, entry.kind()),
                    ));
                }
            }
        }
        Ok(list)
    }

    /// JSON配列の単語リストを読み込みます。
    ///
    /// 文字列は正しいUnicodeでなければならず、`"\ud83d"` のような
    /// 対になっていないサロゲートのエスケープはエラーになります。
    ///
    /// # エラー
    ///
    /// JSONとして不正な場合や、[`from_entries()`](Self::from_entries) の検証に
    /// 失敗した場合にエラーを返します。
    pub fn from_json_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let entries: Vec<RawWordEntry> = serde_json::from_reader(BufReader::new(rdr))?;
        Self::from_entries(entries)
    }

    /// テキスト形式の単語リストを読み込みます。
    ///
    /// 空行と `#` で始まる行は読み飛ばします。各行はCSVとして解析され、
    /// 2列目があればその値を頻度とみなします。
    /// `#` で始まる単語は `"#hashtag"` のようにダブルクォートで囲みます。
    ///
    /// 入力はUTF-8なので、対になっていないサロゲートを含む単語は表現できません。
    /// そのような単語は [`DictionaryBuilder::from_code_units()`](crate::DictionaryBuilder::from_code_units)
    /// で直接渡します。
    ///
    /// # エラー
    ///
    /// 列数が不正な場合や頻度が数値でない場合にエラーを返します。
    pub fn from_text_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let reader = BufReader::new(rdr);
        let mut entries = vec![];

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = parse_csv_row(line)?.into_iter();
            let entry = match (fields.next(), fields.next(), fields.next()) {
                (Some(w), None, None) => RawWordEntry::Plain(w),
                (Some(w), Some(f), None) => {
                    let f = f.trim().parse::<f64>().map_err(|e| {
                        FxDictError::invalid_format(
                            "words.txt",
                            format!("line {}: invalid frequency {:?}: {}", i + 1, f, e),
                        )
                    })?;
                    RawWordEntry::Weighted {
                        w: Some(w),
                        f: Some(f),
                    }
                }
                _ => {
                    return Err(FxDictError::invalid_format(
                        "words.txt",
                        format!("line {}: expected `word` or `word,frequency`", i + 1),
                    ));
                }
            };
            entries.push(entry);
        }

        Self::from_entries(entries)
    }

    /// 指定された形式で単語リストを読み込みます。
    pub fn from_reader<R>(rdr: R, format: WordListFormat) -> Result<Self>
    where
        R: Read,
    {
        match format {
            WordListFormat::Json => Self::from_json_reader(rdr),
            WordListFormat::Text => Self::from_text_reader(rdr),
        }
    }

    /// 単語数を返します。
    pub fn len(&self) -> usize {
        match self {
            Self::Plain(words) => words.len(),
            Self::Weighted(words) => words.len(),
        }
    }

    /// 単語リストが空なら`true`を返します。
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 頻度付きのリストなら`true`を返します。
    pub fn is_weighted(&self) -> bool {
        matches!(self, Self::Weighted(_))
    }

    /// 単語と優先度の組を入力順に返すイテレータを取得します。
    ///
    /// 頻度情報を持たないリストでは、すべての単語の優先度が [`Priority::MAX`] になります。
    pub fn iter(&self) -> impl Iterator<Item = (&str, Priority)> + '_ {
        let (plain, weighted) = match self {
            Self::Plain(words) => (Some(words.iter()), None),
            Self::Weighted(words) => (None, Some(words.iter())),
        };
        plain
            .into_iter()
            .flatten()
            .map(|w| (w.as_str(), Priority::MAX))
            .chain(
                weighted
                    .into_iter()
                    .flatten()
                    .map(|w| (w.word.as_str(), Priority::from_frequency(w.frequency))),
            )
    }

    /// コンパイル前の検証を行います。
    ///
    /// # エラー
    ///
    /// 頻度が `[0, 1)` の範囲外の単語や、[`MAX_WORD_LEN`] を超える長さの単語が
    /// 含まれる場合にエラーを返します。長さはUTF-16のコードユニット数で数えます。
    pub fn validate(&self) -> Result<()> {
        if let Self::Weighted(words) = self {
            for w in words {
                check_frequency(w.frequency)?;
            }
        }
        for (word, _) in self.iter() {
            check_word_len(word.encode_utf16().count(), || word.to_string())?;
        }
        Ok(())
    }
}

impl From<Vec<String>> for WordList {
    fn from(words: Vec<String>) -> Self {
        Self::Plain(words)
    }
}

impl From<Vec<WeightedWord>> for WordList {
    fn from(words: Vec<WeightedWord>) -> Self {
        Self::Weighted(words)
    }
}

/// 単語長が [`MAX_WORD_LEN`] 以下であることを確かめます。
///
/// `word` はエラーメッセージを作るときだけ呼ばれます。
pub(crate) fn check_word_len<F>(len: usize, word: F) -> Result<()>
where
    F: FnOnce() -> String,
{
    if len > MAX_WORD_LEN {
        return Err(FxDictError::invalid_argument(
            "words",
            format!(
                "word {:?} is {} code units long, longer than {}",
                word(),
                len,
                MAX_WORD_LEN
            ),
        ));
    }
    Ok(())
}

pub(crate) fn check_frequency(f: f64) -> Result<()> {
    if (0.0..1.0).contains(&f) {
        Ok(())
    } else {
        Err(FxDictError::invalid_argument(
            "words",
            "\"f\" value not in allowed range",
        ))
    }
}

fn weighted_word(w: Option<String>, f: Option<f64>) -> Result<WeightedWord> {
    let word = w.ok_or_else(|| {
        FxDictError::invalid_argument("words", "\"w\" field not found in word")
    })?;
    let frequency = f.ok_or_else(|| {
        FxDictError::invalid_argument("words", "\"f\" field not found in word")
    })?;
    check_frequency(frequency)?;
    Ok(WeightedWord { word, frequency })
}
