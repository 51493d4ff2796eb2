//! 辞書の表示モジュール
//!
//! 構築済みの辞書バイナリを検証し、ヘッダーの要約と単語を標準出力に書き出します。

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use fxdict::{errors::FxDictError, DictionaryReader};

/// 表示コマンドの引数
#[derive(Parser, Debug)]
#[clap(name = "dump", about = "A program to print the contents of a dictionary.")]
pub struct Args {
    /// Binary dictionary file.
    #[clap(short = 'i', long)]
    dict_in: PathBuf,

    /// Prints the priority of each word.
    #[clap(short = 'p', long)]
    priorities: bool,
}

/// 表示処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 辞書の読み取りエラー
    #[error("Dictionary decoding failed: {0}")]
    FxDict(#[from] FxDictError),
}

/// 表示コマンドを実行する
///
/// # エラー
///
/// ファイルの読み込みに失敗した場合や辞書が不正な場合、`DumpError`を返します。
pub fn run(args: Args) -> Result<(), DumpError> {
    eprintln!("Loading the dictionary...");
    let bytes = fs::read(&args.dict_in)?;

    let out = io::stdout();
    let mut out = BufWriter::new(out.lock());
    dump(&bytes, args.priorities, &mut out)?;
    out.flush()?;
    Ok(())
}

fn dump<W>(bytes: &[u8], priorities: bool, mut wtr: W) -> Result<(), DumpError>
where
    W: Write,
{
    let reader = DictionaryReader::new(bytes)?;
    let words = reader.words()?;

    writeln!(wtr, "# max word length: {}", reader.max_word_len())?;
    writeln!(wtr, "# characters: {}", reader.char_table().len())?;
    writeln!(wtr, "# words: {}", words.len())?;
    for word in &words {
        if priorities {
            writeln!(wtr, "{}\t{}", word.to_string_lossy(), word.priority.get())?;
        } else {
            writeln!(wtr, "{}", word.to_string_lossy())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::ffi::OsStr;
    use std::fs;

    use clap::Parser;
    use fxdict::WeightedWord;

    use crate::build;

    #[test]
    fn test_dump() {
        let dict = fxdict::compile(&["apple", "orange", "blueberry"]).unwrap();
        let mut out = vec![];
        dump(dict.as_bytes(), false, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "# max word length: 9\n\
             # characters: 11\n\
             # words: 3\n\
             apple\n\
             blueberry\n\
             orange\n"
        );
    }

    #[test]
    fn test_dump_priorities() {
        let dict = fxdict::compile_weighted(&[
            WeightedWord::new("apple", 0.5),
            WeightedWord::new("toxicapple", 0.0),
        ])
        .unwrap();
        let mut out = vec![];
        dump(dict.as_bytes(), true, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().skip(3).collect();
        assert_eq!(lines, vec!["apple\t16", "toxicapple\t0"]);
    }

    #[test]
    fn test_build_then_dump() {
        let dir = tempfile::tempdir().unwrap();
        let words_in = dir.path().join("words.txt");
        let dict_out = dir.path().join("words.dict");
        fs::write(&words_in, "你好\n你好嗎\nSAY\n").unwrap();

        let args = build::Args::parse_from([
            OsStr::new("build"),
            OsStr::new("-i"),
            words_in.as_os_str(),
            OsStr::new("-o"),
            dict_out.as_os_str(),
        ]);
        build::run(args).unwrap();

        let mut out = vec![];
        dump(&fs::read(&dict_out).unwrap(), false, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let mut words: Vec<_> = out.lines().filter(|l| !l.starts_with('#')).collect();
        words.sort_unstable();
        assert_eq!(words, vec!["SAY", "你好", "你好嗎"]);
    }

    #[test]
    fn test_dump_rejects_garbage() {
        let mut out = vec![];
        assert!(matches!(
            dump(b"not a dictionary", false, &mut out),
            Err(DumpError::FxDict(_))
        ));
    }
}
