//! 辞書のビルドモジュール
//!
//! このモジュールは、単語リストのファイルからFxOSDICT形式の辞書バイナリを
//! 構築する機能を提供します。出力は同じディレクトリの一時ファイルに書き出してから
//! 置き換えるため、失敗時に不完全なファイルが残ることはありません。

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use fxdict::{errors::FxDictError, Dictionary, DictionaryBuilder, WordList, WordListFormat};
use tempfile::NamedTempFile;

/// ビルドコマンドの引数
#[derive(Parser, Debug)]
#[clap(name = "build", about = "A program to build a predictive-text dictionary.")]
pub struct Args {
    /// Word list file (a JSON array, or one word per line).
    #[clap(short = 'i', long)]
    words_in: PathBuf,

    /// File to which the binary dictionary is output.
    #[clap(short = 'o', long)]
    dict_out: PathBuf,

    /// Format of the word list: json or text.
    ///
    /// If this argument is not specified, the format is guessed from the file extension.
    #[clap(short = 'f', long)]
    format: Option<WordListFormat>,
}

/// ビルド処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 一時ファイルの置き換えに失敗
    #[error("Failed to persist the dictionary: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// 辞書構築エラー
    #[error("Dictionary building failed: {0}")]
    FxDict(#[from] FxDictError),
}

/// ビルドコマンドを実行する
///
/// # エラー
///
/// ファイルの読み書きや辞書構築に失敗した場合、`BuildError`を返します。
pub fn run(args: Args) -> Result<(), BuildError> {
    let format = args
        .format
        .unwrap_or_else(|| WordListFormat::from_path(&args.words_in));

    eprintln!("Loading the word list ({})...", format);
    let words = WordList::from_reader(File::open(&args.words_in)?, format)?;

    eprintln!("Compiling {} words...", words.len());
    let dict = DictionaryBuilder::from_word_list(&words)?;

    eprintln!("Writing the dictionary...");
    write_dictionary(&dict, &args.dict_out)?;

    eprintln!(
        "Successfully built the dictionary ({} bytes) to {}",
        dict.len(),
        args.dict_out.display()
    );
    Ok(())
}

/// 辞書を一時ファイルに書き出し、出力先に移動する
fn write_dictionary(dict: &Dictionary, path: &Path) -> Result<(), BuildError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file_mut());
        dict.write(&mut writer)?;
        writer.flush()?;
    }
    temp_file.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn test_build_json() {
        let dir = tempfile::tempdir().unwrap();
        let words_in = dir.path().join("words.json");
        let dict_out = dir.path().join("out.dict");
        fs::write(&words_in, r#"["apple"]"#).unwrap();

        run(Args {
            words_in,
            dict_out: dict_out.clone(),
            format: None,
        })
        .unwrap();

        let bytes = fs::read(&dict_out).unwrap();
        assert_eq!(bytes, fxdict::compile(&["apple"]).unwrap().into_bytes());
    }

    #[test]
    fn test_build_text_with_frequencies() {
        let dir = tempfile::tempdir().unwrap();
        let words_in = dir.path().join("words.txt");
        let dict_out = dir.path().join("out.dict");
        fs::write(&words_in, "# fruits\napple,0.5\n\ntoxicapple,0\n").unwrap();

        run(Args {
            words_in,
            dict_out: dict_out.clone(),
            format: Some(WordListFormat::Text),
        })
        .unwrap();

        let expected = fxdict::compile_weighted(&[
            fxdict::WeightedWord::new("apple", 0.5),
            fxdict::WeightedWord::new("toxicapple", 0.0),
        ])
        .unwrap();
        assert_eq!(fs::read(&dict_out).unwrap(), expected.into_bytes());
    }

    #[test]
    fn test_build_rejects_invalid_list() {
        let dir = tempfile::tempdir().unwrap();
        let words_in = dir.path().join("words.json");
        let dict_out = dir.path().join("out.dict");
        fs::write(&words_in, r#"[{"w": "word", "f": 1}]"#).unwrap();

        let result = run(Args {
            words_in,
            dict_out: dict_out.clone(),
            format: None,
        });
        assert!(matches!(result, Err(BuildError::FxDict(_))));
        assert!(!dict_out.exists());
    }
}
