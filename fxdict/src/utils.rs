//! ユーティリティ関数を提供するモジュール
//!
//! テキスト形式の単語リストで使われるCSV行の解析を含みます。

use csv_core::ReadFieldResult;

use crate::errors::Result;

/// CSV形式の行を解析してフィールドのベクターに分割する
///
/// ダブルクォートで囲まれたフィールドや、フィールド内のカンマも正しく処理します。
///
/// # 引数
///
/// * `row` - 解析するCSV形式の文字列
///
/// # 戻り値
///
/// 解析されたフィールドを格納する文字列のベクター
///
/// # エラー
///
/// フィールドがUTF-8として不正な場合にエラーを返します。
///
/// # 例
///
/// ```
/// # use fxdict::utils::parse_csv_row;
/// let fields = parse_csv_row("apple,0.5").unwrap();
/// assert_eq!(fields, vec!["apple", "0.5"]);
///
/// let fields_with_quote = parse_csv_row("\"1,2-dichloroethane\",0.1").unwrap();
/// assert_eq!(fields_with_quote, vec!["1,2-dichloroethane", "0.1"]);
/// ```
pub fn parse_csv_row(row: &str) -> Result<Vec<String>> {
    let mut fields = vec![];
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    let mut field = vec![];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        field.extend_from_slice(&output[..nout]);
        bytes = &bytes[nin..];
        let end = match result {
            ReadFieldResult::InputEmpty => {
                if !bytes.is_empty() {
                    continue;
                }
                // 入力の終端。最後のフィールドを確定させる
                let (result, _, nout) = rdr.read_field(&[], &mut output);
                field.extend_from_slice(&output[..nout]);
                !matches!(result, ReadFieldResult::Field { record_end: false })
            }
            ReadFieldResult::OutputFull => continue,
            ReadFieldResult::Field { record_end } => record_end,
            ReadFieldResult::End => true,
        };
        fields.push(std::str::from_utf8(&field)?.to_string());
        field.clear();
        if end {
            break;
        }
    }
    Ok(fields)
}
