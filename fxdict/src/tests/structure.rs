use hashbrown::HashSet;

use crate::dictionary::reader::DictionaryReader;
use crate::dictionary::DictionaryBuilder;
use crate::dictionary::trie::Symbol;
use crate::dictionary::writer::{CHAR_ENTRY_LEN, HEADER_LEN};
use crate::errors::FxDictError;
use crate::num::Priority;
use crate::{compile, compile_units, compile_weighted, WeightedWord};

const FRUITS: [&str; 8] = [
    "apple", "orange", "apply", "organic", "blueberry", "Asia", "applesauce", "or",
];

fn weighted_fruits() -> Vec<WeightedWord> {
    [0.5, 0.6, 0.8, 0.7, 0.15, 0.75, 0.05, 0.3]
        .iter()
        .zip(FRUITS)
        .map(|(&f, w)| WeightedWord::new(w, f))
        .collect()
}

/// レベルを探索順に辿り、(記号, 優先度, 子レベルの先頭) を返す
fn chain(reader: &DictionaryReader, head: usize) -> Vec<(Symbol, Priority, usize)> {
    let mut level = vec![];
    let mut offset = Some(head);
    while let Some(o) = offset {
        let node = reader.node_at(o).unwrap();
        level.push((node.symbol, node.priority, node.end));
        offset = node.next;
    }
    level
}

/// 各レベルの探索順と優先度の整合性を再帰的に検査し、先頭の優先度を返す
fn check_level(reader: &DictionaryReader, head: usize) -> Priority {
    let level = chain(reader, head);
    for pair in level.windows(2) {
        let (s0, p0, _) = pair[0];
        let (s1, p1, _) = pair[1];
        assert!(p0 > p1 || (p0 == p1 && s0 < s1), "{:?} before {:?}", pair[0], pair[1]);
    }
    for &(symbol, priority, end) in &level {
        if let Symbol::Char(_) = symbol {
            assert_eq!(check_level(reader, end), priority);
        }
    }
    level[0].1
}

#[test]
fn test_deterministic() {
    let a = compile_weighted(&weighted_fruits()).unwrap();
    let b = compile_weighted(&weighted_fruits()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_probe_order_and_priorities() {
    for dict in [
        compile(&FRUITS).unwrap(),
        compile_weighted(&weighted_fruits()).unwrap(),
    ] {
        let reader = dict.reader().unwrap();
        check_level(&reader, 0);
    }
}

#[test]
fn test_round_trip_words() {
    let dict = compile_weighted(&weighted_fruits()).unwrap();
    let reader = dict.reader().unwrap();
    let words: HashSet<_> = reader
        .words()
        .unwrap()
        .into_iter()
        .map(|w| (w.to_string_lossy(), w.priority))
        .collect();
    let expected: HashSet<_> = weighted_fruits()
        .into_iter()
        .map(|w| (w.word, Priority::from_frequency(w.frequency)))
        .collect();
    assert_eq!(words, expected);
}

#[test]
fn test_words_follow_priority() {
    let dict = compile_weighted(&weighted_fruits()).unwrap();
    let words: Vec<_> = dict
        .reader()
        .unwrap()
        .words()
        .unwrap()
        .iter()
        .map(|w| w.to_string_lossy())
        .collect();
    assert_eq!(words[0], "apply");
    assert_eq!(words.len(), FRUITS.len());
}

#[test]
fn test_end_of_word_sibling() {
    let dict = compile(&["apple", "applesauce"]).unwrap();
    let reader = dict.reader().unwrap();
    let mut head = 0;
    for _ in "apple".chars() {
        head = reader.node_at(head).unwrap().end;
    }
    let level = chain(&reader, head);
    assert_eq!(level.len(), 2);
    assert_eq!(level[0].0, Symbol::EndOfWord);
    assert_eq!(level[1].0, Symbol::Char(u16::from(b's')));
}

#[test]
fn test_char_table_counts_every_occurrence() {
    let dict = compile(&["aa", "aa", "b"]).unwrap();
    let reader = dict.reader().unwrap();
    let table: Vec<_> = reader
        .char_table()
        .entries()
        .iter()
        .map(|e| (e.code_unit, e.count))
        .collect();
    assert_eq!(table, vec![(u16::from(b'a'), 4), (u16::from(b'b'), 1)]);
    assert_eq!(reader.words().unwrap().len(), 2);
}

#[test]
fn test_char_table_covers_trie() {
    let dict = compile(&["你好嗎", "\u{1f600}ヘ", "MAGAZINE", "नमस्ते"]).unwrap();
    let reader = dict.reader().unwrap();
    let table: HashSet<_> = reader
        .char_table()
        .entries()
        .iter()
        .map(|e| e.code_unit)
        .collect();
    for word in reader.words().unwrap() {
        for c in &word.units {
            assert!(table.contains(c));
        }
    }
    assert_eq!(reader.max_word_len(), 8);
}

#[test]
fn test_frequency_scaling() {
    let dict = compile_weighted(&[
        WeightedWord::new("a", 0.0),
        WeightedWord::new("b", 0.01),
        WeightedWord::new("c", 0.5),
        WeightedWord::new("d", 0.99),
    ])
    .unwrap();
    let mut words: Vec<_> = dict
        .reader()
        .unwrap()
        .words()
        .unwrap()
        .into_iter()
        .map(|w| (w.to_string_lossy(), w.priority.get()))
        .collect();
    words.sort();
    assert_eq!(
        words,
        vec![
            ("a".to_string(), 0),
            ("b".to_string(), 1),
            ("c".to_string(), 16),
            ("d".to_string(), 31),
        ]
    );
}

#[test]
fn test_empty_list() {
    let dict = compile::<&str>(&[]).unwrap();
    assert_eq!(
        dict.as_bytes(),
        &[0x46, 0x78, 0x4f, 0x53, 0x44, 0x49, 0x43, 0x54, 0, 0, 0, 1, 0, 0, 0]
    );
    assert_eq!(dict.len(), HEADER_LEN);
    assert!(!dict.is_empty());
}

#[test]
fn test_empty_word() {
    let dict = compile(&[""]).unwrap();
    assert_eq!(dict.len(), HEADER_LEN + 1);
    assert_eq!(dict.as_bytes()[HEADER_LEN], 0x1f);
    let words = dict.reader().unwrap().words().unwrap();
    assert_eq!(words.len(), 1);
    assert!(words[0].units.is_empty());
}

#[test]
fn test_longest_word() {
    let word = "x".repeat(255);
    let dict = compile(&[word.as_str()]).unwrap();
    assert_eq!(dict.as_bytes()[12], 0xff);
    assert_eq!(dict.len(), HEADER_LEN + CHAR_ENTRY_LEN + 255 * 2 + 1);

    let word = "x".repeat(256);
    assert!(matches!(
        compile(&[word.as_str()]),
        Err(FxDictError::InvalidArgument(_))
    ));
}

#[test]
fn test_reject_out_of_range_frequency() {
    for f in [1.0, 100.0, 255.0, -0.5, f64::NAN] {
        let err = compile_weighted(&[WeightedWord::new("word", f)]).unwrap_err();
        assert_eq!(err.message(), Some("\"f\" value not in allowed range"));
    }
}

#[test]
fn test_lone_surrogates_round_trip() {
    let words: [&[u16]; 3] = [&[0xd83d], &[0x61, 0xdc00, 0x62], &[0xd83d, 0xde00]];
    let dict = compile_units(&words).unwrap();
    let reader = dict.reader().unwrap();
    check_level(&reader, 0);

    let mut decoded: Vec<_> = reader.words().unwrap().into_iter().map(|w| w.units).collect();
    decoded.sort();
    assert_eq!(
        decoded,
        vec![vec![0x61, 0xdc00, 0x62], vec![0xd83d], vec![0xd83d, 0xde00]]
    );
    assert_eq!(reader.char_table().len(), 5);
}

#[test]
fn test_weighted_code_units() {
    let dict = DictionaryBuilder::from_weighted_code_units(&[(vec![0xdc00_u16], 0.5)]).unwrap();
    let words = dict.reader().unwrap().words().unwrap();
    assert_eq!(words[0].units, vec![0xdc00]);
    assert_eq!(words[0].priority.get(), 16);

    let err = DictionaryBuilder::from_weighted_code_units(&[(vec![0xdc00_u16], 1.0)]).unwrap_err();
    assert_eq!(err.message(), Some("\"f\" value not in allowed range"));
}

#[test]
fn test_code_units_too_long() {
    let word = vec![0xd800_u16; 256];
    assert!(matches!(
        compile_units(&[word]),
        Err(FxDictError::InvalidArgument(_))
    ));
}

#[test]
fn test_max_distinct_code_units() {
    let words: Vec<[u16; 1]> = (0..u16::MAX).map(|c| [c]).collect();
    let dict = compile_units(&words).unwrap();
    let reader = dict.reader().unwrap();
    assert_eq!(reader.char_table().len(), 65535);
    assert_eq!(reader.words().unwrap().len(), 65535);
}

#[test]
fn test_too_many_distinct_code_units() {
    // サロゲート以外のBMPの文字すべてと、サロゲートペアで全上位/下位サロゲートを使う
    let mut words: Vec<String> = (0..=u32::from(u16::MAX))
        .filter_map(char::from_u32)
        .map(String::from)
        .collect();
    words.extend((0..0x400).filter_map(|i| char::from_u32(0x10000 + i * 0x400 + i)).map(String::from));
    let units: HashSet<u16> = words.iter().flat_map(|w| w.encode_utf16()).collect();
    assert_eq!(units.len(), 65536);

    assert!(matches!(compile(&words), Err(FxDictError::Capacity(_))));
}
