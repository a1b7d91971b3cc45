//! ファイル名正規化と表示レンダリングのプロパティテスト

use crudpad::display::numbered_lines;
use crudpad::file::{normalize_filename, DEFAULT_EXTENSION};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

fn filename_stem() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_][a-zA-Z0-9_.-]{0,15}"
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn normalization_is_idempotent(stem in filename_stem()) {
        let once = normalize_filename(&stem).unwrap();
        let twice = normalize_filename(&once).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.ends_with(DEFAULT_EXTENSION));
    }

    #[test]
    fn extension_appended_exactly_once(stem in filename_stem()) {
        prop_assume!(!stem.ends_with(DEFAULT_EXTENSION));
        let normalized = normalize_filename(&stem).unwrap();
        prop_assert_eq!(normalized, format!("{}{}", stem, DEFAULT_EXTENSION));
    }

    #[test]
    fn numbering_is_contiguous(lines in proptest::collection::vec("[a-z ]{0,6}", 0..12)) {
        let content = lines.join("\n");
        let rendered = numbered_lines(&content);

        for (index, line) in rendered.iter().enumerate() {
            let prefix = format!("{}. ", index + 1);
            prop_assert!(line.starts_with(&prefix));
            prop_assert!(line.len() > prefix.len());
        }
    }
}
