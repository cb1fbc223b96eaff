//! Property tests for emitting a table and decoding it back.

use std::collections::BTreeMap;

use proptest::prelude::*;

use tplstack::{decode, emit, ContentTable, EmitOptions, SynCheck};

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::string::string_regex("[A-Za-z0-9._-]{1,12}(/[A-Za-z0-9._-]{1,12}){0,3}")
            .unwrap(),
        "(?s).{0,24}",
    ]
}

fn content() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        "(?s).{0,128}".prop_map(String::into_bytes),
        proptest::collection::vec(any::<u8>(), 0..128),
    ]
}

fn table() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    proptest::collection::btree_map(key(), content(), 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every emitted module parses and decodes to exactly its input.
    #[test]
    fn property_emit_then_decode_is_identity(entries in table()) {
        let stacked: ContentTable = entries.clone().into_iter().collect();

        let text = emit(&EmitOptions::new("demo"), &stacked, &SynCheck).unwrap();
        let decoded = decode(&text).unwrap();

        prop_assert_eq!(decoded, entries);
    }

    /// PROPERTY: output does not depend on the order entries were inserted.
    #[test]
    fn property_emission_ignores_insertion_order(entries in table()) {
        let forward: ContentTable = entries.clone().into_iter().collect();
        let reverse: ContentTable = entries.into_iter().rev().collect();

        let options = EmitOptions::new("demo");
        prop_assert_eq!(
            emit(&options, &forward, &SynCheck).unwrap(),
            emit(&options, &reverse, &SynCheck).unwrap()
        );
    }

    /// PROPERTY: any variable name is either rejected or yields a parsable module.
    #[test]
    fn property_variable_name_never_breaks_emission(name in "(?s).{0,24}") {
        let options = EmitOptions::new("demo").with_variable_name(name);
        match emit(&options, &ContentTable::new(), &SynCheck) {
            Ok(text) => prop_assert!(decode(&text).is_ok()),
            Err(err) => prop_assert_eq!(err.code(), "invalid_variable_name"),
        }
    }
}
