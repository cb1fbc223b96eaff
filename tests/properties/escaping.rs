//! Property tests for literal escaping.

use proptest::prelude::*;

use tplstack::encoder::{escape_bytes, escape_comment, escape_str};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: an escaped string is a valid literal with the input value.
    #[test]
    fn property_escaped_str_round_trips(s in "(?s).{0,256}") {
        let literal: syn::LitStr = syn::parse_str(&format!("\"{}\"", escape_str(&s))).unwrap();
        prop_assert_eq!(literal.value(), s);
    }

    /// PROPERTY: escaped bytes are a valid byte literal with the input value.
    #[test]
    fn property_escaped_bytes_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let literal: syn::LitByteStr =
            syn::parse_str(&format!("b\"{}\"", escape_bytes(&bytes))).unwrap();
        prop_assert_eq!(literal.value(), bytes);
    }

    /// PROPERTY: comment text never spans more than one line.
    #[test]
    fn property_comment_stays_on_one_line(s in "(?s).{0,128}") {
        let escaped = escape_comment(&s);
        prop_assert!(!escaped.contains('\n'));
        prop_assert!(!escaped.contains('\r'));
    }
}
