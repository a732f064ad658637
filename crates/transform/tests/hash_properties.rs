use courier_transform::{Normalization, hash_pii, is_sha256_hex, sha256_hex};
use proptest::prelude::*;

fn normalization() -> impl Strategy<Value = Normalization> {
    prop_oneof![
        Just(Normalization::Trim),
        Just(Normalization::Lowercase),
        Just(Normalization::Email),
        Just(Normalization::Phone),
        Just(Normalization::AlphaLower),
        Just(Normalization::Digits),
    ]
}

proptest! {
    #[test]
    fn hashing_is_deterministic(value in ".*", n in normalization()) {
        prop_assert_eq!(hash_pii(&value, n), hash_pii(&value, n));
    }

    #[test]
    fn output_is_always_a_digest(value in ".*", n in normalization()) {
        prop_assert!(is_sha256_hex(&hash_pii(&value, n)));
    }

    #[test]
    fn applying_twice_equals_applying_once(value in ".*", n in normalization()) {
        let once = hash_pii(&value, n);
        prop_assert_eq!(hash_pii(&once, n), once);
    }

    #[test]
    fn raw_input_never_leaks(value in "[a-z]{1,40}@[a-z]{1,20}\\.com") {
        let hashed = hash_pii(&value, Normalization::Email);
        prop_assert_ne!(&hashed, &value);
        prop_assert!(!hashed.contains(&value));
    }

    #[test]
    fn normalization_is_applied_before_hashing(local in "[a-z]{1,20}") {
        let upper = format!("  {}@EXAMPLE.com ", local.to_uppercase());
        let lower = format!("{local}@example.com");
        prop_assert_eq!(
            hash_pii(&upper, Normalization::Email),
            sha256_hex(&lower)
        );
    }
}
