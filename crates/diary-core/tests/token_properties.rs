use diary_core::crypto::{open, seal};
use diary_core::{derive_key, DiaryError, KdfParams};
use proptest::prelude::*;

fn params() -> KdfParams {
    KdfParams::new(b"property-salt".to_vec(), 1_000)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_seal_open_round_trip(plaintext in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let key = derive_key("pwd", &params()).unwrap();
        let token = seal(&key, &plaintext).unwrap();
        prop_assert_eq!(open(&key, &token).unwrap(), plaintext);
    }

    #[test]
    fn prop_wrong_password_never_opens(
        plaintext in proptest::collection::vec(any::<u8>(), 0..256),
        first in "[a-z]{1,12}",
        second in "[a-z]{1,12}",
    ) {
        prop_assume!(first != second);
        let sealing_key = derive_key(&first, &params()).unwrap();
        let other_key = derive_key(&second, &params()).unwrap();

        let token = seal(&sealing_key, &plaintext).unwrap();
        prop_assert!(matches!(open(&other_key, &token), Err(DiaryError::Integrity)));
    }

    #[test]
    fn prop_sealing_is_randomized(plaintext in proptest::collection::vec(any::<u8>(), 0..256)) {
        let key = derive_key("pwd", &params()).unwrap();
        prop_assert_ne!(seal(&key, &plaintext).unwrap(), seal(&key, &plaintext).unwrap());
    }
}
