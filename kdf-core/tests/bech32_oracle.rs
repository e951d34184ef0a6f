//! The in-crate codec against the `bech32` crate.

use proptest::prelude::*;

use kdf_core::chains::iota::{encode_address, prefix};
use kdf_core::encoding::bech32 as codec;
use kdf_core::encoding::Hrp;

fn oracle_encode(hrp: &str, payload: &[u8]) -> String {
    let hrp = bech32::Hrp::parse(hrp).unwrap();
    bech32::encode::<bech32::Bech32>(hrp, payload).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn encode_matches_oracle(
        hrp in "[a-z]{1,10}",
        payload in prop::collection::vec(any::<u8>(), 0..40),
    ) {
        let ours = codec::encode(&Hrp::parse(&hrp).unwrap(), &payload).unwrap();
        prop_assert_eq!(&ours, &oracle_encode(&hrp, &payload));

        let (decoded_hrp, decoded) = codec::decode(&ours).unwrap();
        prop_assert_eq!(decoded_hrp.as_str(), hrp.as_str());
        prop_assert_eq!(decoded, payload);
    }

    #[test]
    fn oracle_decodes_addresses(key in prop::array::uniform32(any::<u8>())) {
        for network in prefix::ALL {
            let address = encode_address(network, &key).unwrap();
            let (hrp, payload) = bech32::decode(&address).unwrap();
            prop_assert_eq!(hrp.as_str(), network);
            prop_assert_eq!(payload.len(), 33);
            prop_assert_eq!(payload[0], 0x00);
        }
    }
}

#[test]
fn test_oracle_rejects_what_we_reject() {
    let good = oracle_encode(prefix::IOTA, &[0u8; 33]);
    assert!(codec::decode(&good).is_ok());

    // corrupt one data character
    let mut chars: Vec<char> = good.chars().collect();
    let i = chars.len() - 10;
    chars[i] = if chars[i] == 'q' { 'p' } else { 'q' };
    let bad: String = chars.into_iter().collect();

    assert!(bech32::decode(&bad).is_err());
    assert!(codec::decode(&bad).is_err());
}
