use super::*;

fn addr(byte: u8) -> H160 {
    H160::from_slice(&[byte; 20])
}

// =============================================================================
// selector: checked against well-known ERC-20/721 selectors
// =============================================================================

#[test]
fn selector_matches_known_erc20_vectors() {
    assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
    assert_eq!(selector("approve(address,uint256)"), [0x09, 0x5e, 0xa7, 0xb3]);
    assert_eq!(selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
    assert_eq!(selector("decimals()"), [0x31, 0x3c, 0xe5, 0x67]);
    assert_eq!(selector("totalSupply()"), [0x18, 0x16, 0x0d, 0xdd]);
}

#[test]
fn selector_matches_known_erc721_vectors() {
    assert_eq!(selector("ownerOf(uint256)"), [0x63, 0x52, 0x21, 0x1e]);
    assert_eq!(selector("tokenURI(uint256)"), [0xc8, 0x7b, 0x56, 0xdd]);
    assert_eq!(selector("transferFrom(address,address,uint256)"), [0x23, 0xb8, 0x72, 0xdd]);
}

// =============================================================================
// encoding
// =============================================================================

#[test]
fn encode_call_with_no_args_is_just_the_selector() {
    assert_eq!(encode_call("name()", &[]), selector("name()").to_vec());
}

#[test]
fn encode_call_pads_static_args_to_words() {
    let data = encode_call("balanceOf(address)", &[Token::Address(addr(0x11))]);

    assert_eq!(data.len(), 4 + 32);
    assert_eq!(&data[..4], &[0x70, 0xa0, 0x82, 0x31]);
    assert!(data[4..16].iter().all(|&b| b == 0));
    assert!(data[16..36].iter().all(|&b| b == 0x11));
}

#[test]
fn encode_call_orders_multiple_static_args() {
    let data = encode_call(
        "transfer(address,uint256)",
        &[Token::Address(addr(0x22)), Token::Uint(U256::from(1000u64))],
    );

    assert_eq!(data.len(), 4 + 64);
    assert_eq!(U256::from_big_endian(&data[36..68]), U256::from(1000u64));
}

#[test]
fn encode_call_tail_encodes_dynamic_strings() {
    let data = encode_call(
        "mint(address,string)",
        &[Token::Address(addr(0x33)), Token::Str("ipfs://abc".into())],
    );
    let body = &data[4..];

    // Head: address word, then offset to the tail (2 words of head = 0x40).
    assert_eq!(U256::from_big_endian(&body[32..64]), U256::from(0x40u64));
    // Tail: length word, then padded UTF-8 bytes.
    assert_eq!(U256::from_big_endian(&body[64..96]), U256::from(10u64));
    assert_eq!(&body[96..106], b"ipfs://abc");
    assert!(body[106..128].iter().all(|&b| b == 0));
    assert_eq!(body.len(), 128);
}

#[test]
fn encode_call_pads_strings_to_word_multiples() {
    // 32-byte string needs no padding word beyond its own length.
    let exact = "a".repeat(32);
    let data = encode_call("mint(address,string)", &[Token::Address(addr(1)), Token::Str(exact)]);
    assert_eq!(data.len() - 4, 32 + 32 + 32 + 32);
}

// =============================================================================
// decoding
// =============================================================================

#[test]
fn decode_uint_reads_the_first_word() {
    let mut data = [0u8; 32];
    data[31] = 0x2a;
    assert_eq!(decode_uint(&data).unwrap(), U256::from(42u64));
}

#[test]
fn decode_uint_rejects_short_data() {
    assert!(matches!(decode_uint(&[0u8; 16]), Err(ChainError::AbiDecode(_))));
}

#[test]
fn decode_bool_is_nonzero_check() {
    let mut data = [0u8; 32];
    assert!(!decode_bool(&data).unwrap());
    data[31] = 1;
    assert!(decode_bool(&data).unwrap());
}

#[test]
fn decode_address_takes_the_low_20_bytes() {
    let mut data = [0u8; 32];
    data[12..].copy_from_slice(&[0x44; 20]);
    assert_eq!(decode_address(&data).unwrap(), addr(0x44));
}

#[test]
fn decode_string_round_trips_an_encoded_value() {
    // Encode a lone string the way a contract returns one: offset, len, data.
    let encoded = encode_call("x(string)", &[Token::Str("hello world".into())]);
    let body = &encoded[4..];
    assert_eq!(decode_string(body).unwrap(), "hello world");
}

#[test]
fn decode_string_rejects_truncated_tails() {
    let encoded = encode_call("x(string)", &[Token::Str("hello world".into())]);
    let body = &encoded[4..encoded.len() - 32];
    assert!(matches!(decode_string(body), Err(ChainError::AbiDecode(_))));
}

#[test]
fn decode_uint_array_reads_offset_then_elements() {
    let mut data = Vec::new();
    let mut word = [0u8; 32];
    word[31] = 0x20; // offset
    data.extend_from_slice(&word);
    word[31] = 3; // length
    data.extend_from_slice(&word);
    for v in [7u8, 8, 9] {
        word[31] = v;
        data.extend_from_slice(&word);
    }

    let values = decode_uint_array(&data).unwrap();
    assert_eq!(values, vec![U256::from(7u64), U256::from(8u64), U256::from(9u64)]);
}

#[test]
fn decode_uint_array_handles_empty_arrays() {
    let mut data = Vec::new();
    let mut word = [0u8; 32];
    word[31] = 0x20;
    data.extend_from_slice(&word);
    data.extend_from_slice(&[0u8; 32]);
    assert!(decode_uint_array(&data).unwrap().is_empty());
}
