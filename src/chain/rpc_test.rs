use super::*;

// =============================================================================
// parse_rpc_response
// =============================================================================

#[test]
fn parse_response_returns_result() {
    let value = parse_rpc_response(r#"{"jsonrpc":"2.0","id":1,"result":"0x1"}"#).unwrap();
    assert_eq!(value, serde_json::json!("0x1"));
}

#[test]
fn parse_response_surfaces_rpc_error_object() {
    let err = parse_rpc_response(
        r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"invalid params"}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, ChainError::Rpc { code: -32602, .. }));
    assert_eq!(err.to_string(), "rpc error -32602: invalid params");
}

#[test]
fn parse_response_rejects_invalid_json() {
    assert!(matches!(parse_rpc_response("not json"), Err(ChainError::Parse(_))));
}

#[test]
fn parse_response_rejects_missing_result_and_error() {
    assert!(matches!(
        parse_rpc_response(r#"{"jsonrpc":"2.0","id":1}"#),
        Err(ChainError::Parse(_))
    ));
}

#[test]
fn parse_response_accepts_null_result_as_missing() {
    // Some endpoints answer `"result": null` for absent data; that is a parse
    // failure for the read paths here, which all expect a concrete value.
    assert!(matches!(
        parse_rpc_response(r#"{"jsonrpc":"2.0","id":1,"result":null}"#),
        Err(ChainError::Parse(_))
    ));
}

// =============================================================================
// hex decoding
// =============================================================================

#[test]
fn decode_hex_bytes_strips_prefix() {
    let value = serde_json::json!("0xdeadbeef");
    assert_eq!(decode_hex_bytes(&value).unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
}

#[test]
fn decode_hex_bytes_handles_empty_return_data() {
    let value = serde_json::json!("0x");
    assert_eq!(decode_hex_bytes(&value).unwrap(), Vec::<u8>::new());
}

#[test]
fn decode_hex_bytes_rejects_non_strings() {
    let value = serde_json::json!(42);
    assert!(matches!(decode_hex_bytes(&value), Err(ChainError::Parse(_))));
}

#[test]
fn decode_quantity_parses_wei_balances() {
    let value = serde_json::json!("0xde0b6b3a7640000"); // 1 ETH
    assert_eq!(decode_quantity(&value).unwrap(), U256::from(1_000_000_000_000_000_000u64));
}

#[test]
fn decode_quantity_rejects_garbage() {
    let value = serde_json::json!("0xzz");
    assert!(matches!(decode_quantity(&value), Err(ChainError::Parse(_))));
}
