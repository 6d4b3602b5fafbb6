use super::*;
use crate::chain::abi::selector;

fn addr(byte: u8) -> H160 {
    H160::from_slice(&[byte; 20])
}

#[test]
fn transfer_token_encodes_the_erc20_call() {
    let tx = transfer_token(addr(1), addr(2), U256::from(1000u64));

    assert_eq!(tx.to, addr(1));
    assert_eq!(&tx.data[..4], &selector("transfer(address,uint256)"));
    assert_eq!(tx.data.len(), 4 + 64);
    assert!(tx.value.is_zero());
    assert_eq!(tx.gas_limit, 100_000);
}

#[test]
fn mint_nft_carries_the_token_uri() {
    let tx = mint_nft(addr(3), addr(4), "ipfs://QmLoRA");

    assert_eq!(&tx.data[..4], &selector("mint(address,string)"));
    let uri_offset = tx.data.windows(13).any(|w| w == b"ipfs://QmLoRA");
    assert!(uri_offset, "token URI bytes missing from calldata");
    assert_eq!(tx.gas_limit, 200_000);
}

#[test]
fn purchase_listing_sends_the_price_as_value() {
    let price = U256::from(5_000_000u64);
    let tx = purchase_listing(addr(5), U256::from(7u64), price);

    assert_eq!(tx.value, price);
    assert_eq!(&tx.data[..4], &selector("purchaseListing(uint256)"));
    assert_eq!(tx.gas_limit, 250_000);
}

#[test]
fn custom_defaults_the_gas_limit() {
    let tx = custom(addr(6), vec![0xde, 0xad], U256::zero(), None);
    assert_eq!(tx.gas_limit, DEFAULT_GAS_LIMIT);

    let tx = custom(addr(6), Vec::new(), U256::zero(), Some(42));
    assert_eq!(tx.gas_limit, 42);
}

#[test]
fn estimate_gas_echoes_the_request_limit() {
    let tx = transfer_nft(addr(1), addr(2), addr(3), U256::one());
    assert_eq!(estimate_gas(&tx), 150_000);
}

#[tokio::test]
async fn submit_returns_a_pending_hash() {
    let result = submit(&transfer_token(addr(1), addr(2), U256::one())).await;

    assert_eq!(result.status, TxStatus::Pending);
    assert!(result.hash.starts_with("0x"));
    assert_eq!(result.hash.len(), 66);
}

#[tokio::test]
async fn submit_batch_preserves_order_and_count() {
    let txs = vec![
        transfer_token(addr(1), addr(2), U256::one()),
        approve_token(addr(1), addr(3), U256::one()),
        create_listing(addr(4), addr(1), U256::one(), U256::from(10u64)),
    ];

    let results = submit_batch(&txs).await;

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.status == TxStatus::Pending));
    // Hashes are fresh per submission.
    assert_ne!(results[0].hash, results[1].hash);
}
