use super::*;
use crate::wallet::tx::TxStatus;

fn connected_session() -> Session {
    Session {
        email: "user@example.com".into(),
        address: Some("0x1234567890123456789012345678901234567890".into()),
        connected: true,
    }
}

fn files(count: usize) -> Vec<UploadedFile> {
    (0..count)
        .map(|i| UploadedFile { name: format!("image-{i}.png"), size: 1024 })
        .collect()
}

fn instant_forge() -> Forge {
    Forge::new(Duration::ZERO)
}

// =============================================================================
// mint
// =============================================================================

#[tokio::test]
async fn mint_produces_a_pending_transaction() {
    let forge = instant_forge();
    let session = connected_session();

    let receipt = forge
        .mint(Some(&session), "My LoRA", "1.5", &files(1))
        .await
        .unwrap();

    assert_eq!(receipt.name, "My LoRA");
    assert_eq!(receipt.rent_price, "1.5");
    assert_eq!(receipt.tx.status, TxStatus::Pending);
    assert!(receipt.tx.hash.starts_with("0x"));
    assert_eq!(receipt.tx.hash.len(), 66);
}

#[tokio::test]
async fn mint_validates_required_fields() {
    let forge = instant_forge();
    let session = connected_session();

    for (name, price, count) in [("", "1.5", 1), ("My LoRA", "  ", 1), ("My LoRA", "1.5", 0)] {
        let err = forge
            .mint(Some(&session), name, price, &files(count))
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::MissingMintFields), "expected missing fields for {name:?}/{price:?}/{count}");
    }
}

#[tokio::test]
async fn mint_requires_a_complete_session() {
    let forge = instant_forge();

    let err = forge.mint(None, "My LoRA", "1.5", &files(1)).await.unwrap_err();
    assert!(matches!(err, ForgeError::NotSignedIn));

    let pending = Session { address: None, ..connected_session() };
    let err = forge
        .mint(Some(&pending), "My LoRA", "1.5", &files(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ForgeError::NotSignedIn));
}

#[tokio::test]
async fn mint_rejects_a_malformed_wallet_address() {
    let forge = instant_forge();
    let broken = Session { address: Some("0xnope".into()), ..connected_session() };

    let err = forge
        .mint(Some(&broken), "My LoRA", "1.5", &files(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ForgeError::InvalidAddress(_)));
}

// =============================================================================
// train
// =============================================================================

#[tokio::test]
async fn train_accepts_the_image_count_bounds() {
    let forge = instant_forge();

    let receipt = forge.train("My LoRA", &files(MIN_TRAINING_IMAGES)).await.unwrap();
    assert_eq!(receipt.images, MIN_TRAINING_IMAGES);

    let receipt = forge.train("My LoRA", &files(MAX_TRAINING_IMAGES)).await.unwrap();
    assert_eq!(receipt.images, MAX_TRAINING_IMAGES);
}

#[tokio::test]
async fn train_rejects_counts_outside_the_bounds() {
    let forge = instant_forge();

    let err = forge.train("My LoRA", &files(MIN_TRAINING_IMAGES - 1)).await.unwrap_err();
    assert!(matches!(err, ForgeError::TooFewTrainingImages));

    let err = forge.train("My LoRA", &files(MAX_TRAINING_IMAGES + 1)).await.unwrap_err();
    assert!(matches!(err, ForgeError::TooManyTrainingImages));
}

#[tokio::test]
async fn train_requires_a_name_and_images() {
    let forge = instant_forge();

    let err = forge.train("   ", &files(5)).await.unwrap_err();
    assert!(matches!(err, ForgeError::MissingTrainFields));

    let err = forge.train("My LoRA", &[]).await.unwrap_err();
    assert!(matches!(err, ForgeError::MissingTrainFields));
}
