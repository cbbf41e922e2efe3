//! Cross-module tests exercising the public API end to end:
//! keys -> builders -> validated instructions -> serialized message.

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use token2022::*;

fn random_wallet() -> Pubkey {
    let signing_key = SigningKey::generate(&mut OsRng);
    Pubkey::new_from_array(signing_key.verifying_key().to_bytes())
}

// ─── Reference vectors ─────────────────────────────────────────────

#[test]
fn reference_associated_token_address() {
    let wallet: Pubkey = "nrw1b6stoyvm3QPsh78iWoJwsjM1b7KfcvxYT3LbFun".parse().unwrap();
    let mint: Pubkey = "D8zFabAK4Jt2Wi1TZJvMnr6EeD9K4qpiGhya1NQpyrZn".parse().unwrap();

    let (address, _) = find_associated_token_address(&wallet, &mint).unwrap();
    assert_eq!(
        address.to_string(),
        "83mctxW8BCh6nPGjxx4jmyaEfbpcMZpLQiv7tXVSAV7a"
    );
}

#[test]
fn reference_create_instruction() {
    let wallet: Pubkey = "nrw1b6stoyvm3QPsh78iWoJwsjM1b7KfcvxYT3LbFun".parse().unwrap();
    let mint: Pubkey = "D8zFabAK4Jt2Wi1TZJvMnr6EeD9K4qpiGhya1NQpyrZn".parse().unwrap();

    let builder = create_associated_token_account(wallet, wallet, mint);
    builder.validate().unwrap();
    let built = builder.build();

    assert_eq!(built.accounts.len(), 7);
    assert_eq!(built.accounts[5].pubkey, TOKEN_2022_PROGRAM_ID);
}

// ─── Real wallet keys ──────────────────────────────────────────────

#[test]
fn wallet_keys_are_on_curve_and_atas_are_not() {
    for _ in 0..8 {
        let wallet = random_wallet();
        let mint = random_wallet();
        assert!(wallet.is_on_curve());

        let (ata, bump) = find_associated_token_address(&wallet, &mint).unwrap();
        assert!(!ata.is_on_curve());

        let again = find_associated_token_address(&wallet, &mint).unwrap();
        assert_eq!((ata, bump), again);
    }
}

// ─── Mint -> ATA -> close lifecycle ────────────────────────────────

#[test]
fn mint_lifecycle_compiles_into_one_message() {
    let payer = random_wallet();
    let mint = random_wallet();
    let owner = random_wallet();

    let [allocate, init] = create_mint(payer, mint, payer, None, 6).unwrap();
    let create = create_associated_token_account_idempotent(payer, owner, mint)
        .validate_and_build()
        .unwrap();
    let (ata, _) = find_associated_token_address(&owner, &mint).unwrap();
    let close = close_account(ata, payer, owner, &[])
        .validate_and_build()
        .unwrap();

    assert_eq!(init.data.len(), 35);
    assert_eq!(create.accounts[1].pubkey, ata);

    let blockhash = [0x5a; 32];
    let msg = compile_message(&[allocate, init, create, close], &payer, &blockhash).unwrap();

    // payer, mint (new account) and owner all sign.
    assert_eq!(msg.num_required_signatures, 3);
    assert_eq!(msg.account_keys[0], payer);
    assert_eq!(msg.instructions.len(), 4);

    let bytes = msg.serialize().unwrap();
    let keys = msg.account_keys.len();
    assert_eq!(&bytes[4 + 32 * keys..4 + 32 * keys + 32], &blockhash);
    assert_eq!(bytes[4 + 32 * keys + 32], 4);
}

// ─── Validation errors surface field names ─────────────────────────

#[test]
fn validation_errors_name_the_field() {
    let err = CloseAccount::new()
        .with_account(random_wallet())
        .with_owner(random_wallet())
        .validate_and_build()
        .unwrap_err();
    assert_eq!(err.to_string(), "accounts.Destination is not set");

    let err = InitializeMint2::new()
        .with_mint(random_wallet())
        .validate_and_build()
        .unwrap_err();
    assert_eq!(err.to_string(), "accounts.MintAuthority is not set");
}

#[test]
fn too_many_multisig_signers() {
    let signers: Vec<Pubkey> = (0..=MAX_SIGNERS).map(|_| random_wallet()).collect();
    let err = close_account(random_wallet(), random_wallet(), random_wallet(), &signers)
        .validate_and_build()
        .unwrap_err();
    assert_eq!(err.to_string(), "too many signers; got 12, but max is 11");
}
