//! Program-derived address (PDA) derivation.
//!
//! A PDA is `SHA-256(seed_0 || ... || seed_n || program_id || "ProgramDerivedAddress")`
//! that does NOT decompress to an Ed25519 point, so no private key exists for
//! it. `find_program_address` appends a one-byte bump seed and walks it down
//! from 255 (stopping at 1) until the hash lands off the curve.

use log::{debug, trace};
use sha2::{Digest, Sha256};

use crate::error::TokenError;
use crate::program::{ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_2022_PROGRAM_ID};
use crate::pubkey::Pubkey;

/// Maximum number of seeds, including the bump.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed.
pub const MAX_SEED_LEN: usize = 32;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Create a PDA from an exact seed list.
///
/// Fails with `InvalidSeeds` when the seeds break the runtime limits, and with
/// `PdaNotFound` when the hash falls on the curve.
pub fn create_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<Pubkey, TokenError> {
    check_seeds(seeds)?;
    try_create_program_address(seeds, &[], program_id).ok_or(TokenError::PdaNotFound)
}

/// Find the first valid PDA for `seeds`, probing bump seeds from 255 down to 1.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), TokenError> {
    // One slot is reserved for the bump.
    if seeds.len() >= MAX_SEEDS {
        return Err(TokenError::InvalidSeeds(format!(
            "got {} seeds, but max is {} before the bump",
            seeds.len(),
            MAX_SEEDS - 1
        )));
    }
    check_seeds(seeds)?;

    for bump in bump_candidates() {
        match try_create_program_address(seeds, &[bump], program_id) {
            Some(address) => {
                debug!("derived PDA {address} with bump {bump} for program {program_id}");
                return Ok((address, bump));
            }
            None => trace!("bump {bump} lands on curve for program {program_id}"),
        }
    }

    Err(TokenError::PdaNotFound)
}

/// Find the Token-2022 associated token account for `wallet` and `mint`.
///
/// Seeds are `[wallet, token_2022_program_id, mint]` under the Associated
/// Token Account program.
pub fn find_associated_token_address(
    wallet: &Pubkey,
    mint: &Pubkey,
) -> Result<(Pubkey, u8), TokenError> {
    find_associated_token_address_with_program_id(wallet, mint, &TOKEN_2022_PROGRAM_ID)
}

/// Same as [`find_associated_token_address`] for an arbitrary token program.
pub fn find_associated_token_address_with_program_id(
    wallet: &Pubkey,
    mint: &Pubkey,
    token_program_id: &Pubkey,
) -> Result<(Pubkey, u8), TokenError> {
    find_program_address(
        &[wallet.as_ref(), token_program_id.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
}

/// Bump seeds in search order. The runtime never tries bump 0.
fn bump_candidates() -> impl Iterator<Item = u8> {
    (1..=u8::MAX).rev()
}

fn check_seeds(seeds: &[&[u8]]) -> Result<(), TokenError> {
    if seeds.len() > MAX_SEEDS {
        return Err(TokenError::InvalidSeeds(format!(
            "got {} seeds, but max is {MAX_SEEDS}",
            seeds.len()
        )));
    }
    if let Some((i, seed)) = seeds.iter().enumerate().find(|(_, s)| s.len() > MAX_SEED_LEN) {
        return Err(TokenError::InvalidSeeds(format!(
            "seed {i} is {} bytes, but max is {MAX_SEED_LEN}",
            seed.len()
        )));
    }
    Ok(())
}

/// Hash seeds + bump + program id; `None` if the result is on the curve.
fn try_create_program_address(
    seeds: &[&[u8]],
    bump_seed: &[u8],
    program_id: &Pubkey,
) -> Option<Pubkey> {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(bump_seed);
    hasher.update(program_id.as_ref());
    hasher.update(PDA_MARKER);

    let hash: [u8; 32] = hasher.finalize().into();
    let address = Pubkey::new_from_array(hash);

    // A valid PDA must NOT be on the Ed25519 curve.
    (!address.is_on_curve()).then_some(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::TOKEN_PROGRAM_ID;

    fn key(s: &str) -> Pubkey {
        s.parse().unwrap()
    }

    #[test]
    fn known_token_2022_ata() {
        let wallet = key("nrw1b6stoyvm3QPsh78iWoJwsjM1b7KfcvxYT3LbFun");
        let mint = key("D8zFabAK4Jt2Wi1TZJvMnr6EeD9K4qpiGhya1NQpyrZn");

        let (ata, bump) = find_associated_token_address(&wallet, &mint).unwrap();
        assert_eq!(ata, key("83mctxW8BCh6nPGjxx4jmyaEfbpcMZpLQiv7tXVSAV7a"));
        assert_eq!(bump, 255);
    }

    #[test]
    fn known_legacy_token_ata_needs_lower_bump() {
        let wallet = key("nrw1b6stoyvm3QPsh78iWoJwsjM1b7KfcvxYT3LbFun");
        let mint = key("D8zFabAK4Jt2Wi1TZJvMnr6EeD9K4qpiGhya1NQpyrZn");

        let (ata, bump) =
            find_associated_token_address_with_program_id(&wallet, &mint, &TOKEN_PROGRAM_ID)
                .unwrap();
        assert_eq!(ata, key("eKgCpH84VYFcutwEPQatko258hAmEHs5tgVnwStmvxb"));
        assert_eq!(bump, 254);
    }

    #[test]
    fn bump_reproduces_address() {
        let wallet = Pubkey::new_from_array([0x11; 32]);
        let mint = Pubkey::new_from_array([0x22; 32]);

        let (ata, bump) = find_associated_token_address(&wallet, &mint).unwrap();
        let recreated = create_program_address(
            &[
                wallet.as_ref(),
                TOKEN_2022_PROGRAM_ID.as_ref(),
                mint.as_ref(),
                &[bump],
            ],
            &ASSOCIATED_TOKEN_PROGRAM_ID,
        )
        .unwrap();
        assert_eq!(ata, recreated);
    }

    #[test]
    fn pda_is_not_on_curve() {
        let wallet = Pubkey::new_from_array([0xAA; 32]);
        let mint = Pubkey::new_from_array([0xBB; 32]);

        let (ata, _) = find_associated_token_address(&wallet, &mint).unwrap();
        assert!(!ata.is_on_curve(), "PDA must NOT be on the Ed25519 curve");
    }

    #[test]
    fn derivation_is_deterministic() {
        let wallet = Pubkey::new_from_array([0x11; 32]);
        let mint = Pubkey::new_from_array([0x22; 32]);

        let a = find_associated_token_address(&wallet, &mint).unwrap();
        let b = find_associated_token_address(&wallet, &mint).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_programs_give_different_atas() {
        let wallet = Pubkey::new_from_array([0x01; 32]);
        let mint = Pubkey::new_from_array([0xFF; 32]);

        let (legacy, _) =
            find_associated_token_address_with_program_id(&wallet, &mint, &TOKEN_PROGRAM_ID)
                .unwrap();
        let (t22, _) = find_associated_token_address(&wallet, &mint).unwrap();
        assert_ne!(legacy, t22);
    }

    #[test]
    fn oversized_seed_is_rejected() {
        let long = [0u8; MAX_SEED_LEN + 1];
        let err = find_program_address(&[&long[..]], &ASSOCIATED_TOKEN_PROGRAM_ID).unwrap_err();
        assert!(matches!(err, TokenError::InvalidSeeds(_)));
    }

    #[test]
    fn too_many_seeds_is_rejected() {
        let seed = [1u8; 4];
        let seeds: Vec<&[u8]> = vec![&seed[..]; MAX_SEEDS];
        assert!(matches!(
            find_program_address(&seeds, &ASSOCIATED_TOKEN_PROGRAM_ID),
            Err(TokenError::InvalidSeeds(_))
        ));

        let seeds: Vec<&[u8]> = vec![&seed[..]; MAX_SEEDS + 1];
        assert!(matches!(
            create_program_address(&seeds, &ASSOCIATED_TOKEN_PROGRAM_ID),
            Err(TokenError::InvalidSeeds(_))
        ));
    }

    #[test]
    fn bump_search_order_stops_at_one() {
        let bumps: Vec<u8> = bump_candidates().collect();
        assert_eq!(bumps.len(), 255);
        assert_eq!(bumps.first(), Some(&255));
        assert_eq!(bumps.last(), Some(&1));
        assert!(!bumps.contains(&0));
    }

    #[test]
    fn empty_seed_list_still_derives() {
        let (address, _) = find_program_address(&[], &ASSOCIATED_TOKEN_PROGRAM_ID).unwrap();
        assert!(!address.is_on_curve());
    }
}
