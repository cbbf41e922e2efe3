//! Mint creation: Token-2022 `InitializeMint2`, and the `create_mint` pair that
//! allocates and initializes a mint in one transaction.
//!
//! `InitializeMint2` payload:
//!
//! ```text
//! u8      tag = 20
//! u8      decimals
//! [u8;32] mint authority
//! u8      freeze authority present (0/1)
//! [u8;32] freeze authority, only when present
//! ```

use crate::error::TokenError;
use crate::instruction::{require_account, AccountMeta, BuildInstruction, Instruction};
use crate::program::TokenProgram;
use crate::pubkey::{Pubkey, PUBKEY_BYTES};
use crate::system::{minimum_balance_for_rent_exemption, CreateAccount};

/// `TokenInstruction::InitializeMint2` discriminator.
const INITIALIZE_MINT2_TAG: u8 = 20;

/// Size of a mint account without extensions.
pub const MINT_SIZE: usize = 82;

/// Builder for `InitializeMint2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitializeMint2 {
    mint: Pubkey,
    decimals: u8,
    mint_authority: Pubkey,
    freeze_authority: Option<Pubkey>,
    token_program: TokenProgram,
}

impl InitializeMint2 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mint(mut self, mint: Pubkey) -> Self {
        self.mint = mint;
        self
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_mint_authority(mut self, authority: Pubkey) -> Self {
        self.mint_authority = authority;
        self
    }

    pub fn with_freeze_authority(mut self, authority: Option<Pubkey>) -> Self {
        self.freeze_authority = authority;
        self
    }

    pub fn with_token_program(mut self, token_program: TokenProgram) -> Self {
        self.token_program = token_program;
        self
    }

    pub fn mint(&self) -> &Pubkey {
        &self.mint
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn mint_authority(&self) -> &Pubkey {
        &self.mint_authority
    }

    pub fn freeze_authority(&self) -> Option<&Pubkey> {
        self.freeze_authority.as_ref()
    }

    fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(3 + 2 * PUBKEY_BYTES);
        data.push(INITIALIZE_MINT2_TAG);
        data.push(self.decimals);
        data.extend_from_slice(self.mint_authority.as_ref());
        match &self.freeze_authority {
            Some(key) => {
                data.push(1);
                data.extend_from_slice(key.as_ref());
            }
            None => data.push(0),
        }
        data
    }
}

impl BuildInstruction for InitializeMint2 {
    const NAME: &'static str = "InitializeMint2";
    const ACCOUNT_NAMES: &'static [&'static str] = &["mint"];

    fn validate(&self) -> Result<(), TokenError> {
        require_account(&self.mint, "Mint")?;
        require_account(&self.mint_authority, "MintAuthority")?;
        if let Some(freeze) = &self.freeze_authority {
            require_account(freeze, "FreezeAuthority")?;
        }
        Ok(())
    }

    fn build(&self) -> Instruction {
        Instruction {
            program_id: self.token_program.id(),
            accounts: vec![AccountMeta::new(self.mint, false)],
            data: self.encode(),
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("decimals", self.decimals.to_string()),
            ("mintAuthority", self.mint_authority.to_string()),
            (
                "freezeAuthority",
                self.freeze_authority
                    .map_or_else(|| "none".to_string(), |k| k.to_string()),
            ),
        ]
    }
}

/// One-call `InitializeMint2` on Token-2022.
pub fn initialize_mint2(
    mint: Pubkey,
    mint_authority: Pubkey,
    freeze_authority: Option<Pubkey>,
    decimals: u8,
) -> InitializeMint2 {
    InitializeMint2::new()
        .with_mint(mint)
        .with_mint_authority(mint_authority)
        .with_freeze_authority(freeze_authority)
        .with_decimals(decimals)
}

/// Allocate and initialize a Token-2022 mint.
///
/// Returns `[CreateAccount, InitializeMint2]` in execution order. The new
/// account is funded with the rent-exempt minimum for [`MINT_SIZE`] bytes and
/// both `payer` and `mint` must sign the transaction.
pub fn create_mint(
    payer: Pubkey,
    mint: Pubkey,
    mint_authority: Pubkey,
    freeze_authority: Option<Pubkey>,
    decimals: u8,
) -> Result<[Instruction; 2], TokenError> {
    let init = initialize_mint2(mint, mint_authority, freeze_authority, decimals);
    let allocate = CreateAccount::new()
        .with_funder(payer)
        .with_new_account(mint)
        .with_lamports(minimum_balance_for_rent_exemption(MINT_SIZE))
        .with_space(MINT_SIZE as u64)
        .with_owner(init.token_program.id());

    Ok([allocate.validate_and_build()?, init.validate_and_build()?])
}
