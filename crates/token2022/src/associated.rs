//! Associated Token Account program `Create` / `CreateIdempotent`.
//!
//! ```text
//! [0] [WS] payer                  funds the new account
//! [1] [W]  associatedTokenAccount derived from (wallet, token program, mint)
//! [2] []   wallet
//! [3] []   mint
//! [4] []   systemProgram
//! [5] []   tokenProgram
//! [6] []   sysvarRent
//! ```
//!
//! `Create` carries an empty payload. `CreateIdempotent` carries `[1]` and
//! succeeds when the account already exists.

use crate::error::TokenError;
use crate::instruction::{require_account, AccountMeta, BuildInstruction, Instruction};
use crate::pda::find_associated_token_address_with_program_id;
use crate::program::{
    TokenProgram, ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID, SYSVAR_RENT_ID,
};
use crate::pubkey::Pubkey;

const CREATE_IDEMPOTENT_TAG: u8 = 1;

/// Builder for creating a wallet's associated token account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateAssociatedTokenAccount {
    payer: Pubkey,
    wallet: Pubkey,
    mint: Pubkey,
    associated_account: Pubkey,
    token_program: TokenProgram,
    idempotent: bool,
}

impl CreateAssociatedTokenAccount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payer(mut self, payer: Pubkey) -> Self {
        self.payer = payer;
        self
    }

    pub fn with_wallet(mut self, wallet: Pubkey) -> Self {
        self.wallet = wallet;
        self.refresh_associated_account();
        self
    }

    pub fn with_mint(mut self, mint: Pubkey) -> Self {
        self.mint = mint;
        self.refresh_associated_account();
        self
    }

    pub fn with_token_program(mut self, token_program: TokenProgram) -> Self {
        self.token_program = token_program;
        self.refresh_associated_account();
        self
    }

    /// Encode as `CreateIdempotent` instead of `Create`.
    pub fn idempotent(mut self, idempotent: bool) -> Self {
        self.idempotent = idempotent;
        self
    }

    pub fn payer(&self) -> &Pubkey {
        &self.payer
    }

    pub fn wallet(&self) -> &Pubkey {
        &self.wallet
    }

    pub fn mint(&self) -> &Pubkey {
        &self.mint
    }

    /// The derived account address; zero until both wallet and mint are set.
    pub fn associated_account(&self) -> &Pubkey {
        &self.associated_account
    }

    fn refresh_associated_account(&mut self) {
        self.associated_account = if self.wallet.is_zero() || self.mint.is_zero() {
            Pubkey::default()
        } else {
            find_associated_token_address_with_program_id(
                &self.wallet,
                &self.mint,
                &self.token_program.id(),
            )
            .map(|(address, _bump)| address)
            .unwrap_or_default()
        };
    }
}

impl BuildInstruction for CreateAssociatedTokenAccount {
    const NAME: &'static str = "Create";
    const ACCOUNT_NAMES: &'static [&'static str] = &[
        "payer",
        "associatedTokenAccount",
        "wallet",
        "mint",
        "systemProgram",
        "tokenProgram",
        "sysvarRent",
    ];

    fn validate(&self) -> Result<(), TokenError> {
        require_account(&self.payer, "Payer")?;
        require_account(&self.wallet, "Wallet")?;
        require_account(&self.mint, "Mint")?;
        require_account(&self.associated_account, "AssociatedTokenAccount")
    }

    fn build(&self) -> Instruction {
        let data = if self.idempotent {
            vec![CREATE_IDEMPOTENT_TAG]
        } else {
            Vec::new()
        };

        Instruction {
            program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
            accounts: vec![
                AccountMeta::new(self.payer, true),
                AccountMeta::new(self.associated_account, false),
                AccountMeta::new_readonly(self.wallet, false),
                AccountMeta::new_readonly(self.mint, false),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
                AccountMeta::new_readonly(self.token_program.id(), false),
                AccountMeta::new_readonly(SYSVAR_RENT_ID, false),
            ],
            data,
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![("idempotent", self.idempotent.to_string())]
    }
}

/// One-call `Create` for a Token-2022 associated token account.
pub fn create_associated_token_account(
    payer: Pubkey,
    wallet: Pubkey,
    mint: Pubkey,
) -> CreateAssociatedTokenAccount {
    CreateAssociatedTokenAccount::new()
        .with_payer(payer)
        .with_wallet(wallet)
        .with_mint(mint)
}

/// Same as [`create_associated_token_account`] but encoded as `CreateIdempotent`.
pub fn create_associated_token_account_idempotent(
    payer: Pubkey,
    wallet: Pubkey,
    mint: Pubkey,
) -> CreateAssociatedTokenAccount {
    create_associated_token_account(payer, wallet, mint).idempotent(true)
}
