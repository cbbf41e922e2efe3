//! System Program `CreateAccount` and rent-exemption sizing.
//!
//! Allocating a mint is a System Program call that funds a fresh keypair
//! account, sizes it, and hands ownership to the token program.

use crate::error::TokenError;
use crate::instruction::{require_account, AccountMeta, BuildInstruction, Instruction};
use crate::program::SYSTEM_PROGRAM_ID;
use crate::pubkey::Pubkey;

/// System Program `CreateAccount` instruction index (little-endian u32).
const SYSTEM_CREATE_ACCOUNT_IX_INDEX: u32 = 0;

/// Bytes of per-account metadata charged on top of the data length.
pub const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;

/// Default cluster rent rate.
pub const DEFAULT_LAMPORTS_PER_BYTE_YEAR: u64 = 3_480;

/// Years of rent an account must hold to be exempt.
pub const DEFAULT_EXEMPTION_THRESHOLD_YEARS: u64 = 2;

/// Minimum balance for an account of `data_len` bytes to be rent exempt under
/// the default cluster rent parameters. Saturates at `u64::MAX`.
pub fn minimum_balance_for_rent_exemption(data_len: usize) -> u64 {
    let data_len = u64::try_from(data_len).unwrap_or(u64::MAX);
    ACCOUNT_STORAGE_OVERHEAD
        .saturating_add(data_len)
        .saturating_mul(DEFAULT_LAMPORTS_PER_BYTE_YEAR)
        .saturating_mul(DEFAULT_EXEMPTION_THRESHOLD_YEARS)
}

/// Builder for `SystemInstruction::CreateAccount`.
///
/// Both the funder and the new account must sign.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateAccount {
    funder: Pubkey,
    new_account: Pubkey,
    lamports: u64,
    space: u64,
    owner: Pubkey,
}

impl CreateAccount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_funder(mut self, funder: Pubkey) -> Self {
        self.funder = funder;
        self
    }

    pub fn with_new_account(mut self, new_account: Pubkey) -> Self {
        self.new_account = new_account;
        self
    }

    pub fn with_lamports(mut self, lamports: u64) -> Self {
        self.lamports = lamports;
        self
    }

    pub fn with_space(mut self, space: u64) -> Self {
        self.space = space;
        self
    }

    /// Program that will own the new account.
    pub fn with_owner(mut self, owner: Pubkey) -> Self {
        self.owner = owner;
        self
    }

    pub fn lamports(&self) -> u64 {
        self.lamports
    }

    pub fn space(&self) -> u64 {
        self.space
    }
}

impl BuildInstruction for CreateAccount {
    const NAME: &'static str = "CreateAccount";
    const ACCOUNT_NAMES: &'static [&'static str] = &["funder", "newAccount"];

    fn validate(&self) -> Result<(), TokenError> {
        require_account(&self.funder, "Funder")?;
        require_account(&self.new_account, "NewAccount")
    }

    fn build(&self) -> Instruction {
        // u32 LE index + u64 LE lamports + u64 LE space + owner = 52 bytes.
        let mut data = Vec::with_capacity(52);
        data.extend_from_slice(&SYSTEM_CREATE_ACCOUNT_IX_INDEX.to_le_bytes());
        data.extend_from_slice(&self.lamports.to_le_bytes());
        data.extend_from_slice(&self.space.to_le_bytes());
        data.extend_from_slice(self.owner.as_ref());

        Instruction {
            program_id: SYSTEM_PROGRAM_ID,
            accounts: vec![
                AccountMeta::new(self.funder, true),
                AccountMeta::new(self.new_account, true),
            ],
            data,
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("lamports", self.lamports.to_string()),
            ("space", self.space.to_string()),
            ("owner", self.owner.to_string()),
        ]
    }
}
