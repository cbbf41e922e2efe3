//! Generic instruction envelope and the builder contract.
//!
//! Every builder in this crate fills an [`Instruction`]: a program id, an
//! ordered account list with signer/writable flags, and an opaque data
//! payload. Accounts never appear inside the payload.

use log::debug;

use crate::error::TokenError;
use crate::pubkey::Pubkey;
use crate::tree;

/// Maximum number of multisig signer accounts a token instruction accepts.
pub const MAX_SIGNERS: usize = 11;

/// A single account reference in an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable account.
    pub fn new(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    /// A read-only account.
    pub fn new_readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// An instruction ready to be placed in a transaction message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Pubkey,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

/// Shared operations of the typed instruction builders.
pub trait BuildInstruction {
    /// Instruction name as shown by [`BuildInstruction::render_tree`].
    const NAME: &'static str;

    /// Labels for the fixed account slots, in order. Accounts past the end of
    /// this list are rendered as multisig signers.
    const ACCOUNT_NAMES: &'static [&'static str];

    /// Check that every required account is set and the signer count is in
    /// bounds.
    fn validate(&self) -> Result<(), TokenError>;

    /// Encode into the generic envelope without validating.
    fn build(&self) -> Instruction;

    /// Named parameters for the tree dump.
    fn params(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn validate_and_build(&self) -> Result<Instruction, TokenError> {
        if let Err(err) = self.validate() {
            debug!("{} failed validation: {err}", Self::NAME);
            return Err(err);
        }
        Ok(self.build())
    }

    /// Human-readable dump of the built instruction.
    fn render_tree(&self) -> String {
        tree::render_instruction(
            Self::NAME,
            &self.build(),
            &self.params(),
            Self::ACCOUNT_NAMES,
        )
    }
}

/// Fail with `MissingAccount(name)` when `key` is unset.
pub(crate) fn require_account(key: &Pubkey, name: &'static str) -> Result<(), TokenError> {
    if key.is_zero() {
        return Err(TokenError::MissingAccount(name));
    }
    Ok(())
}

/// Owner/multisig rule shared by the token instructions.
///
/// With no multisig signers the owner itself must sign; otherwise 1..=11
/// signers are accepted.
pub(crate) fn check_signers(owner_is_signer: bool, signers: &[Pubkey]) -> Result<(), TokenError> {
    if !owner_is_signer && signers.is_empty() {
        return Err(TokenError::MissingSigners);
    }
    if signers.len() > MAX_SIGNERS {
        return Err(TokenError::TooManySigners {
            got: signers.len(),
            max: MAX_SIGNERS,
        });
    }
    if signers.iter().any(Pubkey::is_zero) {
        return Err(TokenError::MissingAccount("Signers"));
    }
    Ok(())
}
