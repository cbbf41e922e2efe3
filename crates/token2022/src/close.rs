//! Token-2022 `CloseAccount`.
//!
//! Closes a token account and moves all of its lamports to the destination.
//! Non-native accounts may only be closed once their token balance is zero.
//!
//! ```text
//! [0]    [W]  account       the account to close
//! [1]    [W]  destination   receives the lamports
//! [2]    [S?] owner         signer unless owned by a multisig
//! [3]    []   tokenProgram  token program id
//! [4..]  [S]  signers       multisig signers, up to 11
//! ```

use crate::error::TokenError;
use crate::instruction::{
    check_signers, require_account, AccountMeta, BuildInstruction, Instruction,
};
use crate::program::TokenProgram;
use crate::pubkey::Pubkey;

/// `TokenInstruction::CloseAccount` discriminator.
const CLOSE_ACCOUNT_TAG: u8 = 9;

/// Builder for the `CloseAccount` instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloseAccount {
    account: Pubkey,
    destination: Pubkey,
    owner: Pubkey,
    owner_is_signer: bool,
    signers: Vec<Pubkey>,
    token_program: TokenProgram,
}

impl CloseAccount {
    pub fn new() -> Self {
        Self::default()
    }

    /// The account to close.
    pub fn with_account(mut self, account: Pubkey) -> Self {
        self.account = account;
        self
    }

    /// Where the reclaimed lamports go.
    pub fn with_destination(mut self, destination: Pubkey) -> Self {
        self.destination = destination;
        self
    }

    /// A single-key owner that signs the instruction itself.
    pub fn with_owner(mut self, owner: Pubkey) -> Self {
        self.owner = owner;
        self.owner_is_signer = true;
        self.signers.clear();
        self
    }

    /// A multisig owner; `signers` are the member keys signing this time.
    pub fn with_multisig_owner(mut self, owner: Pubkey, signers: &[Pubkey]) -> Self {
        self.owner = owner;
        self.owner_is_signer = false;
        self.signers = signers.to_vec();
        self
    }

    pub fn with_token_program(mut self, token_program: TokenProgram) -> Self {
        self.token_program = token_program;
        self
    }

    pub fn account(&self) -> &Pubkey {
        &self.account
    }

    pub fn destination(&self) -> &Pubkey {
        &self.destination
    }

    pub fn owner(&self) -> &Pubkey {
        &self.owner
    }

    pub fn signers(&self) -> &[Pubkey] {
        &self.signers
    }

    /// Rebuild a builder from an account list laid out as `build()` writes it.
    ///
    /// The list splits at slot 4: the first four are the fixed accounts, the
    /// rest are multisig signers. The token program comes from slot 3.
    pub fn from_accounts(accounts: &[AccountMeta]) -> Result<Self, TokenError> {
        if accounts.len() < Self::ACCOUNT_NAMES.len() {
            return Err(TokenError::InvalidInstruction(format!(
                "expected at least {} accounts, got {}",
                Self::ACCOUNT_NAMES.len(),
                accounts.len()
            )));
        }
        let (fixed, signers) = accounts.split_at(Self::ACCOUNT_NAMES.len());

        let token_program = TokenProgram::from_id(&fixed[3].pubkey).ok_or_else(|| {
            TokenError::InvalidInstruction(format!(
                "{} is not a token program",
                fixed[3].pubkey
            ))
        })?;

        Ok(Self {
            account: fixed[0].pubkey,
            destination: fixed[1].pubkey,
            owner: fixed[2].pubkey,
            owner_is_signer: fixed[2].is_signer,
            signers: signers.iter().map(|meta| meta.pubkey).collect(),
            token_program,
        })
    }
}

impl TryFrom<&Instruction> for CloseAccount {
    type Error = TokenError;

    fn try_from(ix: &Instruction) -> Result<Self, Self::Error> {
        if ix.data != [CLOSE_ACCOUNT_TAG] {
            return Err(TokenError::InvalidInstruction(format!(
                "expected data [{CLOSE_ACCOUNT_TAG}], got {:?}",
                ix.data
            )));
        }

        let builder = Self::from_accounts(&ix.accounts)?;
        if builder.token_program.id() != ix.program_id {
            return Err(TokenError::InvalidInstruction(format!(
                "program {} does not match token program account {}",
                ix.program_id,
                builder.token_program.id()
            )));
        }
        Ok(builder)
    }
}

impl BuildInstruction for CloseAccount {
    const NAME: &'static str = "CloseAccount";
    const ACCOUNT_NAMES: &'static [&'static str] =
        &["account", "destination", "owner", "tokenProgram"];

    fn validate(&self) -> Result<(), TokenError> {
        require_account(&self.account, "Account")?;
        require_account(&self.destination, "Destination")?;
        require_account(&self.owner, "Owner")?;
        check_signers(self.owner_is_signer, &self.signers)
    }

    fn build(&self) -> Instruction {
        let program_id = self.token_program.id();

        let mut accounts = Vec::with_capacity(4 + self.signers.len());
        accounts.push(AccountMeta::new(self.account, false));
        accounts.push(AccountMeta::new(self.destination, false));
        accounts.push(AccountMeta::new_readonly(self.owner, self.owner_is_signer));
        accounts.push(AccountMeta::new_readonly(program_id, false));
        accounts.extend(
            self.signers
                .iter()
                .map(|signer| AccountMeta::new_readonly(*signer, true)),
        );

        Instruction {
            program_id,
            accounts,
            data: vec![CLOSE_ACCOUNT_TAG],
        }
    }
}

/// One-call `CloseAccount` on Token-2022.
///
/// An empty `multisig_signers` means `owner` signs directly.
pub fn close_account(
    account: Pubkey,
    destination: Pubkey,
    owner: Pubkey,
    multisig_signers: &[Pubkey],
) -> CloseAccount {
    let builder = CloseAccount::new()
        .with_account(account)
        .with_destination(destination);

    if multisig_signers.is_empty() {
        builder.with_owner(owner)
    } else {
        builder.with_multisig_owner(owner, multisig_signers)
    }
}
