//! Client-side Token-2022 instruction builders for Solana.
//!
//! This crate builds `CloseAccount`, associated-token-account `Create` and
//! mint-creation instructions and derives associated token addresses. Like
//! the rest of the workspace it avoids `solana-sdk`: keys, PDAs and the
//! message wire format are implemented directly on top of `sha2`,
//! `curve25519-dalek` and `bs58`.
//!
//! Each builder implements [`BuildInstruction`]:
//!
//! - `validate()` checks required accounts and signer bounds,
//! - `build()` produces the generic [`Instruction`] envelope,
//! - `validate_and_build()` does both.

pub mod associated;
pub mod close;
pub mod error;
pub mod instruction;
pub mod message;
pub mod mint;
pub mod pda;
pub mod program;
pub mod pubkey;
pub mod system;
mod tree;

// Re-export key public types for ergonomic imports.
pub use associated::{
    create_associated_token_account, create_associated_token_account_idempotent,
    CreateAssociatedTokenAccount,
};
pub use close::{close_account, CloseAccount};
pub use error::TokenError;
pub use instruction::{AccountMeta, BuildInstruction, Instruction, MAX_SIGNERS};
pub use message::{compile_message, encode_compact_u16, CompiledInstruction, Message};
pub use mint::{create_mint, initialize_mint2, InitializeMint2, MINT_SIZE};
pub use pda::{
    create_program_address, find_associated_token_address,
    find_associated_token_address_with_program_id, find_program_address,
};
pub use program::{
    TokenProgram, ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID, SYSVAR_RENT_ID,
    TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
pub use pubkey::Pubkey;
pub use system::{minimum_balance_for_rent_exemption, CreateAccount};
