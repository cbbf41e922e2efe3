//! Legacy transaction message compilation.
//!
//! The message is the part of a transaction that signers sign and RPC nodes
//! execute. Signing itself is left to the caller.
//!
//! ```text
//! Message:
//!   num_required_sigs     u8
//!   num_readonly_signed   u8
//!   num_readonly_unsigned u8
//!   num_accounts          compact-u16
//!   account_keys          32 bytes * num_accounts
//!   recent_blockhash      32 bytes
//!   num_instructions      compact-u16
//!   instructions[]        (see below)
//!
//! Instruction:
//!   program_id_index      u8
//!   num_accounts          compact-u16
//!   account_indices       u8 * num_accounts
//!   data_len              compact-u16
//!   data                  u8 * data_len
//! ```

use log::debug;

use crate::error::TokenError;
use crate::instruction::Instruction;
use crate::pubkey::Pubkey;

/// Encode a `u16` value in Solana's compact-u16 format.
///
/// - Values 0..0x7f       -> 1 byte
/// - Values 0x80..0x3fff  -> 2 bytes
/// - Values 0x4000..      -> 3 bytes
pub fn encode_compact_u16(value: u16) -> Vec<u8> {
    let mut val = value as u32;
    let mut out = Vec::with_capacity(3);

    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if val == 0 {
            break;
        }
    }

    out
}

fn compact_len(len: usize, what: &str) -> Result<Vec<u8>, TokenError> {
    u16::try_from(len)
        .map(encode_compact_u16)
        .map_err(|_| {
            TokenError::SerializationError(format!("{what} length {len} overflows compact-u16"))
        })
}

/// An instruction whose accounts are indices into the message key list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub account_indices: Vec<u8>,
    pub data: Vec<u8>,
}

/// An unsigned legacy message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Keys in canonical order:
    ///   1. writable signers (fee payer first)
    ///   2. read-only signers
    ///   3. writable non-signers
    ///   4. read-only non-signers
    pub account_keys: Vec<Pubkey>,
    pub num_required_signatures: u8,
    pub num_readonly_signed: u8,
    pub num_readonly_unsigned: u8,
    pub recent_blockhash: [u8; 32],
    pub instructions: Vec<CompiledInstruction>,
}

struct AccountEntry {
    pubkey: Pubkey,
    is_signer: bool,
    is_writable: bool,
}

impl AccountEntry {
    fn rank(&self) -> u8 {
        match (self.is_signer, self.is_writable) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        }
    }
}

/// Compile instructions into a message paid for by `fee_payer`.
pub fn compile_message(
    instructions: &[Instruction],
    fee_payer: &Pubkey,
    recent_blockhash: &[u8; 32],
) -> Result<Message, TokenError> {
    // Instruction account lists are tiny; a linear scan beats a map here.
    let mut entries: Vec<AccountEntry> = Vec::new();

    let mut upsert = |pubkey: Pubkey, signer: bool, writable: bool| {
        if let Some(entry) = entries.iter_mut().find(|e| e.pubkey == pubkey) {
            entry.is_signer |= signer;
            entry.is_writable |= writable;
        } else {
            entries.push(AccountEntry {
                pubkey,
                is_signer: signer,
                is_writable: writable,
            });
        }
    };

    upsert(*fee_payer, true, true);
    for ix in instructions {
        for meta in &ix.accounts {
            upsert(meta.pubkey, meta.is_signer, meta.is_writable);
        }
        upsert(ix.program_id, false, false);
    }

    // Stable sort keeps insertion order inside each class, so the fee payer
    // stays at index 0.
    entries.sort_by_key(AccountEntry::rank);

    if entries.len() > usize::from(u8::MAX) + 1 {
        return Err(TokenError::SerializationError(format!(
            "{} accounts exceed the 256 addressable by u8 indices",
            entries.len()
        )));
    }

    let count = |pred: fn(&AccountEntry) -> bool, what: &str| -> Result<u8, TokenError> {
        let n = entries.iter().filter(|e| pred(e)).count();
        u8::try_from(n).map_err(|_| {
            TokenError::SerializationError(format!("{n} {what} overflow the u8 header"))
        })
    };
    let num_required_signatures = count(|e| e.is_signer, "signers")?;
    let num_readonly_signed = count(|e| e.is_signer && !e.is_writable, "read-only signers")?;
    let num_readonly_unsigned =
        count(|e| !e.is_signer && !e.is_writable, "read-only non-signers")?;

    let account_keys: Vec<Pubkey> = entries.iter().map(|e| e.pubkey).collect();

    let index_of = |key: &Pubkey| -> Result<u8, TokenError> {
        account_keys
            .iter()
            .position(|k| k == key)
            .map(|i| i as u8)
            .ok_or_else(|| {
                TokenError::SerializationError(format!("{key} missing from account keys"))
            })
    };

    let mut compiled = Vec::with_capacity(instructions.len());
    for ix in instructions {
        let program_id_index = index_of(&ix.program_id)?;
        let account_indices = ix
            .accounts
            .iter()
            .map(|meta| index_of(&meta.pubkey))
            .collect::<Result<Vec<_>, _>>()?;

        compiled.push(CompiledInstruction {
            program_id_index,
            account_indices,
            data: ix.data.clone(),
        });
    }

    debug!(
        "compiled {} instructions over {} accounts ({} signers)",
        compiled.len(),
        account_keys.len(),
        num_required_signatures
    );

    Ok(Message {
        account_keys,
        num_required_signatures,
        num_readonly_signed,
        num_readonly_unsigned,
        recent_blockhash: *recent_blockhash,
        instructions: compiled,
    })
}

impl Message {
    /// Serialize to the legacy wire format (the bytes that get signed).
    pub fn serialize(&self) -> Result<Vec<u8>, TokenError> {
        let mut buf = Vec::with_capacity(256);

        buf.push(self.num_required_signatures);
        buf.push(self.num_readonly_signed);
        buf.push(self.num_readonly_unsigned);

        buf.extend_from_slice(&compact_len(self.account_keys.len(), "account keys")?);
        for key in &self.account_keys {
            buf.extend_from_slice(key.as_ref());
        }

        buf.extend_from_slice(&self.recent_blockhash);

        buf.extend_from_slice(&compact_len(self.instructions.len(), "instructions")?);
        for ix in &self.instructions {
            buf.push(ix.program_id_index);

            buf.extend_from_slice(&compact_len(ix.account_indices.len(), "account indices")?);
            buf.extend_from_slice(&ix.account_indices);

            buf.extend_from_slice(&compact_len(ix.data.len(), "instruction data")?);
            buf.extend_from_slice(&ix.data);
        }

        Ok(buf)
    }
}
