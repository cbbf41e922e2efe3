//! Solana public keys.
//!
//! A Solana address is the Base58 encoding of a raw 32-byte key. There is no
//! hashing step: the key bytes ARE the address bytes. Program-derived
//! addresses are also 32 bytes but deliberately fall off the Ed25519 curve.

use std::fmt;
use std::str::FromStr;

use curve25519_dalek::edwards::CompressedEdwardsY;

use crate::error::TokenError;

/// Length in bytes of a public key.
pub const PUBKEY_BYTES: usize = 32;

/// A 32-byte Solana account address.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pubkey([u8; PUBKEY_BYTES]);

impl Pubkey {
    pub const fn new_from_array(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(self) -> [u8; PUBKEY_BYTES] {
        self.0
    }

    pub fn as_array(&self) -> &[u8; PUBKEY_BYTES] {
        &self.0
    }

    /// Returns `true` for the all-zero key, which the builders treat as unset.
    ///
    /// Note that this is also the System Program id; builders never accept it
    /// for a caller-supplied account slot.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; PUBKEY_BYTES]
    }

    /// Check whether the bytes decompress to a valid Ed25519 point.
    pub fn is_on_curve(&self) -> bool {
        CompressedEdwardsY(self.0).decompress().is_some()
    }

    /// Decode a Base58 address.
    pub fn from_base58(address: &str) -> Result<Self, TokenError> {
        let bytes = bs58::decode(address)
            .into_vec()
            .map_err(|e| TokenError::InvalidAddress(format!("base58 decode failed: {e}")))?;

        let arr: [u8; PUBKEY_BYTES] = bytes.try_into().map_err(|v: Vec<u8>| {
            TokenError::InvalidAddress(format!("expected 32 bytes, got {}", v.len()))
        })?;

        Ok(Self(arr))
    }
}

impl FromStr for Pubkey {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl TryFrom<&[u8]> for Pubkey {
    type Error = TokenError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; PUBKEY_BYTES]>::try_from(bytes)
            .map(Self)
            .map_err(|_| {
                TokenError::InvalidAddress(format!("expected 32 bytes, got {}", bytes.len()))
            })
    }
}

impl From<[u8; PUBKEY_BYTES]> for Pubkey {
    fn from(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_key_is_system_program_address() {
        let zero = Pubkey::default();
        assert!(zero.is_zero());
        assert_eq!(zero.to_string(), "11111111111111111111111111111111");
    }

    #[test]
    fn parse_and_display_agree() {
        let address = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";
        let key: Pubkey = address.parse().unwrap();
        assert_eq!(key.to_string(), address);
        assert!(!key.is_zero());
    }

    #[test]
    fn parse_garbage_fails() {
        let result = "not-a-valid-address!!!".parse::<Pubkey>();
        assert!(matches!(result, Err(TokenError::InvalidAddress(_))));
    }

    #[test]
    fn parse_short_address_fails() {
        // "1" decodes to a single zero byte.
        let err = Pubkey::from_base58("1").unwrap_err();
        assert_eq!(
            err,
            TokenError::InvalidAddress("expected 32 bytes, got 1".into())
        );
    }

    #[test]
    fn try_from_slice_checks_length() {
        assert!(Pubkey::try_from(&[7u8; 32][..]).is_ok());
        assert!(Pubkey::try_from(&[7u8; 31][..]).is_err());
    }

    #[test]
    fn basepoint_is_on_curve() {
        let mut basepoint = [0x66u8; 32];
        basepoint[0] = 0x58;
        assert!(Pubkey::new_from_array(basepoint).is_on_curve());
    }

    #[test]
    fn arbitrary_bytes_can_be_off_curve() {
        assert!(!Pubkey::new_from_array([0x02; 32]).is_on_curve());
    }

    #[test]
    fn debug_includes_base58() {
        let key = Pubkey::new_from_array([0u8; 32]);
        assert_eq!(format!("{key:?}"), "Pubkey(11111111111111111111111111111111)");
    }
}
