use crate::error::{PriceClientError, Result};

/// Size of a Solana public key in bytes
pub const PUBKEY_BYTES: usize = 32;

/// Longest base58 encoding of a 32-byte key
const MAX_BASE58_LEN: usize = 44;

/// True when `input` is a base58-encoded 32-byte Solana public key.
pub fn is_valid_address(input: &str) -> bool {
    if input.is_empty() || input.len() > MAX_BASE58_LEN {
        return false;
    }

    let mut decoded = [0u8; PUBKEY_BYTES];
    matches!(
        bs58::decode(input).onto(&mut decoded[..]),
        Ok(PUBKEY_BYTES)
    )
}

/// Guard used by the clients before any network call.
pub fn validate_address(input: &str) -> Result<()> {
    if is_valid_address(input) {
        Ok(())
    } else {
        Err(PriceClientError::invalid_address(input))
    }
}
