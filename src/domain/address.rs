//! TRON address validation.
//!
//! Mainnet addresses are base58check encoded: version byte 0x41, a 20-byte
//! account id, and a 4-byte double-SHA256 checksum, 34 characters starting
//! with 'T'.

use sha2::{Digest, Sha256};

/// Version byte prefixed to every mainnet account id.
const ADDRESS_PREFIX: u8 = 0x41;

/// Decoded length: 1 (version) + 20 (account id) + 4 (checksum).
const DECODED_LEN: usize = 25;

/// Check that an address is a well-formed base58check TRON address.
pub fn is_address_valid(address: &str) -> bool {
    let Ok(bytes) = bs58::decode(address).into_vec() else {
        return false;
    };
    if bytes.len() != DECODED_LEN || bytes[0] != ADDRESS_PREFIX {
        return false;
    }

    let (payload, checksum) = bytes.split_at(DECODED_LEN - 4);
    let digest = Sha256::digest(Sha256::digest(payload));
    digest[..4] == checksum[..]
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known mainnet addresses.
    const BURN_ADDRESS: &str = "T9yD14Nj9j7xAB4dbGeiX9h8unkKHxuWwb";
    const USDT_CONTRACT: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";

    #[test]
    fn test_valid_addresses() {
        assert!(is_address_valid(BURN_ADDRESS));
        assert!(is_address_valid(USDT_CONTRACT));
    }

    #[test]
    fn test_corrupted_checksum() {
        // Flip the last character; the checksum no longer matches.
        let mut corrupted = BURN_ADDRESS.to_string();
        corrupted.pop();
        corrupted.push('c');
        assert!(!is_address_valid(&corrupted));
    }

    #[test]
    fn test_wrong_prefix() {
        // A bitcoin-style address decodes but carries the wrong version byte.
        assert!(!is_address_valid("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"));
    }

    #[test]
    fn test_garbage_input() {
        assert!(!is_address_valid(""));
        assert!(!is_address_valid("not an address"));
        assert!(!is_address_valid("T-other"));
        assert!(!is_address_valid("0x41aabbcc"));
    }
}
