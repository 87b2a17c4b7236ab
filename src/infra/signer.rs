//! Default signing delegate: recoverable secp256k1 ECDSA over the SHA-256
//! digest of the raw transaction, TRON-style.

use secp256k1::{Message, Secp256k1, SecretKey, SignOnly};
use sha2::{Digest, Sha256};

use crate::domain::{
    account::PrivateKeySecret,
    coordinator::{SignedTransaction, TransactionSigner, UnsignedTransaction},
    error::SystemError,
};

pub struct Secp256k1Signer {
    secp: Secp256k1<SignOnly>,
}

impl Secp256k1Signer {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::signing_only(),
        }
    }
}

impl Default for Secp256k1Signer {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionSigner for Secp256k1Signer {
    fn sign(
        &self,
        key: &PrivateKeySecret,
        unsigned: &UnsignedTransaction,
    ) -> Result<SignedTransaction, SystemError> {
        let raw = hex::decode(unsigned.raw.trim_start_matches("0x"))
            .map_err(|e| SystemError::SigningFailed(format!("invalid raw transaction: {e}")))?;

        let digest: [u8; 32] = Sha256::digest(&raw).into();
        let message = Message::from_digest(digest);

        let secret = SecretKey::from_slice(key.expose())
            .map_err(|e| SystemError::SigningFailed(format!("invalid private key: {e}")))?;

        let signature = self.secp.sign_ecdsa_recoverable(&message, &secret);
        let (recovery_id, signature_bytes) = signature.serialize_compact();

        // 65-byte signature: r || s || recovery_id
        let mut signature = signature_bytes.to_vec();
        signature.push(recovery_id.to_i32() as u8);

        Ok(SignedTransaction {
            raw: unsigned.raw.clone(),
            signature: hex::encode(signature),
        })
    }
}
