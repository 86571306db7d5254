use crate::Sha256;
use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};

/// Returns whether `signature` is a valid ECDSA signature by the owner of
/// `public_key` over the given message bytes.
///
/// The message is hashed with SHA-256 before verification, and the signature
/// is expected in the 64-byte compact encoding. Any malformed signature is
/// reported as invalid rather than as an error.
pub fn verify_signature(public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
    let signature = match Signature::from_compact(signature) {
        Ok(signature) => signature,
        Err(_) => return false,
    };
    let message = Message::from_digest(Sha256::digest(message).to_raw());
    SECP256K1
        .verify_ecdsa(&message, &signature, public_key)
        .is_ok()
}

/// Signs the SHA-256 digest of the given message bytes and returns the
/// signature in the 64-byte compact encoding.
pub fn sign_message(secret_key: &SecretKey, message: &[u8]) -> Vec<u8> {
    let message = Message::from_digest(Sha256::digest(message).to_raw());
    SECP256K1
        .sign_ecdsa(&message, secret_key)
        .serialize_compact()
        .to_vec()
}
