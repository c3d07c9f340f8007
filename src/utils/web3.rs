use alloy::primitives::B256;
use sha2::{Digest, Sha256};

use crate::clients::beacon::types::KzgCommitment;

const BLOB_COMMITMENT_VERSION_KZG: u8 = 0x01;

pub fn sha256(value: &[u8]) -> B256 {
    let mut hasher = Sha256::new();

    hasher.update(value);

    B256::from_slice(&hasher.finalize())
}

/// Computes the EIP-4844 versioned hash of a blob's KZG commitment.
pub fn calculate_versioned_hash(commitment: &KzgCommitment) -> B256 {
    let mut versioned_hash = sha256(commitment.as_slice());

    // Replace first byte with the blob commitment version byte
    versioned_hash.0[0] = BLOB_COMMITMENT_VERSION_KZG;

    versioned_hash
}
