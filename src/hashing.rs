//! Hashing System - SHA-256 Prompt Fingerprints
//!
//! Same fragments in, same fingerprint out.

use sha2::{Sha256, Digest};

use crate::document::{serialize, PromptDocument};
use crate::error::PromptError;

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Fingerprint of the compact serialization.
/// Key order is canonical, so it is stable across pretty/compact output.
pub fn fingerprint(document: &PromptDocument) -> Result<String, PromptError> {
    let compact = serialize(document, false)?;
    Ok(sha256_hex(compact.as_bytes()))
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::assemble;
    use serde_json::json;

    #[test]
    fn test_hash_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_fingerprint_ignores_slot_input_order() {
        let a = assemble(vec![
            ("mood".to_string(), json!("calm")),
            ("scene".to_string(), json!("Studio")),
        ]);
        let b = assemble(vec![
            ("scene".to_string(), json!("Studio")),
            ("mood".to_string(), json!("calm")),
        ]);
        assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
        assert_eq!(fingerprint(&a).unwrap().len(), 64);
    }
}
