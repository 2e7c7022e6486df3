use crate::StampError;
use sha2::{Digest, Sha256};

/// Hashing primitive behind a stamp
pub trait ContentHasher: Send + Sync {
    /// Label recorded next to the digest, e.g. `sha256`
    fn algorithm(&self) -> &'static str;

    /// Lowercase hex digest of `content`
    fn hash_hex(&self, content: &[u8]) -> Result<String, StampError>;
}

/// SHA-256 over the raw bytes, hex encoded
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl ContentHasher for Sha256Hasher {
    fn algorithm(&self) -> &'static str {
        "sha256"
    }

    fn hash_hex(&self, content: &[u8]) -> Result<String, StampError> {
        Ok(sha256_hex(content))
    }
}

pub fn sha256_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hasher_matches_free_function() {
        let html = "<table></table>".as_bytes();
        assert_eq!(Sha256Hasher.hash_hex(html).unwrap(), sha256_hex(html));
        assert_eq!(Sha256Hasher.algorithm(), "sha256");
    }
}
