//! Hashing primitive behind content-addressed identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte Blake3 hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Blake3Hash(pub [u8; 32]);

impl Blake3Hash {
    /// Compute the Blake3 hash of the given data.
    pub fn hash(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Compute Blake3(domain || data).
    ///
    /// The domain prefix keeps ids of different record types disjoint even if
    /// their canonical encodings coincide.
    pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(domain);
        hasher.update(data);
        Self(*hasher.finalize().as_bytes())
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Blake3Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blake3({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Blake3Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake3_hash() {
        let h1 = Blake3Hash::hash(b"test data");
        let h2 = Blake3Hash::hash(b"test data");
        assert_eq!(h1, h2);
        assert_ne!(h1, Blake3Hash::hash(b"different data"));
    }

    #[test]
    fn test_domain_separates() {
        let plain = Blake3Hash::hash(b"payload");
        let a = Blake3Hash::hash_with_domain(b"domain-a", b"payload");
        let b = Blake3Hash::hash_with_domain(b"domain-b", b"payload");
        assert_ne!(a, b);
        assert_ne!(a, plain);
    }

    #[test]
    fn test_domain_is_prefix() {
        let joined = Blake3Hash::hash(b"domain-apayload");
        let split = Blake3Hash::hash_with_domain(b"domain-a", b"payload");
        assert_eq!(joined, split);
    }
}
