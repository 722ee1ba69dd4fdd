use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Content address of a cached result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey(pub [u8; 32]);

impl CacheKey {
    pub fn builder() -> CacheKeyBuilder {
        CacheKeyBuilder {
            hasher: Sha256::new(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Hashes key material field by field. Each field is length-prefixed so
/// that `("ab", "c")` and `("a", "bc")` produce different keys.
pub struct CacheKeyBuilder {
    hasher: Sha256,
}

impl CacheKeyBuilder {
    pub fn text(mut self, value: &str) -> Self {
        self.hasher.update((value.len() as u64).to_le_bytes());
        self.hasher.update(value.as_bytes());
        self
    }

    pub fn bytes(mut self, value: &[u8]) -> Self {
        self.hasher.update((value.len() as u64).to_le_bytes());
        self.hasher.update(value);
        self
    }

    pub fn number(mut self, value: u64) -> Self {
        self.hasher.update(value.to_le_bytes());
        self
    }

    pub fn finish(self) -> CacheKey {
        CacheKey(self.hasher.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_not_concatenated() {
        let a = CacheKey::builder().text("ab").text("c").finish();
        let b = CacheKey::builder().text("a").text("bc").finish();
        assert_ne!(a, b);
    }

    #[test]
    fn same_material_same_key() {
        let build = || CacheKey::builder().text("x^2").number(7).finish();
        assert_eq!(build(), build());
        assert_eq!(build().to_string().len(), 16);
    }
}
