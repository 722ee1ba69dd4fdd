use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Stable digest of the parts of a session's memory that can change output.
///
/// SHA-256 keeps the value stable across toolchains so it can live inside
/// persisted cache keys; only the first eight bytes are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    pub fn to_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Incremental builder with unambiguous field separators.
pub(crate) struct FingerprintBuilder {
    hasher: Sha256,
}

impl FingerprintBuilder {
    pub(crate) fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    pub(crate) fn field(&mut self, value: &str) -> &mut Self {
        self.hasher.update((value.len() as u64).to_le_bytes());
        self.hasher.update(value.as_bytes());
        self
    }

    pub(crate) fn section(&mut self, tag: u8) -> &mut Self {
        self.hasher.update([0xff, tag]);
        self
    }

    pub(crate) fn finish(self) -> Fingerprint {
        let digest = self.hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        Fingerprint(u64::from_be_bytes(head))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_prefix_prevents_concatenation_collisions() {
        let mut a = FingerprintBuilder::new();
        a.field("ab").field("c");
        let mut b = FingerprintBuilder::new();
        b.field("a").field("bc");
        assert_ne!(a.finish(), b.finish());
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(Fingerprint(255).to_string(), "00000000000000ff");
    }
}
