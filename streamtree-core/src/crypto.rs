//! Hashing primitives for streamtree.
//!
//! Every digest in the tree is a 32-byte BLAKE3 output:
//! - leaves hash their raw value bytes,
//! - internal nodes hash the concatenation of their children's raw digests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Length of a digest in bytes.
pub const HASH_LEN: usize = 32;

/// A 32-byte digest.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hash([u8; HASH_LEN]);

impl Hash {
    /// The all-zero digest.
    pub const ZERO: Self = Self([0u8; HASH_LEN]);

    /// Create a hash from raw bytes.
    pub fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Create from hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        if bytes.len() != HASH_LEN {
            return Err(Error::invalid_hash(format!(
                "expected {} bytes, got {}",
                HASH_LEN,
                bytes.len()
            )));
        }
        let mut arr = [0u8; HASH_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Check if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<blake3::Hash> for Hash {
    fn from(h: blake3::Hash) -> Self {
        Self(*h.as_bytes())
    }
}

/// Hash arbitrary data.
pub fn hash(data: &[u8]) -> Hash {
    blake3::hash(data).into()
}

/// Hash two child digests to produce a parent digest.
///
/// The input is `left || right` over the raw digest bytes, so the order of
/// the arguments matters.
pub fn hash_pair(left: Hash, right: Hash) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    hasher.finalize().into()
}
