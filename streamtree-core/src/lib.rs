//! streamtree core - fundamental types for the streaming merkle tree.
//!
//! - [`crypto`] - BLAKE3 digests for leaves and internal nodes
//! - [`error`] - Structured errors with numeric codes
//! - [`proof`] - Inclusion proof paths
//!
//! # Example
//!
//! ```rust
//! use streamtree_core::{hash, hash_pair};
//!
//! let left = hash(b"1 transaction");
//! let right = hash(b"2 transaction");
//! let parent = hash_pair(left, right);
//!
//! assert_ne!(parent, hash_pair(right, left));
//! ```

pub mod crypto;
pub mod error;
pub mod proof;


pub use crypto::{hash, hash_pair, Hash, HASH_LEN};
pub use error::{Error, ErrorCode, Result};
pub use proof::{InclusionProof, Position, ProofNode};
