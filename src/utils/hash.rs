//! Content hashing using FxHash.
//!
//! Used to detect whether a config file actually changed before reloading
//! it. Fast and deterministic; not collision resistant.
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let h = hash::compute("content = []"); // -> u64
//! ```

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Compute 64-bit hash from byte data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}
