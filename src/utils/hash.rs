//! Content hashing using FxHash.
//!
//! Used for response fingerprints (`ETag`), where speed matters and
//! cryptographic strength does not.
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let h = hash::compute("<urlset/>"); // -> u64
//! let fp = hash::fingerprint("<urlset/>"); // -> "a1b2c3d4e5f60718"
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

/// Compute hash and return it as a 16-char hex fingerprint.
#[inline]
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(value: &T) -> String {
    format!("{:016x}", compute(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_deterministic() {
        assert_eq!(compute("sitemap"), compute("sitemap"));
        assert_ne!(compute("sitemap-en"), compute("sitemap-es"));
    }

    #[test]
    fn test_fingerprint_format() {
        let fp = fingerprint(b"<urlset/>".as_slice());
        assert_eq!(fp.len(), 16);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
