//! `Sec-WebSocket-Key` nonce generation
//!
//! Supports multiple RNG backends via feature flags:
//! - `getrandom` (default): cryptographically secure RNG
//! - `rand_rng`: uses the `rand` crate (prefer if `rand` is already in dependency tree)
//! - `fastrand`: fast, non-cryptographic PRNG
//!
//! The nonce exists to defeat caching intermediaries, not as a security
//! credential, but the secure default costs nothing here.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Raw nonce length in bytes, fixed by RFC 6455
pub const NONCE_LEN: usize = 16;

/// Generate a fresh `Sec-WebSocket-Key` value: 16 random bytes,
/// base64-encoded with the standard alphabet and padding.
///
/// The RNG implementation is selected via feature flags.
/// If multiple features are enabled, priority is: getrandom > rand_rng > fastrand.
/// If no RNG feature is enabled, this function will fail to compile.
#[inline]
pub fn new_nonce() -> String {
    encode_nonce(&random_bytes())
}

/// Base64-encode a raw 16-byte nonce.
#[inline]
pub fn encode_nonce(raw: &[u8; NONCE_LEN]) -> String {
    STANDARD.encode(raw)
}

#[cfg(feature = "getrandom")]
#[inline]
fn random_bytes() -> [u8; NONCE_LEN] {
    let mut buf = [0u8; NONCE_LEN];
    getrandom::getrandom(&mut buf).expect("getrandom failed");
    buf
}

#[cfg(all(feature = "rand_rng", not(feature = "getrandom")))]
#[inline]
fn random_bytes() -> [u8; NONCE_LEN] {
    use rand::Rng;
    rand::rng().random()
}

#[cfg(all(
    feature = "fastrand",
    not(feature = "getrandom"),
    not(feature = "rand_rng")
))]
#[inline]
fn random_bytes() -> [u8; NONCE_LEN] {
    let mut buf = [0u8; NONCE_LEN];
    fastrand::fill(&mut buf);
    buf
}

#[cfg(not(any(feature = "fastrand", feature = "getrandom", feature = "rand_rng")))]
fn random_bytes() -> [u8; NONCE_LEN] {
    compile_error!("At least one RNG feature must be enabled: fastrand, getrandom, or rand_rng");
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    #[test]
    fn test_encode_fixed_sequence() {
        let raw: [u8; NONCE_LEN] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
        assert_eq!(encode_nonce(&raw), "AAECAwQFBgcICQoLDA0ODw==");
    }

    #[test]
    fn test_encode_all_zero_is_padded() {
        let raw = [0u8; NONCE_LEN];
        assert_eq!(encode_nonce(&raw), "AAAAAAAAAAAAAAAAAAAAAA==");
    }

    #[test]
    fn test_nonce_decodes_to_sixteen_bytes() {
        let nonce = new_nonce();
        // 16 bytes encode to exactly 24 base64 characters, no line breaks
        assert_eq!(nonce.len(), 24);
        let decoded = STANDARD.decode(&nonce).unwrap();
        assert_eq!(decoded.len(), NONCE_LEN);
    }

    #[test]
    fn test_nonces_are_independent() {
        let a = new_nonce();
        let b = new_nonce();
        assert_ne!(a, b);
    }
}
