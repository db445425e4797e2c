//! Email digest logic.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Secret used when no `hash_secret` entry nor `USER_HASH_SECRET` variable is
/// set. Predictable digests: fine for tests, never for production.
pub const DEFAULT_SECRET: &str = "default-secret";

/// Keyed email hasher.
///
/// Digests have a very high entropy and can double as a user identifier,
/// distinct from the row's surrogate key.
pub struct EmailHasher(Zeroizing<Vec<u8>>);

impl EmailHasher {
    /// Create a new [`EmailHasher`] from a secret key.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self(Zeroizing::new(secret.as_ref().to_vec()))
    }

    /// Digest a normalized email into HMAC-SHA256, hex-encoded.
    ///
    /// Normalization trims surrounding whitespace then lowercases, so
    /// `" Test@Example.com "` and `"test@example.com"` share a digest.
    pub fn digest(&self, email: &str) -> String {
        let normalized = email.trim().to_lowercase();

        let mut mac = HmacSha256::new_from_slice(&self.0)
            .expect("HMAC accepts keys of any length");
        mac.update(normalized.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }
}

impl Default for EmailHasher {
    fn default() -> Self {
        Self::new(DEFAULT_SECRET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_lower_hex_64(digest: &str) -> bool {
        digest.len() == 64
            && digest
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
    }

    #[test]
    fn test_deterministic() {
        let hasher = EmailHasher::default();

        let first = hasher.digest("test@example.com");
        let second = hasher.digest("test@example.com");

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_known_vectors() {
        let hasher = EmailHasher::default();

        assert_eq!(
            hasher.digest("test@example.com"),
            "eb009fbc5c915bea2c09c363280beb377cca0a3e7bee59df2d7c59ec7870dddc"
        );
        assert_eq!(
            hasher.digest("user@domain.com"),
            "70b8780d2af3a42e6d5613df396bab396b4d3f3c17c477137d39dc6453d74807"
        );
    }

    #[test]
    fn test_case_insensitive() {
        let hasher = EmailHasher::default();

        let lower = hasher.digest("test@example.com");
        let upper = hasher.digest("TEST@EXAMPLE.COM");
        let mixed = hasher.digest("Test@Example.com");

        assert_eq!(lower, upper);
        assert_eq!(lower, mixed);
    }

    #[test]
    fn test_surrounding_whitespace() {
        let hasher = EmailHasher::default();

        let clean = hasher.digest("test@example.com");

        assert_eq!(clean, hasher.digest("  test@example.com  "));
        assert_eq!(clean, hasher.digest("\ttest@example.com\t"));
        assert_eq!(clean, hasher.digest(" Test@Example.com "));
    }

    #[test]
    fn test_normalization_idempotent() {
        let hasher = EmailHasher::default();

        let normalized = " Test@Example.com ".trim().to_lowercase();
        assert_eq!(
            hasher.digest(&normalized),
            hasher.digest(" Test@Example.com ")
        );
    }

    #[test]
    fn test_distinct_emails() {
        let hasher = EmailHasher::default();

        assert_ne!(
            hasher.digest("user1@example.com"),
            hasher.digest("user2@example.com")
        );
    }

    #[test]
    fn test_distinct_secrets() {
        let first = EmailHasher::new("first-secret");
        let second = EmailHasher::new("second-secret");

        assert_ne!(
            first.digest("test@example.com"),
            second.digest("test@example.com")
        );
    }

    #[test]
    fn test_format() {
        let hasher = EmailHasher::default();

        assert!(is_lower_hex_64(&hasher.digest("test@example.com")));
        assert!(is_lower_hex_64(&hasher.digest("")));
        assert!(is_lower_hex_64(&hasher.digest("test+tag@example.com")));

        let long_email = format!("{}@example.com", "a".repeat(100));
        assert!(is_lower_hex_64(&hasher.digest(&long_email)));
    }
}
