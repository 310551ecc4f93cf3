//! Password hashing via bcrypt.

use super::AuthError;

/// Default bcrypt cost factor.
pub const DEFAULT_COST: u32 = 10;

/// Bytes of input bcrypt actually consumes; anything beyond is ignored.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a password with bcrypt at the given cost.
///
/// Returns the modular crypt string as bytes, ready for storage.
pub fn hash_password(password: &str, cost: u32) -> Result<Vec<u8>, AuthError> {
    bcrypt::hash(password, cost)
        .map(String::into_bytes)
        .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a stored bcrypt hash.
pub fn verify_password(password: &str, hash: &[u8]) -> Result<bool, AuthError> {
    let hash = std::str::from_utf8(hash)
        .map_err(|e| AuthError::Internal(format!("stored hash is not utf-8: {e}")))?;
    bcrypt::verify(password, hash).map_err(|e| AuthError::Internal(format!("bcrypt verify: {e}")))
}

/// Hash on the blocking pool so the runtime's workers keep serving requests.
pub async fn hash_password_blocking(password: String, cost: u32) -> Result<Vec<u8>, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost)).await?
}

/// Verify on the blocking pool.
pub async fn verify_password_blocking(password: String, hash: Vec<u8>) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_the_plaintext() {
        let hash = hash_password("hunter2", 4).unwrap();
        assert_ne!(hash, b"hunter2".to_vec());
        assert!(hash.starts_with(b"$2"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("hunter2", 4).unwrap();
        let b = hash_password("hunter2", 4).unwrap();
        assert_ne!(a, b, "salt must differ per hash");
    }

    #[test]
    fn verify_accepts_right_and_rejects_wrong() {
        let hash = hash_password("hunter2", 4).unwrap();
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_internal() {
        let err = verify_password("hunter2", b"not-a-bcrypt-hash").unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
    }

    #[test]
    fn invalid_cost_is_internal() {
        let err = hash_password("hunter2", 2).unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
    }

    #[tokio::test]
    async fn blocking_wrappers_round_trip() {
        let hash = hash_password_blocking("pw".into(), 4).await.unwrap();
        assert!(verify_password_blocking("pw".into(), hash).await.unwrap());
    }
}
