//! Initial credentials for imported members
//!
//! Each imported member receives their own random initial password,
//! stored argon2-hashed. Delivery of the clear-text credential happens
//! out-of-band through the membership backend.

use argon2::Config;
use rand::{distributions::Alphanumeric, Rng};

/// Length of generated initial passwords
const PASSWORD_LENGTH: usize = 16;

/// Random alphanumeric initial password
pub fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

/// Argon2 hash of a password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, argon2::Error> {
    let salt: [u8; 32] = rand::thread_rng().gen();
    let config = Config::default();
    argon2::hash_encoded(password.as_bytes(), &salt, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_length_and_charset() {
        let password = generate_password();
        assert_eq!(password.len(), PASSWORD_LENGTH);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_passwords_differ_per_member() {
        assert_ne!(generate_password(), generate_password());
    }

    #[test]
    fn test_hash_verifies() {
        let password = generate_password();
        let hash = hash_password(&password).unwrap();

        assert!(argon2::verify_encoded(&hash, password.as_bytes()).unwrap());
        assert!(!argon2::verify_encoded(&hash, b"wrong").unwrap());
    }
}
