use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, prelude::BASE64_STANDARD, Engine as _};
use rand_core::{OsRng, RngCore};
use uuid::Uuid;

pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// Bearer secret handed out at login. Only its argon2 hash is stored.
pub fn new_secret() -> String {
    let mut buf = [0u8; 32];
    let mut rng = OsRng;
    rng.fill_bytes(&mut buf);
    format!("tok_{}", URL_SAFE_NO_PAD.encode(buf))
}

/// Short shareable invitation id.
pub fn new_invitation_id() -> String {
    nanoid::nanoid!(10)
}

/// Six decimal digits for the registration OTP email.
pub fn new_otp_code() -> String {
    let mut rng = OsRng;
    let n = rng.next_u32() % 900_000 + 100_000;
    n.to_string()
}

/// Password reset token, long enough to be unguessable in a URL.
pub fn new_reset_token() -> String {
    let mut buf = [0u8; 24];
    let mut rng = OsRng;
    rng.fill_bytes(&mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}

pub fn encrypt(secret: &str) -> Result<String, argon2::password_hash::Error> {
    let mut rng = OsRng;
    let salt = SaltString::generate(&mut rng);
    let hash = Argon2::default().hash_password(secret.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify(secret: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok())
}

/// The wire token is base64("uid.secret") so handlers can recover the
/// claimed user before touching the database.
pub fn construct_token(user_id: &str, secret: &str) -> String {
    BASE64_STANDARD.encode(format!("{user_id}.{secret}"))
}

pub fn extract_token_parts(token: &str) -> Option<(Uuid, String)> {
    let decoded = BASE64_STANDARD.decode(token).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (uid, secret) = decoded.split_once('.')?;
    let uid = Uuid::parse_str(uid).ok()?;
    if secret.is_empty() {
        return None;
    }
    Some((uid, secret.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_parts_roundtrip() {
        let uid = new_id();
        let secret = new_secret();
        let token = construct_token(&uid.to_string(), &secret);
        let (got_uid, got_secret) = extract_token_parts(&token).unwrap();
        assert_eq!(got_uid, uid);
        assert_eq!(got_secret, secret);
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(extract_token_parts("not base64 at all!!!").is_none());
        assert!(extract_token_parts(&BASE64_STANDARD.encode("no-dot-here")).is_none());
        assert!(extract_token_parts(&BASE64_STANDARD.encode("not-a-uuid.secret")).is_none());
        let uid = new_id();
        assert!(extract_token_parts(&BASE64_STANDARD.encode(format!("{uid}."))).is_none());
    }

    #[test]
    fn otp_codes_are_six_digits() {
        for _ in 0..32 {
            let code = new_otp_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn hash_verifies_only_the_original_secret() {
        let secret = new_secret();
        let hash = encrypt(&secret).unwrap();
        assert!(verify(&secret, &hash).unwrap());
        assert!(!verify("tok_other", &hash).unwrap());
    }
}
