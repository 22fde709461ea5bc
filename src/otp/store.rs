use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::info;

use crate::utils::token::{new_otp_code, new_reset_token};

struct Entry<V> {
    value: V,
    expires_at: DateTime<Utc>,
}

/// Keyed store with per-entry expiry: put/get/remove plus a sweep for the
/// background cleanup task. Expired entries are also dropped lazily on read.
pub struct ExpiringStore<V> {
    entries: Arc<RwLock<HashMap<String, Entry<V>>>>,
}

impl<V> Clone for ExpiringStore<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V> Default for ExpiringStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ExpiringStore<V> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry<V>>> {
        match self.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry<V>>> {
        match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Inserts (or replaces) an entry, returning its expiry instant.
    pub fn put(&self, key: &str, value: V, ttl: Duration) -> DateTime<Utc> {
        let expires_at = Utc::now() + ttl;
        self.write().insert(
            key.to_owned(),
            Entry { value, expires_at },
        );
        expires_at
    }

    /// Removes the entry regardless of expiry.
    pub fn remove(&self, key: &str) {
        self.write().remove(key);
    }

    /// Purges every expired entry, returning how many were dropped.
    pub fn sweep(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, e| e.expires_at > now);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> ExpiringStore<V> {
    /// Returns the live value, dropping the entry if it has expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Utc::now();
        let mut entries = self.write();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Mutates a live entry in place. Returns the updated value, or `None`
    /// if the key is absent or expired.
    pub fn modify<F>(&self, key: &str, f: F) -> Option<V>
    where
        F: FnOnce(&mut V),
    {
        let now = Utc::now();
        let mut entries = self.write();
        match entries.get_mut(key) {
            Some(entry) if entry.expires_at > now => {
                f(&mut entry.value);
                Some(entry.value.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum OtpError {
    #[error("OTP not found or expired. Please request a new one.")]
    NotFound,
    #[error("Too many incorrect attempts. Please request a new OTP.")]
    TooManyAttempts,
    #[error("Invalid OTP. {remaining} attempt(s) remaining.")]
    Mismatch { remaining: u32 },
    #[error("Please wait before requesting a new OTP")]
    CooldownActive,
    #[error("Please verify your email address first")]
    NotVerified,
}

#[derive(Debug, Clone)]
pub struct OtpEntry {
    code: String,
    issued_at: DateTime<Utc>,
    attempts: u32,
    verified: bool,
}

/// Registration OTPs, keyed by email.
#[derive(Clone)]
pub struct OtpStore {
    store: ExpiringStore<OtpEntry>,
    ttl: Duration,
    max_attempts: u32,
    cooldown: Duration,
}

impl OtpStore {
    pub fn new(ttl: Duration, max_attempts: u32, cooldown: Duration) -> Self {
        Self {
            store: ExpiringStore::new(),
            ttl,
            max_attempts,
            cooldown,
        }
    }

    /// Issues a fresh code for the address, replacing any previous one.
    pub fn issue(&self, email: &str) -> (String, DateTime<Utc>) {
        let code = new_otp_code();
        let expires_at = self.store.put(
            email,
            OtpEntry {
                code: code.clone(),
                issued_at: Utc::now(),
                attempts: 0,
                verified: false,
            },
        self.ttl,
        );
        (code, expires_at)
    }

    /// Like [`issue`](Self::issue), but refuses while the previous code is
    /// still inside the resend cooldown window.
    pub fn reissue(&self, email: &str) -> Result<(String, DateTime<Utc>), OtpError> {
        if let Some(entry) = self.store.get(email) {
            if Utc::now() - entry.issued_at < self.cooldown {
                return Err(OtpError::CooldownActive);
            }
        }
        Ok(self.issue(email))
    }

    /// Checks a submitted code, counting failed attempts. A correct code
    /// marks the entry verified for the subsequent registration call.
    pub fn verify(&self, email: &str, code: &str) -> Result<(), OtpError> {
        let entry = self.store.get(email).ok_or(OtpError::NotFound)?;

        if entry.attempts >= self.max_attempts {
            self.store.remove(email);
            return Err(OtpError::TooManyAttempts);
        }

        if entry.code != code.trim() {
            let updated = self
                .store
                .modify(email, |e| e.attempts += 1)
                .ok_or(OtpError::NotFound)?;
            let remaining = self.max_attempts.saturating_sub(updated.attempts);
            return Err(OtpError::Mismatch { remaining });
        }

        self.store
            .modify(email, |e| e.verified = true)
            .ok_or(OtpError::NotFound)?;
        Ok(())
    }

    /// Registration gate: the address must hold a live, verified entry.
    pub fn require_verified(&self, email: &str) -> Result<(), OtpError> {
        match self.store.get(email) {
            Some(entry) if entry.verified => Ok(()),
            Some(_) => Err(OtpError::NotVerified),
            None => Err(OtpError::NotVerified),
        }
    }

    /// Single use: drop the entry once registration succeeds.
    pub fn consume(&self, email: &str) {
        self.store.remove(email);
    }

    pub fn sweep(&self) -> usize {
        self.store.sweep()
    }
}

/// Password reset tokens, keyed by email. Single-use.
#[derive(Clone)]
pub struct ResetStore {
    store: ExpiringStore<String>,
    ttl: Duration,
}

impl ResetStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: ExpiringStore::new(),
            ttl,
        }
    }

    pub fn issue(&self, email: &str) -> (String, DateTime<Utc>) {
        let token = new_reset_token();
        let expires_at = self.store.put(email, token.clone(), self.ttl);
        (token, expires_at)
    }

    /// Consumes the token on match. A second redemption attempt fails.
    pub fn redeem(&self, email: &str, token: &str) -> bool {
        match self.store.get(email) {
            Some(stored) if stored == token => {
                self.store.remove(email);
                true
            }
            _ => false,
        }
    }

    pub fn sweep(&self) -> usize {
        self.store.sweep()
    }
}

/// Everything the auth routes need, shared as one app-data handle.
#[derive(Clone)]
pub struct AuthStores {
    pub otp: OtpStore,
    pub reset: ResetStore,
}

impl AuthStores {
    pub fn new(otp: OtpStore, reset: ResetStore) -> Self {
        Self { otp, reset }
    }

    /// Spawns the periodic cleanup sweep on the actix runtime. The clones
    /// share state with the originals, so sweeping here is sweeping them.
    pub fn spawn_sweeper(&self, every: std::time::Duration) {
        let otp = self.otp.clone();
        let reset = self.reset.clone();
        actix_web::rt::spawn(async move {
            let mut tick = actix_web::rt::time::interval(every);
            loop {
                tick.tick().await;
                let dropped = otp.sweep() + reset.sweep();
                if dropped > 0 {
                    info!("auth store sweep dropped {} expired entries", dropped);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_roundtrip() {
        let store = ExpiringStore::new();
        store.put("k", 7usize, Duration::minutes(5));
        assert_eq!(store.get("k"), Some(7));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn expired_entries_vanish_on_read() {
        let store = ExpiringStore::new();
        store.put("k", 1usize, Duration::seconds(-1));
        assert_eq!(store.get("k"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn sweep_purges_only_expired_entries() {
        let store = ExpiringStore::new();
        store.put("dead", 1usize, Duration::seconds(-1));
        store.put("live", 2usize, Duration::minutes(5));
        assert_eq!(store.sweep(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("live"), Some(2));
    }

    fn otp_store() -> OtpStore {
        OtpStore::new(Duration::minutes(5), 3, Duration::seconds(60))
    }

    #[test]
    fn issued_code_verifies_once_issued() {
        let store = otp_store();
        let (code, _) = store.issue("a@b.edu");
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        assert!(store.verify("a@b.edu", &code).is_ok());
        assert!(store.require_verified("a@b.edu").is_ok());
    }

    #[test]
    fn wrong_code_counts_attempts_then_locks_out() {
        let store = otp_store();
        let (_code, _) = store.issue("a@b.edu");

        match store.verify("a@b.edu", "000000") {
            Err(OtpError::Mismatch { remaining }) => assert_eq!(remaining, 2),
            other => panic!("unexpected: {:?}", other.err()),
        }
        match store.verify("a@b.edu", "000000") {
            Err(OtpError::Mismatch { remaining }) => assert_eq!(remaining, 1),
            other => panic!("unexpected: {:?}", other.err()),
        }
        match store.verify("a@b.edu", "000000") {
            Err(OtpError::Mismatch { remaining }) => assert_eq!(remaining, 0),
            other => panic!("unexpected: {:?}", other.err()),
        }
        // Fourth attempt hits the cap and the entry is gone afterwards
        assert!(matches!(
            store.verify("a@b.edu", "000000"),
            Err(OtpError::TooManyAttempts)
        ));
        assert!(matches!(
            store.verify("a@b.edu", "000000"),
            Err(OtpError::NotFound)
        ));
    }

    #[test]
    fn reissue_respects_cooldown() {
        let store = otp_store();
        store.issue("a@b.edu");
        assert!(matches!(
            store.reissue("a@b.edu"),
            Err(OtpError::CooldownActive)
        ));

        // No previous entry means no cooldown
        assert!(store.reissue("fresh@b.edu").is_ok());
    }

    #[test]
    fn registration_gate_requires_a_verified_entry() {
        let store = otp_store();
        assert!(matches!(
            store.require_verified("a@b.edu"),
            Err(OtpError::NotVerified)
        ));
        let (code, _) = store.issue("a@b.edu");
        assert!(matches!(
            store.require_verified("a@b.edu"),
            Err(OtpError::NotVerified)
        ));
        store.verify("a@b.edu", &code).unwrap();
        assert!(store.require_verified("a@b.edu").is_ok());

        store.consume("a@b.edu");
        assert!(store.require_verified("a@b.edu").is_err());
    }

    #[test]
    fn reset_tokens_are_single_use() {
        let store = ResetStore::new(Duration::hours(1));
        let (token, _) = store.issue("a@b.edu");
        assert!(!store.redeem("a@b.edu", "wrong"));
        assert!(store.redeem("a@b.edu", &token));
        assert!(!store.redeem("a@b.edu", &token));
    }
}
