//! Short-lived verification secrets: registration OTPs and password reset
//! tokens. Both sit in one keyed expiring store; a background sweep task
//! owned by main handles cleanup, the store itself never spawns timers.

pub mod store;

pub use store::{AuthStores, ExpiringStore, OtpError, OtpStore, ResetStore};
