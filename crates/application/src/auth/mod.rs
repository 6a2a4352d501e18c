//! Authentication session.
//!
//! This module provides:
//! - A typed entry over the opaque secure store
//! - The session that owns the bearer credential

mod entry;
mod session;

pub use entry::SecureEntry;
pub use session::{AuthSession, DEFAULT_ACCOUNT, DEFAULT_SERVICE, Session};
