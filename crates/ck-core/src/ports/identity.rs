//! Identity provider port.
//!
//! Sign-up, sign-in, sign-out and OTP verification are the provider's
//! business; the core only needs the current session, if any.

use anyhow::Result;
use async_trait::async_trait;

use crate::auth::AuthSession;

#[async_trait]
pub trait IdentityPort: Send + Sync {
    /// The currently authenticated session, or `None` when signed out.
    /// Absence of a session is an ordinary state, not an error.
    async fn current_session(&self) -> Result<Option<AuthSession>>;
}
