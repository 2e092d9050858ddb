//! Authentication port resolving the current principal.

use crate::board::domain::PrincipalId;

/// Reports which principal, if any, is currently authenticated.
///
/// Backend selection re-evaluates this on every storage call; there is no
/// cached adapter state to invalidate when authentication changes.
pub trait AuthProvider: Send + Sync {
    /// Returns the authenticated principal, or `None` when signed out.
    fn current_principal(&self) -> Option<PrincipalId>;
}
