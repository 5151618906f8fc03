//! Principal domain model.

use serde::{Deserialize, Serialize};

/// Roles granted elevated privileges by the admin predicate.
///
/// Compared with exact, case-sensitive string equality. The role field
/// itself is a free-form string rather than a closed enum — unifying on
/// one normalized representation is an open question tracked in
/// DESIGN.md, so the historical behavior is preserved as-is.
pub const ADMIN_ROLES: [&str; 2] = ["admin", "moderator"];

/// An authenticated identity as carried inside a bearer token.
///
/// Immutable once issued; never persisted by the auth core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: String,
    pub username: String,
    pub role: String,
}

impl Principal {
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            role: role.into(),
        }
    }

    /// True iff this principal's role is in [`ADMIN_ROLES`] (exact
    /// casing — `"Admin"` does not qualify).
    #[must_use]
    pub fn is_admin(&self) -> bool {
        ADMIN_ROLES.contains(&self.role.as_str())
    }
}
