use chrono::NaiveDate;

use super::value_objects::{Email, Identity, IdentityId, Role};

// ============================================================================
// Administrator Credential Check
// ============================================================================
//
// Admin login never consults the registry. It is answered by a
// CredentialCheck so the demo's embedded superuser can be swapped out
// without touching the session store.
//
// ============================================================================

pub trait CredentialCheck: Send + Sync {
    /// The admin identity to sign in as, or `None` to reject.
    fn verify_admin(&self, email: &str, password: &str) -> Option<Identity>;
}

pub const DEMO_ADMIN_EMAIL: &str = "admin@ravimart.com";
pub const DEMO_ADMIN_PASSWORD: &str = "admin123";

/// A single embedded email/password pair compared by plain string equality.
/// Demo only: no hashing, no lockout.
#[derive(Debug, Clone)]
pub struct FixedAdminCredential {
    email: String,
    password: String,
    admin: Identity,
}

impl FixedAdminCredential {
    pub fn new(email: impl Into<String>, password: impl Into<String>, admin: Identity) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            admin,
        }
    }
}

impl Default for FixedAdminCredential {
    fn default() -> Self {
        let admin = Identity {
            id: IdentityId::new("admin-1"),
            name: "RaviMart Admin".to_string(),
            email: Email::new(DEMO_ADMIN_EMAIL),
            phone: None,
            address: None,
            city: None,
            zip: None,
            role: Role::Admin,
            join_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
        };
        Self::new(DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD, admin)
    }
}

impl CredentialCheck for FixedAdminCredential {
    fn verify_admin(&self, email: &str, password: &str) -> Option<Identity> {
        (email == self.email && password == self.password).then(|| self.admin.clone())
    }
}
