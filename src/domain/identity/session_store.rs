use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::credentials::CredentialCheck;
use super::errors::SessionError;
use super::value_objects::{seed_identities, Email, Identity, IdentityId, ProfileUpdate, Role};
use crate::clock::{self, Clock};
use crate::metrics::StoreMetrics;
use crate::storage::{load_json, save_json, KeyValueStore};
use crate::utils::ids;

// ============================================================================
// Session Store
// ============================================================================
//
// Owns the identity registry and the signed-in identity. Both are written
// back to storage after every mutation; nothing ties the two writes into
// one transaction.
//
// ============================================================================

pub const REGISTRY_KEY: &str = "ravimart_all_users";
pub const SESSION_KEY: &str = "ravimart_user";

/// Customers must supply at least this many password characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Who is signed in. Registry members are referenced by id; the built-in
/// admin is not in the registry and is held directly.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ActiveSession {
    Registered(IdentityId),
    Detached(Identity),
}

pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    credentials: Arc<dyn CredentialCheck>,
    metrics: Arc<StoreMetrics>,
    auth_latency: Duration,
    registry: Vec<Identity>,
    active: Option<ActiveSession>,
}

impl SessionStore {
    /// Load registry and session from storage, seeding the registry on first run.
    pub fn open(
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        credentials: Arc<dyn CredentialCheck>,
        metrics: Arc<StoreMetrics>,
        auth_latency: Duration,
    ) -> Result<Self, SessionError> {
        let registry = match load_json::<Vec<Identity>>(storage.as_ref(), REGISTRY_KEY)? {
            Some(registry) => registry,
            None => {
                let seeded = seed_identities();
                save_json(storage.as_ref(), REGISTRY_KEY, &seeded)?;
                tracing::info!(count = seeded.len(), "Seeded identity registry");
                seeded
            }
        };

        let active = load_json::<Identity>(storage.as_ref(), SESSION_KEY)?.map(|identity| {
            if registry.iter().any(|i| i.id == identity.id) {
                ActiveSession::Registered(identity.id)
            } else {
                ActiveSession::Detached(identity)
            }
        });

        tracing::debug!(
            registry_size = registry.len(),
            restored_session = active.is_some(),
            "Session store opened"
        );

        Ok(Self {
            storage,
            clock,
            credentials,
            metrics,
            auth_latency,
            registry,
            active,
        })
    }

    pub fn current(&self) -> Option<&Identity> {
        self.resolve(self.active.as_ref()?)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    pub fn registry(&self) -> &[Identity] {
        &self.registry
    }

    pub fn customers(&self) -> impl Iterator<Item = &Identity> {
        self.registry.iter().filter(|i| i.role == Role::Customer)
    }

    /// Sign in after the simulated round-trip.
    ///
    /// Admin intent is answered by the credential check alone. Customer intent
    /// needs a password of at least six characters and a customer registry
    /// entry with that email; the password itself is not checked further.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        role: Role,
        cancel: &CancellationToken,
    ) -> Result<Identity, SessionError> {
        clock::delay(self.clock.as_ref(), self.auth_latency, cancel).await?;

        let session = match role {
            Role::Admin => self
                .credentials
                .verify_admin(email, password)
                .map(ActiveSession::Detached),
            Role::Customer if password.chars().count() >= MIN_PASSWORD_LEN => self
                .registry
                .iter()
                .find(|i| i.email.as_str() == email && i.role == Role::Customer)
                .map(|i| ActiveSession::Registered(i.id.clone())),
            Role::Customer => None,
        };

        self.metrics.record_login(role.as_str(), session.is_some());

        let Some(session) = session else {
            tracing::warn!(role = %role, "Login rejected");
            return Err(SessionError::InvalidCredentials);
        };

        let identity = self
            .resolve(&session)
            .cloned()
            .ok_or(SessionError::InvalidCredentials)?;
        save_json(self.storage.as_ref(), SESSION_KEY, &identity)?;
        self.active = Some(session);

        tracing::info!(identity_id = %identity.id, role = %role, "Login succeeded");
        Ok(identity)
    }

    /// Register a new customer and sign them in. The password is accepted
    /// as given; the only rule is email uniqueness.
    pub async fn signup(
        &mut self,
        name: &str,
        email: &str,
        _password: &str,
        phone: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Identity, SessionError> {
        clock::delay(self.clock.as_ref(), self.auth_latency, cancel).await?;

        if self.registry.iter().any(|i| i.email.as_str() == email) {
            tracing::warn!("Signup rejected, email already registered");
            return Err(SessionError::DuplicateIdentity);
        }

        let identity = Identity {
            id: IdentityId::new(ids::short_id()),
            name: name.to_string(),
            email: Email::new(email),
            phone: phone.map(str::to_string),
            address: None,
            city: None,
            zip: None,
            role: Role::Customer,
            join_date: self.clock.today(),
        };

        let mut registry = self.registry.clone();
        registry.push(identity.clone());
        save_json(self.storage.as_ref(), REGISTRY_KEY, &registry)?;
        save_json(self.storage.as_ref(), SESSION_KEY, &identity)?;

        self.registry = registry;
        self.active = Some(ActiveSession::Registered(identity.id.clone()));

        tracing::info!(identity_id = %identity.id, "Customer signed up");
        Ok(identity)
    }

    /// Merge `update` into the signed-in identity and its registry entry.
    /// No-op when nobody is signed in or the update carries no fields.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<(), SessionError> {
        if update.is_empty() {
            tracing::debug!("Profile update ignored, no fields set");
            return Ok(());
        }

        let Some(mut updated) = self.current().cloned() else {
            tracing::debug!("Profile update ignored, no active session");
            return Ok(());
        };
        updated.apply(&update);

        let registry = match self.active {
            Some(ActiveSession::Registered(_)) => {
                let mut registry = self.registry.clone();
                for entry in registry.iter_mut().filter(|i| i.id == updated.id) {
                    *entry = updated.clone();
                }
                save_json(self.storage.as_ref(), REGISTRY_KEY, &registry)?;
                Some(registry)
            }
            _ => None,
        };
        save_json(self.storage.as_ref(), SESSION_KEY, &updated)?;

        tracing::info!(identity_id = %updated.id, "Profile updated");
        match registry {
            Some(registry) => self.registry = registry,
            None => self.active = Some(ActiveSession::Detached(updated)),
        }
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        if let Some(identity) = self.current() {
            tracing::info!(identity_id = %identity.id, "Logged out");
        }
        self.active = None;
        self.storage.remove(SESSION_KEY)?;
        Ok(())
    }

    fn resolve<'a>(&'a self, session: &'a ActiveSession) -> Option<&'a Identity> {
        match session {
            ActiveSession::Registered(id) => self.registry.iter().find(|i| &i.id == id),
            ActiveSession::Detached(identity) => Some(identity),
        }
    }
}
