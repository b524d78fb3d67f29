use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identity Value Objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(pub String);

impl IdentityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address. Compared literally, with no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(pub String);

impl Email {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Customer records are persisted with the tag `"user"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    Customer,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered customer or the built-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: IdentityId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    pub role: Role,
    pub join_date: NaiveDate,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Merge the `Some` fields of `update`. Email and role never change.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(ref name) = update.name {
            self.name = name.clone();
        }
        if let Some(ref phone) = update.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(ref address) = update.address {
            self.address = Some(address.clone());
        }
        if let Some(ref city) = update.city {
            self.city = Some(city.clone());
        }
        if let Some(ref zip) = update.zip {
            self.zip = Some(zip.clone());
        }
    }
}

/// Profile fields a signed-in identity may edit. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Registry contents on first run.
pub fn seed_identities() -> Vec<Identity> {
    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    vec![
        Identity {
            id: IdentityId::new("u1"),
            name: "Rahul Sharma".to_string(),
            email: Email::new("rahul@example.com"),
            phone: Some("9876543210".to_string()),
            address: Some("123 Main St".to_string()),
            city: Some("Erode".to_string()),
            zip: Some("638001".to_string()),
            role: Role::Customer,
            join_date: date(2024, 12, 15),
        },
        Identity {
            id: IdentityId::new("u2"),
            name: "Priya Patel".to_string(),
            email: Email::new("priya@example.com"),
            phone: Some("9898989898".to_string()),
            address: None,
            city: None,
            zip: None,
            role: Role::Customer,
            join_date: date(2025, 1, 10),
        },
        Identity {
            id: IdentityId::new("u3"),
            name: "Amit Singh".to_string(),
            email: Email::new("amit@example.com"),
            phone: None,
            address: None,
            city: None,
            zip: None,
            role: Role::Customer,
            join_date: date(2025, 1, 22),
        },
    ]
}
