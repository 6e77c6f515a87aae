//! Which console sections each staff role may use.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Sales,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Dashboard,
    Products,
    Customers,
    Sales,
    Purchases,
}

impl Role {
    /// Admins see everything; sales staff cannot manage products or
    /// purchases.
    pub fn can_access(&self, section: Section) -> bool {
        match self {
            Role::Admin => true,
            Role::Sales => !matches!(section, Section::Products | Section::Purchases),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Sales => "sales",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Section::Dashboard => "dashboard",
            Section::Products => "products",
            Section::Customers => "customers",
            Section::Sales => "sales",
            Section::Purchases => "purchases",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role {0:?} (expected \"admin\" or \"sales\")")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "sales" => Ok(Role::Sales),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}
