use common::CustomerId;
use serde::{Deserialize, Serialize};

use super::CatalogError;
use super::product::required;

/// Unvalidated customer fields as entered on the customer form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// A customer that sales can be made to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: String,
    phone: String,
    address: String,
}

impl Customer {
    pub fn new(id: CustomerId, new: NewCustomer) -> Result<Self, CatalogError> {
        let email = required("email", new.email)?;
        let valid_email = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !valid_email {
            return Err(CatalogError::InvalidEmail(email));
        }

        Ok(Self {
            id,
            name: required("name", new.name)?,
            email,
            phone: required("phone", new.phone)?,
            address: required("address", new.address)?,
        })
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str) -> NewCustomer {
        NewCustomer {
            name: "Alice".to_string(),
            email: email.to_string(),
            phone: "555-0100".to_string(),
            address: "1 Main St".to_string(),
        }
    }

    #[test]
    fn accepts_complete_form() {
        let customer = Customer::new(CustomerId::new(), form("alice@example.com")).unwrap();
        assert_eq!(customer.email(), "alice@example.com");
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["alice", "@example.com", "alice@"] {
            assert!(matches!(
                Customer::new(CustomerId::new(), form(email)),
                Err(CatalogError::InvalidEmail(_))
            ));
        }
    }

    #[test]
    fn rejects_missing_email() {
        assert_eq!(
            Customer::new(CustomerId::new(), form(" ")),
            Err(CatalogError::MissingField("email"))
        );
    }
}
