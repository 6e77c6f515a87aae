use common::ProductId;
use serde::{Deserialize, Serialize};

use super::CatalogError;
use crate::Money;

/// Unvalidated product fields as entered on the product form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub description: String,
    pub quantity_available: u32,
    pub unit_price: Money,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    sku: String,
    category: String,
    description: String,
    quantity_available: u32,
    unit_price: Money,
}

impl Product {
    /// Validates `new` and builds the product. Text fields are trimmed and
    /// must not be empty; the unit price may be zero but not negative.
    pub fn new(id: ProductId, new: NewProduct) -> Result<Self, CatalogError> {
        if new.unit_price.is_negative() {
            return Err(CatalogError::NegativePrice(new.unit_price));
        }

        Ok(Self {
            id,
            name: required("name", new.name)?,
            sku: required("sku", new.sku)?,
            category: required("category", new.category)?,
            description: required("description", new.description)?,
            quantity_available: new.quantity_available,
            unit_price: new.unit_price,
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity_available(&self) -> u32 {
        self.quantity_available
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }
}

pub(super) fn required(field: &'static str, value: String) -> Result<String, CatalogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CatalogError::MissingField(field))
    } else if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NewProduct {
        NewProduct {
            name: "  Widget ".to_string(),
            sku: "W-1".to_string(),
            category: "Hardware".to_string(),
            description: "A widget".to_string(),
            quantity_available: 3,
            unit_price: Money::from_cents(4999),
        }
    }

    #[test]
    fn trims_text_fields() {
        let product = Product::new(ProductId::new(), form()).unwrap();
        assert_eq!(product.name(), "Widget");
        assert_eq!(product.quantity_available(), 3);
    }

    #[test]
    fn rejects_blank_required_field() {
        let mut new = form();
        new.category = "   ".to_string();
        assert_eq!(
            Product::new(ProductId::new(), new),
            Err(CatalogError::MissingField("category"))
        );
    }

    #[test]
    fn zero_price_allowed_negative_rejected() {
        let mut free = form();
        free.unit_price = Money::zero();
        assert!(Product::new(ProductId::new(), free).is_ok());

        let mut negative = form();
        negative.unit_price = Money::from_cents(-1);
        assert!(matches!(
            Product::new(ProductId::new(), negative),
            Err(CatalogError::NegativePrice(_))
        ));
    }
}
