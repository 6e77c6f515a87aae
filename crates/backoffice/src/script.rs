//! Workflow scripts: the sequence of console actions to replay.
//!
//! Records and orders are referred to by script-local keys, so a script
//! can be written before any identifiers exist.

use std::path::Path;

use domain::{Role, Section};
use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Overrides the configured role when present.
    #[serde(default)]
    pub role: Option<Role>,

    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ConsoleError> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConsoleError> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }
}

/// Product form fields. The price is a decimal string such as `"49.99"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity_available: u32,
    pub unit_price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// One row of an order form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRow {
    pub product: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    AddProduct {
        key: String,
        #[serde(flatten)]
        form: ProductForm,
    },
    UpdateProduct {
        product: String,
        #[serde(flatten)]
        form: ProductForm,
    },
    AddCustomer {
        key: String,
        #[serde(flatten)]
        form: CustomerForm,
    },
    CreateSale {
        key: String,
        customer: String,
        items: Vec<ItemRow>,
    },
    CreatePurchase {
        key: String,
        supplier: String,
        items: Vec<ItemRow>,
    },
    EditSale {
        order: String,
        customer: String,
        items: Vec<ItemRow>,
    },
    EditPurchase {
        order: String,
        supplier: String,
        items: Vec<ItemRow>,
    },
    Sell {
        order: String,
    },
    Receive {
        order: String,
    },
    CancelSale {
        order: String,
        #[serde(default)]
        reason: Option<String>,
    },
    Delete {
        order: String,
    },
}

impl Step {
    pub fn action(&self) -> &'static str {
        match self {
            Step::AddProduct { .. } => "add_product",
            Step::UpdateProduct { .. } => "update_product",
            Step::AddCustomer { .. } => "add_customer",
            Step::CreateSale { .. } => "create_sale",
            Step::CreatePurchase { .. } => "create_purchase",
            Step::EditSale { .. } => "edit_sale",
            Step::EditPurchase { .. } => "edit_purchase",
            Step::Sell { .. } => "sell",
            Step::Receive { .. } => "receive",
            Step::CancelSale { .. } => "cancel_sale",
            Step::Delete { .. } => "delete",
        }
    }

    /// Section the step itself belongs to. `None` for `delete`. Steps that
    /// name an existing order are also checked against that order's kind.
    pub fn section(&self) -> Option<Section> {
        match self {
            Step::AddProduct { .. } | Step::UpdateProduct { .. } => Some(Section::Products),
            Step::AddCustomer { .. } => Some(Section::Customers),
            Step::CreateSale { .. }
            | Step::EditSale { .. }
            | Step::Sell { .. }
            | Step::CancelSale { .. } => Some(Section::Sales),
            Step::CreatePurchase { .. } | Step::EditPurchase { .. } | Step::Receive { .. } => {
                Some(Section::Purchases)
            }
            Step::Delete { .. } => None,
        }
    }
}
