//! Line-item pricing.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::{LineItem, PricedLine, ValidationError};
use crate::Money;
use crate::catalog::ProductLookup;

/// Priced lines in input order, and their sum.
///
/// Serialises as `{lines, lineTotals, orderTotal}`; `lineTotals` is derived
/// from the lines and ignored when reading back.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PricedOrder {
    pub lines: Vec<PricedLine>,
    #[serde(rename = "orderTotal")]
    pub total: Money,
}

impl PricedOrder {
    pub fn line_totals(&self) -> Vec<Money> {
        self.lines.iter().map(|line| line.line_total).collect()
    }
}

impl Serialize for PricedOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PricedOrder", 3)?;
        state.serialize_field("lines", &self.lines)?;
        state.serialize_field("lineTotals", &self.line_totals())?;
        state.serialize_field("orderTotal", &self.total)?;
        state.end()
    }
}

/// Prices `items` at the current unit price of each product.
///
/// Each line total is `quantity * unit_price`; the order total is their
/// sum. Fails on the first item with a zero quantity or a product that
/// `products` cannot resolve. An empty slice prices to zero.
pub fn price_lines<P>(items: &[LineItem], products: &P) -> Result<PricedOrder, ValidationError>
where
    P: ProductLookup + ?Sized,
{
    let mut lines = Vec::with_capacity(items.len());
    let mut total = Money::zero();

    for item in items {
        if item.quantity < 1 {
            return Err(ValidationError::InvalidQuantity {
                product_id: item.product_id,
                quantity: item.quantity,
            });
        }
        let product = products
            .product(&item.product_id)
            .ok_or(ValidationError::UnknownProduct(item.product_id))?;

        let line = PricedLine::new(product, item.quantity)?;
        total = total
            .checked_add(line.line_total)
            .ok_or(ValidationError::AmountOverflow)?;
        lines.push(line);
    }

    Ok(PricedOrder { lines, total })
}
