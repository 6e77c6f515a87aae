//! Dashboard figures derived from the set of sales.

use serde::{Deserialize, Serialize};

use crate::Money;
use crate::aggregate::Aggregate;
use crate::order::{Order, OrderKind, OrderStatus, ValidationError};

/// Counts per status and confirmed revenue over a set of sales.
///
/// Always recomputed from the orders it is given; nothing is cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_sales: usize,
    pub confirmed_sales: usize,
    pub cancelled_sales: usize,
    pub pending_sales: usize,
    /// Sum of totals of Confirmed sales only.
    pub total_revenue: Money,
}

impl SalesSummary {
    /// Folds over `orders`. Purchases, deleted orders and orders that were
    /// never placed are skipped.
    pub fn from_orders<'a>(
        orders: impl IntoIterator<Item = &'a Order>,
    ) -> Result<Self, ValidationError> {
        orders
            .into_iter()
            .filter(|order| {
                order.id().is_some() && !order.is_deleted() && order.kind() == OrderKind::Sale
            })
            .try_fold(Self::default(), |summary, order| {
                summary.record(order.status(), order.total_amount())
            })
    }

    /// Adds one sale with the given status and total. Fails if the revenue
    /// no longer fits in minor units.
    pub fn record(mut self, status: OrderStatus, total: Money) -> Result<Self, ValidationError> {
        self.total_sales += 1;
        match status {
            OrderStatus::Pending => self.pending_sales += 1,
            OrderStatus::Cancelled => self.cancelled_sales += 1,
            OrderStatus::Confirmed => {
                self.confirmed_sales += 1;
                self.total_revenue = self
                    .total_revenue
                    .checked_add(total)
                    .ok_or(ValidationError::AmountOverflow)?;
            }
        }
        Ok(self)
    }
}
