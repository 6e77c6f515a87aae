//! Read models printed by the console.

use chrono::{DateTime, Utc};
use common::AggregateId;
use domain::{Aggregate, Order, OrderKind, OrderStatus, PricedLine, SalesSummary};
use serde::Serialize;

use crate::config::Config;

/// One row of the sales or purchases list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    /// Script key the order was created under.
    pub key: Option<String>,
    pub id: Option<AggregateId>,
    pub kind: OrderKind,
    pub counterparty: String,
    pub status: OrderStatus,
    pub items: Vec<LineView>,
    pub total: String,
    /// Buttons the console would enable, e.g. `["edit", "sell", "cancel", "delete"]`.
    pub actions: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub product: String,
    pub sku: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Dashboard cards with the revenue formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub total_sales: usize,
    pub confirmed_sales: usize,
    pub cancelled_sales: usize,
    pub pending_sales: usize,
    pub total_revenue: String,
}

impl OrderView {
    pub fn new(order: &Order, key: Option<String>, config: &Config) -> Self {
        let kind = order.kind();
        Self {
            key,
            id: order.id(),
            kind,
            counterparty: order
                .counterparty()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            status: order.status(),
            items: order
                .lines()
                .iter()
                .map(|line| LineView::new(line, config))
                .collect(),
            total: config.format_amount(order.total_amount()),
            actions: order
                .available_actions()
                .into_iter()
                .map(|action| action.verb(kind))
                .collect(),
            cancellation_reason: order.cancellation_reason().map(str::to_string),
            created_at: order.created_at(),
        }
    }
}

impl LineView {
    fn new(line: &PricedLine, config: &Config) -> Self {
        Self {
            product: line.product_name.clone(),
            sku: line.sku.clone(),
            quantity: line.quantity,
            unit_price: config.format_amount(line.unit_price),
            line_total: config.format_amount(line.line_total),
        }
    }
}

impl SummaryView {
    pub fn new(summary: &SalesSummary, config: &Config) -> Self {
        Self {
            total_sales: summary.total_sales,
            confirmed_sales: summary.confirmed_sales,
            cancelled_sales: summary.cancelled_sales,
            pending_sales: summary.pending_sales,
            total_revenue: config.format_amount(summary.total_revenue),
        }
    }
}
