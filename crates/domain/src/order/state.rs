//! Order kinds, statuses and the actions that move between them.

use serde::{Deserialize, Serialize};

/// Whether an order sells to a customer or buys from a supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderKind {
    #[default]
    Sale,
    Purchase,
}

impl OrderKind {
    /// Statuses an order of this kind can ever be in.
    pub fn statuses(&self) -> &'static [OrderStatus] {
        match self {
            OrderKind::Sale => &[
                OrderStatus::Pending,
                OrderStatus::Confirmed,
                OrderStatus::Cancelled,
            ],
            OrderKind::Purchase => &[OrderStatus::Pending, OrderStatus::Confirmed],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderKind::Sale => "sale",
            OrderKind::Purchase => "purchase",
        }
    }
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The status of an order in its lifecycle.
///
/// ```text
/// Pending ──confirm──► Confirmed
///    │
///    └────cancel────► Cancelled   (sales only)
/// ```
///
/// Confirmed and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Confirmed | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something a user can attempt on an existing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderAction {
    Edit,
    Confirm,
    Cancel,
    Delete,
}

impl OrderAction {
    pub const ALL: [OrderAction; 4] = [
        OrderAction::Edit,
        OrderAction::Confirm,
        OrderAction::Cancel,
        OrderAction::Delete,
    ];

    /// The word the console uses for this action on an order of `kind`.
    pub fn verb(&self, kind: OrderKind) -> &'static str {
        match (self, kind) {
            (OrderAction::Edit, _) => "edit",
            (OrderAction::Confirm, OrderKind::Sale) => "sell",
            (OrderAction::Confirm, OrderKind::Purchase) => "receive",
            (OrderAction::Cancel, _) => "cancel",
            (OrderAction::Delete, _) => "delete",
        }
    }

    /// Status reached after the action succeeds. `None` for delete.
    pub fn target(&self) -> Option<OrderStatus> {
        match self {
            OrderAction::Edit => Some(OrderStatus::Pending),
            OrderAction::Confirm => Some(OrderStatus::Confirmed),
            OrderAction::Cancel => Some(OrderStatus::Cancelled),
            OrderAction::Delete => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderAction::Edit => "edit",
            OrderAction::Confirm => "confirm",
            OrderAction::Cancel => "cancel",
            OrderAction::Delete => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Confirmed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_purchases_have_no_cancelled_status() {
        assert!(OrderKind::Sale.statuses().contains(&OrderStatus::Cancelled));
        assert!(!OrderKind::Purchase.statuses().contains(&OrderStatus::Cancelled));
    }

    #[test]
    fn test_confirm_verb_depends_on_kind() {
        assert_eq!(OrderAction::Confirm.verb(OrderKind::Sale), "sell");
        assert_eq!(OrderAction::Confirm.verb(OrderKind::Purchase), "receive");
        assert_eq!(OrderAction::Cancel.verb(OrderKind::Sale), "cancel");
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderStatus::Confirmed.to_string(), "Confirmed");
        assert_eq!(OrderKind::Purchase.to_string(), "purchase");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&OrderStatus::Cancelled).unwrap();
        assert_eq!(json, "\"Cancelled\"");
        let status: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }
}
