//! The transition table every order command is checked against.

use super::{InvalidStateError, OrderAction, OrderKind, OrderStatus};

/// Returns whether `action` is allowed on an order of `kind` in `status`.
///
/// Every action requires a Pending order. Cancel additionally requires a
/// sale; purchases can only be received or deleted.
pub fn permits(kind: OrderKind, status: OrderStatus, action: OrderAction) -> bool {
    match (status, action) {
        (OrderStatus::Pending, OrderAction::Cancel) => kind == OrderKind::Sale,
        (OrderStatus::Pending, _) => true,
        (OrderStatus::Confirmed | OrderStatus::Cancelled, _) => false,
    }
}

/// Checks `action` against the table, failing with [`InvalidStateError`].
pub fn authorize(
    kind: OrderKind,
    status: OrderStatus,
    action: OrderAction,
) -> Result<(), InvalidStateError> {
    if permits(kind, status, action) {
        Ok(())
    } else {
        Err(InvalidStateError {
            kind,
            status,
            action,
        })
    }
}

/// Actions currently available, in display order. Used to decide which
/// controls to enable; commands still re-check through [`authorize`].
pub fn available_actions(kind: OrderKind, status: OrderStatus) -> Vec<OrderAction> {
    OrderAction::ALL
        .into_iter()
        .filter(|action| permits(kind, status, *action))
        .collect()
}
