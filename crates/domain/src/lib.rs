//! Core of the back-office console.
//!
//! This crate provides:
//! - Money and the product/customer catalog
//! - Line-item pricing and the order lifecycle (sales and purchases)
//! - The event-sourced Order aggregate and the services that run commands
//! - The dashboard sales summary and role-based section access

pub mod access;
pub mod aggregate;
pub mod catalog;
pub mod command;
pub mod error;
pub mod money;
pub mod order;
pub mod summary;

pub use access::{Role, Section};
pub use aggregate::{Aggregate, DomainEvent};
pub use catalog::{
    Catalog, CatalogError, CatalogService, Customer, CustomerLookup, NewCustomer, NewProduct,
    Product, ProductLookup,
};
pub use command::{Command, CommandHandler, CommandResult};
pub use error::{DomainError, ErrorKind};
pub use money::{Money, ParseMoneyError};
pub use order::{
    CancelOrder, ConfirmOrder, Counterparty, CounterpartyRef, DeleteOrder, EditOrder,
    InvalidStateError, LineItem, Order, OrderAction, OrderError, OrderEvent, OrderKind,
    OrderService, OrderStatus, PlaceOrder, PricedLine, PricedOrder, ValidationError, price_lines,
};
pub use summary::SalesSummary;
