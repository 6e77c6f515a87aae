//! Back-office console.
//!
//! Replays a JSON workflow script of catalog and order actions against
//! the domain services, gating each action by staff role, and reports
//! the resulting order lists and dashboard.

pub mod config;
pub mod error;
pub mod runner;
pub mod script;
pub mod view;

pub use config::Config;
pub use error::ConsoleError;
pub use runner::{Console, RunReport, StepOutcome, StepResult};
pub use script::{CustomerForm, ItemRow, ProductForm, Script, Step};
pub use view::{LineView, OrderView, SummaryView};
