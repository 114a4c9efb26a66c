//! Balance reconstruction over the movement ledger.
//!
//! The aggregator never stores balances. Every figure is derived from ledger
//! sums at query time:
//! - opening: inbound minus outbound quantities before the window
//! - purchases, transfers in and transfers out: sums inside the window
//! - closing: opening plus the window's net movement
//!
//! A transfer is split into legs. Its destination receives the inbound leg and
//! its source the outbound leg, and the caller's base scope is applied to the
//! leg being summed.

pub mod aggregator;
pub mod error;
pub mod query;
pub mod service;
pub mod store;
pub mod window;

#[cfg(test)]
mod aggregator_props;
#[cfg(test)]
mod memory;

pub use aggregator::{BalanceAggregator, BalanceQuery, BalanceSummary};
pub use error::BalanceError;
pub use query::{Leg, QuantityQuery, TimeRange};
pub use service::{BalanceRequest, BalanceService};
pub use store::LedgerStore;
pub use window::{DateWindow, parse_bound};
