//! Role-based access filter.
//!
//! Every read or write of inventory data passes through here first:
//! - `UserRole` decides which operations a role may perform at all
//! - `resolve_scope` narrows a permitted read to the bases the caller may see
//! - `authorize_movement` checks that a commander only moves stock of their own base

mod error;
mod role;
mod scope;


pub use error::AccessError;
pub use role::{Operation, UserRole};
pub use scope::{BaseScope, Caller, authorize_movement, resolve_scope};
