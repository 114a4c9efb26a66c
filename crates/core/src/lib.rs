//! Core business logic for Quartermaster.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `access` - Roles, capability checks and base scoping
//! - `ledger` - Movement records, draft validation and recording
//! - `balance` - Opening/closing balance reconstruction from the ledger

pub mod access;
pub mod balance;
pub mod ledger;
