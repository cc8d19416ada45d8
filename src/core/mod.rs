//! Core business logic, framework-agnostic.
//!
//! The order transaction manager in [`order`] is the heart of the crate; the
//! other modules are the collaborators it orchestrates.

/// Inventory ledger - stock levels, restocking, and atomic reservations
pub mod inventory;
/// Menu item operations
pub mod menu;
/// Order transaction manager and order lifecycle
pub mod order;
/// Recipe catalog - per-item ingredient requirements
pub mod recipe;
