//! Route modules for the API server
//!
//! - transactions: today's filtered list, entry, payment toggle, reload
//! - summary: day totals
//! - lookup: customer search
//! - delete: password-confirmed deletion

pub mod delete;
pub mod lookup;
pub mod summary;
pub mod transactions;
