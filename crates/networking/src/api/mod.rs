//! High-level API wrappers for cointrack endpoints
//!
//! This module provides convenient wrappers around the raw HTTP client,
//! adding business logic like validation, the purchase flow, and the
//! delete guards.

mod cryptos;
mod trading;
mod users;

pub use cryptos::*;
pub use trading::*;
pub use users::*;
