//! Data models for the backend entities

mod crypto;
mod de;
mod transaction;
mod user;
mod wallet;

pub use crypto::*;
pub use transaction::*;
pub use user::*;
pub use wallet::*;
