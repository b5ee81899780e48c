//! Subcommand implementations

pub mod buy;
pub mod cryptos;
pub mod transactions;
pub mod users;
pub mod wallet;
