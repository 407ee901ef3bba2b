pub mod balances;
pub mod errors;
pub mod guard;
pub mod ledger;
pub mod models;
pub mod money;
pub mod services;
pub mod suggestions;
