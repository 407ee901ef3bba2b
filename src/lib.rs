pub mod api;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::balances::compute_balances;
pub use crate::core::errors::SettleUpError;
pub use crate::core::guard::cap_settlement;
pub use crate::core::services::SettleUpService;
pub use crate::core::suggestions::suggest_settlements;
pub use crate::infrastructure::logging::in_memory::InMemoryLogging;
pub use crate::infrastructure::storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;
