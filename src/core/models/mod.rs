pub mod audit;
pub mod balance;
pub mod expense;
pub mod group;
pub mod settlement;
