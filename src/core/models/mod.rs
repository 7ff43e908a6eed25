pub mod audit;
pub mod balance;
pub mod contact;
pub mod expense;
pub mod marker;
pub mod settlement;
pub mod transaction;
