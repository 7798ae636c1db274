//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod response;
mod transaction;
mod user;
mod wallet;
pub mod result;

pub use response::{RegisterUserResponse, Response};
pub use transaction::Transaction;
pub use user::User;
pub use wallet::Wallet;
