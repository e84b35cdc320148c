pub mod booking;
pub mod cart;
pub mod error;
pub mod memory;
pub mod repository;
pub mod route;
pub mod user;

pub use error::{DomainError, DomainResult};
