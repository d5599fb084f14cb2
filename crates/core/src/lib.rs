//! `medportal-core` — shared building blocks for the portal session layer.
//!
//! This crate contains **pure** primitives (no storage, no navigation).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::AuthFault;
pub use id::{Email, EmployeeId};
pub use value_object::ValueObject;
