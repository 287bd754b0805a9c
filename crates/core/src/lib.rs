//! `stockpulse-core` — shared domain building blocks.
//!
//! Identifiers, money, and the domain error model. No IO lives here.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{OrderId, OwnerId, ProductId};
pub use money::Money;
pub use value_object::ValueObject;
