//! Storage and business rules behind the Almanac API.
//!
//! Every table is described by a [`Resource`] and served through a generic
//! [`Service`]. [`Engine`] owns the database connection, hands out one shared
//! service per resource, and implements the user and seed operations.

pub use error::EngineError;
pub use listeners::{ChangeListeners, Listener};
pub use ops::{Engine, EngineBuilder, SeedReport};
pub use resource::{ColumnOf, Resource};
pub use service::{Saved, Service};

pub mod bills;
pub mod botw;
pub mod tax;

mod error;
mod listeners;
mod ops;
mod password;
mod resource;
mod service;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
