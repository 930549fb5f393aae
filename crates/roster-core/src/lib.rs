pub mod criteria;
pub mod db;
pub mod error;
pub mod model;
pub mod projection;
pub mod repository;
pub mod schema;

pub use error::{RosterError, RosterResult};
